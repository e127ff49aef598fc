//! Ephemeral selection state of the presentation layer
//!
//! The active list is never persisted; it lives as long as the server session.

use crate::tasks::TaskList;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    active_list: Option<String>,
}

impl Selection {
    /// Start a session with the first list selected, if any
    pub fn first_of(lists: &[TaskList]) -> Self {
        Self {
            active_list: lists.first().map(|l| l.id.clone()),
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active_list.as_deref()
    }

    pub fn select(&mut self, list_id: impl Into<String>) {
        self.active_list = Some(list_id.into());
    }

    /// Update the selection after a list was deleted
    ///
    /// When the deleted list was the active one, the first remaining list is
    /// selected, or nothing when no lists remain. Any other selection is kept.
    pub fn reselect_after_delete(&mut self, deleted_id: &str, remaining: &[TaskList]) {
        if self.active_list.as_deref() == Some(deleted_id) {
            self.active_list = remaining.first().map(|l| l.id.clone());
        }
    }
}
