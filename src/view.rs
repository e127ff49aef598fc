//! Render model for the task board
//!
//! `render_board` is a pure function from store state plus query parameters to
//! a description of what the user sees. The MCP layer formats it as text; any
//! other front end can diff and apply it however it likes.

use chrono::NaiveDateTime;

use crate::tasks::due_date::{DueStatus, classify_at, format_label_at};
use crate::tasks::{TaskList, TaskQuery, TaskStats, task_stats, visible_tasks};

pub const EMPTY_NO_LISTS: &str = "Create a list to get started!";
pub const EMPTY_NO_SELECTION: &str = "Select a list to view tasks";
pub const EMPTY_NO_TASKS: &str = "No tasks yet. Add your first task!";
pub const EMPTY_NO_MATCHES: &str = "No tasks match your search or filter.";

/// Due date highlight of an incomplete task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueHighlight {
    Overdue,
    Today,
}

/// Sidebar entry for one list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub id: String,
    pub name: String,
    pub task_count: usize,
    pub active: bool,
}

/// One visible task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub id: String,
    pub title: String,
    /// Present only when the description is non-empty
    pub description: Option<String>,
    pub completed: bool,
    /// Present only when a due date is set
    pub due_label: Option<String>,
    /// Completed tasks are never highlighted
    pub due_highlight: Option<DueHighlight>,
}

/// Content pane of the selected list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveListView {
    pub id: String,
    pub name: String,
    /// Hidden (None) while the list has no tasks at all
    pub stats: Option<TaskStats>,
    pub tasks: Vec<TaskView>,
    pub empty_message: Option<&'static str>,
}

/// Full board: sidebar plus the selected list, or an empty-state message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub lists: Vec<ListEntry>,
    pub active: Option<ActiveListView>,
    pub empty_message: Option<&'static str>,
}

/// Build the board for `lists` with `active_list` selected
///
/// An `active_list` that no longer exists is treated as no selection.
pub fn render_board(
    lists: &[TaskList],
    active_list: Option<&str>,
    query: &TaskQuery,
    now: NaiveDateTime,
) -> BoardView {
    let entries = lists
        .iter()
        .map(|l| ListEntry {
            id: l.id.clone(),
            name: l.name.clone(),
            task_count: l.tasks.len(),
            active: active_list == Some(l.id.as_str()),
        })
        .collect();

    let active = active_list
        .and_then(|id| lists.iter().find(|l| l.id == id))
        .map(|list| render_list(list, query, now));

    let empty_message = match (&active, lists.is_empty()) {
        (Some(_), _) => None,
        (None, true) => Some(EMPTY_NO_LISTS),
        (None, false) => Some(EMPTY_NO_SELECTION),
    };

    BoardView {
        lists: entries,
        active,
        empty_message,
    }
}

/// Build the content pane for one list
pub fn render_list(list: &TaskList, query: &TaskQuery, now: NaiveDateTime) -> ActiveListView {
    let tasks: Vec<TaskView> = visible_tasks(&list.tasks, &query.search, query.filter, query.sort)
        .into_iter()
        .map(|task| {
            let due_highlight = if task.completed {
                None
            } else {
                match classify_at(task.due_date, now) {
                    DueStatus::Overdue => Some(DueHighlight::Overdue),
                    DueStatus::Today => Some(DueHighlight::Today),
                    DueStatus::Future | DueStatus::None => None,
                }
            };
            TaskView {
                due_label: task.due_date.map(|d| format_label_at(Some(d), now)),
                due_highlight,
                description: Some(task.description).filter(|d| !d.is_empty()),
                id: task.id,
                title: task.title,
                completed: task.completed,
            }
        })
        .collect();

    let empty_message = if list.tasks.is_empty() {
        Some(EMPTY_NO_TASKS)
    } else if tasks.is_empty() {
        Some(EMPTY_NO_MATCHES)
    } else {
        None
    };

    ActiveListView {
        id: list.id.clone(),
        name: list.name.clone(),
        stats: (!list.tasks.is_empty()).then(|| task_stats(&list.tasks)),
        tasks,
        empty_message,
    }
}
