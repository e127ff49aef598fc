//! List handlers: show, create, select and delete lists

use crate::TaskListServerHandler;
use crate::formatting;
use crate::handlers::describe_error;
use crate::tasks::{TaskQuery, local_now};
use crate::validation;
use crate::view;
use mcp_attr::{Result as McpResult, bail_public};

impl TaskListServerHandler {
    /// Shows every list with its task count and marks the active one.
    pub async fn handle_lists(&self) -> McpResult<String> {
        let store = self.store();
        let selection = self.selection();
        let board = view::render_board(
            store.lists(),
            selection.active(),
            &TaskQuery::default(),
            local_now(),
        );
        Ok(formatting::format_lists(&board.lists))
    }

    /// Creates a list and makes it the active one.
    pub async fn handle_create_list(&self, name: String) -> McpResult<String> {
        let mut store = self.store();
        let list = match store.create_list(&name) {
            Ok(list) => list,
            Err(e) => {
                drop(store);
                bail_public!(_, "{}", describe_error(&e));
            }
        };
        drop(store);

        self.selection().select(list.id.clone());

        Ok(format!(
            "List created with ID: {} (name: {})",
            list.id, list.name
        ))
    }

    /// Makes an existing list the active one.
    pub async fn handle_select_list(&self, list_id: String) -> McpResult<String> {
        let list_id = validation::normalize_id(&list_id);
        let store = self.store();
        let Some(list) = store.list(&list_id) else {
            bail_public!(
                _,
                "List not found: List '{}' does not exist. Use lists() to see available lists.",
                list_id
            );
        };
        let name = list.name.clone();
        drop(store);

        self.selection().select(list_id.clone());

        Ok(format!("Selected list {} ({})", list_id, name))
    }

    /// Deletes a list with all its tasks once the caller confirmed.
    ///
    /// Without `confirm=true` nothing is deleted; the response asks for
    /// confirmation instead. When the deleted list was active, the first
    /// remaining list becomes active.
    pub async fn handle_delete_list(
        &self,
        list_id: Option<String>,
        confirm: Option<bool>,
    ) -> McpResult<String> {
        let list_id = self.resolve_list_id(list_id)?;

        let mut store = self.store();
        let Some(list) = store.list(&list_id) else {
            bail_public!(
                _,
                "List not found: List '{}' does not exist. Use lists() to see available lists.",
                list_id
            );
        };

        if !confirm.unwrap_or(false) {
            return Ok(format!(
                "Are you sure you want to delete \"{}\" and all its {} task(s)? Call delete_list again with confirm=true to proceed.",
                list.name,
                list.tasks.len()
            ));
        }

        let removed = match store.delete_list(&list_id) {
            Ok(list) => list,
            Err(e) => {
                // A failed save still removed the list from memory
                if store.list(&list_id).is_none() {
                    self.selection()
                        .reselect_after_delete(&list_id, store.lists());
                }
                drop(store);
                bail_public!(_, "{}", describe_error(&e));
            }
        };

        let mut selection = self.selection();
        selection.reselect_after_delete(&removed.id, store.lists());
        let now_active = selection
            .active()
            .and_then(|id| store.list(id))
            .map(|l| l.name.clone());
        drop(selection);
        drop(store);

        let mut result = format!(
            "List {} ({}) deleted with {} task(s)",
            removed.id,
            removed.name,
            removed.tasks.len()
        );
        match now_active {
            Some(name) => result.push_str(&format!("\nActive list: {}", name)),
            None => result.push_str(&format!("\n{}", view::EMPTY_NO_LISTS)),
        }
        Ok(result)
    }
}
