//! Task view handler: search, filter and sort the tasks of a list

use crate::TaskListServerHandler;
use crate::formatting;
use crate::tasks::{TaskQuery, local_now};
use crate::validation;
use crate::view;
use mcp_attr::{Result as McpResult, bail_public};

impl TaskListServerHandler {
    /// Renders the tasks of a list (the active list when `list_id` is omitted)
    /// with stats, due labels and empty-state messages.
    pub async fn handle_tasks(
        &self,
        list_id: Option<String>,
        search: Option<String>,
        filter: Option<String>,
        sort: Option<String>,
    ) -> McpResult<String> {
        let query = TaskQuery {
            search: search.unwrap_or_default(),
            filter: validation::parse_filter_param(filter.as_deref())?,
            sort: validation::parse_sort_param(sort.as_deref())?,
        };
        let requested = list_id
            .map(|id| validation::normalize_id(&id))
            .filter(|id| !id.is_empty());

        let store = self.store();
        if let Some(ref id) = requested
            && store.list(id).is_none()
        {
            bail_public!(
                _,
                "List not found: List '{}' does not exist. Use lists() to see available lists.",
                id
            );
        }

        let active = match requested {
            Some(id) => Some(id),
            None => self.selection().active().map(str::to_string),
        };
        let board = view::render_board(store.lists(), active.as_deref(), &query, local_now());
        drop(store);

        Ok(formatting::format_board(&board))
    }
}
