//! Task Lists MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server for managing
//! named task lists. Lists hold tasks with an optional description and due
//! date; tasks can be searched, filtered by completion and sorted.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `TaskListServerHandler` - Handles MCP protocol communication
//! - **Domain Layer**: `tasks` module - Task store, queries and due date rules
//! - **Persistence Layer**: `storage` module - TOML file storage behind the `Persistence` trait
//!
//! # Example
//!
//! ```no_run
//! use tasklists_mcp::TaskListServerHandler;
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = TaskListServerHandler::new("tasks.toml")?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod formatting;
mod handlers;
pub mod id;
pub mod logging;
pub mod selection;
pub mod storage;
pub mod tasks;
pub mod validation;
pub mod view;

use anyhow::Result;
use log::info;
use mcp_attr::server::{McpServer, mcp_server};
use mcp_attr::{Result as McpResult, bail_public};
use std::sync::{Mutex, MutexGuard, PoisonError};

// Re-export commonly used types
pub use error::{Error, StorageError};
pub use selection::Selection;
pub use storage::{FileStorage, MemoryStorage, Persistence};
pub use tasks::{FilterMode, SortMode, Task, TaskList, TaskQuery, TaskStore};

/// MCP Server handler for task list management
///
/// Owns the task store and the active-list selection. Every mutation is
/// persisted through the store before the tool responds.
pub struct TaskListServerHandler {
    pub(crate) store: Mutex<TaskStore>,
    pub(crate) selection: Mutex<Selection>,
}

impl TaskListServerHandler {
    /// Create a new handler backed by a TOML file
    ///
    /// # Arguments
    /// * `storage_path` - Path to the task data file (TOML format)
    ///
    /// # Returns
    /// Result containing the handler or an error
    ///
    /// # Example
    /// ```no_run
    /// # use tasklists_mcp::TaskListServerHandler;
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let handler = TaskListServerHandler::new("tasks.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(storage_path: &str) -> Result<Self> {
        let handler = Self::with_persistence(FileStorage::new(storage_path))?;
        info!(
            "event=server_open module=server status=ok file={}",
            storage_path
        );
        Ok(handler)
    }

    /// Create a handler on top of any persistence backend.
    ///
    /// The first list, if any, starts out active.
    pub fn with_persistence(persistence: impl Persistence + 'static) -> Result<Self> {
        let store = TaskStore::open(persistence)?;
        let selection = Selection::first_of(store.lists());
        Ok(Self {
            store: Mutex::new(store),
            selection: Mutex::new(selection),
        })
    }

    /// ID of the active list, if any
    pub fn active_list(&self) -> Option<String> {
        self.selection().active().map(str::to_string)
    }

    // Lock order: store before selection.
    pub(crate) fn store(&self) -> MutexGuard<'_, TaskStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn selection(&self) -> MutexGuard<'_, Selection> {
        self.selection.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Explicit list ID when given, otherwise the active list
    pub(crate) fn resolve_list_id(&self, list_id: Option<String>) -> McpResult<String> {
        if let Some(id) = list_id.map(|id| validation::normalize_id(&id))
            && !id.is_empty()
        {
            return Ok(id);
        }
        match self.active_list() {
            Some(id) => Ok(id),
            None => bail_public!(
                _,
                "No list selected. Create a list with create_list() or pick one with select_list()."
            ),
        }
    }
}

/// Task list manager: organize tasks into named lists.
///
/// Each list holds tasks with a title, an optional description and an optional
/// due date. One list is active at a time; task tools act on the active list
/// unless a `list_id` is passed.
///
/// Key concepts:
/// - **lists**: Named containers; names are unique ignoring case
/// - **tasks**: Title, description, due date, completion flag
/// - **filter**: all / active / completed
/// - **sort**: date-created (newest first) / due-date (soonest first, undated last) / title
///
/// Due dates use `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM` in local time.
/// Deleting a list or a task requires `confirm=true`.
#[mcp_server]
impl McpServer for TaskListServerHandler {
    /// **Lists**: Show all lists with task counts. The active list is marked.
    #[tool]
    async fn lists(&self) -> McpResult<String> {
        self.handle_lists().await
    }

    /// **Create list**: Add a named list and make it active. Names must be unique (case-insensitive).
    #[tool]
    async fn create_list(
        &self,
        /// Name: display name of the list (e.g., "Groceries")
        name: String,
    ) -> McpResult<String> {
        self.handle_create_list(name).await
    }

    /// **Select list**: Make a list active. Task tools default to the active list.
    #[tool]
    async fn select_list(
        &self,
        /// List ID: from lists()
        list_id: String,
    ) -> McpResult<String> {
        self.handle_select_list(list_id).await
    }

    /// **Delete list**: Remove a list and all of its tasks.
    /// **Workflow**: Call once to see what will be removed, then again with confirm=true.
    #[tool]
    async fn delete_list(
        &self,
        /// List ID: defaults to the active list (optional)
        list_id: Option<String>,
        /// Confirm: true to actually delete (optional)
        confirm: Option<bool>,
    ) -> McpResult<String> {
        self.handle_delete_list(list_id, confirm).await
    }

    /// **Add task**: Create a task in a list. New tasks start active.
    #[tool]
    async fn add_task(
        &self,
        /// Title: brief description, required
        title: String,
        /// Description: longer details (optional)
        description: Option<String>,
        /// Due date: YYYY-MM-DD or YYYY-MM-DDTHH:MM, local time (optional)
        due_date: Option<String>,
        /// List ID: defaults to the active list (optional)
        list_id: Option<String>,
    ) -> McpResult<String> {
        self.handle_add_task(title, description, due_date, list_id)
            .await
    }

    /// **Update task**: Change title, description or due date. Omitted fields keep their value; "" clears description or due date.
    #[tool]
    async fn update_task(
        &self,
        /// Task ID: from tasks()
        task_id: String,
        /// Title: new title (optional)
        title: Option<String>,
        /// Description: new description, "" to clear (optional)
        description: Option<String>,
        /// Due date: YYYY-MM-DD or YYYY-MM-DDTHH:MM, "" to clear (optional)
        due_date: Option<String>,
        /// List ID: defaults to the active list (optional)
        list_id: Option<String>,
    ) -> McpResult<String> {
        self.handle_update_task(task_id, title, description, due_date, list_id)
            .await
    }

    /// **Toggle task**: Flip a task between active and completed.
    #[tool]
    async fn toggle_task(
        &self,
        /// Task ID: from tasks()
        task_id: String,
        /// List ID: defaults to the active list (optional)
        list_id: Option<String>,
    ) -> McpResult<String> {
        self.handle_toggle_task(task_id, list_id).await
    }

    /// **Delete task**: Remove a task permanently.
    /// **Workflow**: Call once to see what will be removed, then again with confirm=true.
    #[tool]
    async fn delete_task(
        &self,
        /// Task ID: from tasks()
        task_id: String,
        /// List ID: defaults to the active list (optional)
        list_id: Option<String>,
        /// Confirm: true to actually delete (optional)
        confirm: Option<bool>,
    ) -> McpResult<String> {
        self.handle_delete_task(task_id, list_id, confirm).await
    }

    /// **Tasks**: Show the tasks of a list with stats and due labels.
    /// **Filter**: all/active/completed. **Sort**: date-created/due-date/title.
    #[tool]
    async fn tasks(
        &self,
        /// List ID: defaults to the active list (optional)
        list_id: Option<String>,
        /// Search: case-insensitive text matched against title and description (optional)
        search: Option<String>,
        /// Filter: all, active or completed (optional, default all)
        filter: Option<String>,
        /// Sort: date-created, due-date or title (optional, default date-created)
        sort: Option<String>,
    ) -> McpResult<String> {
        self.handle_tasks(list_id, search, filter, sort).await
    }
}
