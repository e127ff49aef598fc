//! Task handlers: add, update, toggle and delete tasks

use crate::TaskListServerHandler;
use crate::handlers::describe_error;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl TaskListServerHandler {
    /// Adds a task to a list (the active list when `list_id` is omitted).
    pub async fn handle_add_task(
        &self,
        title: String,
        description: Option<String>,
        due_date: Option<String>,
        list_id: Option<String>,
    ) -> McpResult<String> {
        let list_id = self.resolve_list_id(list_id)?;
        let due_date = validation::parse_due_date_param(due_date.as_deref())?;

        let mut store = self.store();
        let task = match store.create_task(
            &list_id,
            &title,
            description.as_deref().unwrap_or(""),
            due_date,
        ) {
            Ok(task) => task,
            Err(e) => {
                drop(store);
                bail_public!(_, "{}", describe_error(&e));
            }
        };
        drop(store);

        Ok(format!(
            "Task created with ID: {} (title: {})",
            task.id, task.title
        ))
    }

    /// Updates title, description and due date of a task.
    ///
    /// Omitted fields keep their current value; an empty string clears the
    /// description or the due date.
    pub async fn handle_update_task(
        &self,
        task_id: String,
        title: Option<String>,
        description: Option<String>,
        due_date: Option<String>,
        list_id: Option<String>,
    ) -> McpResult<String> {
        let list_id = self.resolve_list_id(list_id)?;
        let task_id = validation::normalize_id(&task_id);

        let mut store = self.store();
        let Some(current) = store.task(&list_id, &task_id).cloned() else {
            bail_public!(
                _,
                "Task not found: Task '{}' does not exist in list '{}'. Use tasks() to see available tasks.",
                task_id,
                list_id
            );
        };

        let due_date = match due_date {
            Some(date_str) => match validation::parse_due_date_param(Some(&date_str)) {
                Ok(d) => d,
                Err(e) => {
                    drop(store);
                    return Err(e);
                }
            },
            None => current.due_date,
        };
        let title = title.unwrap_or(current.title);
        let description = description.unwrap_or(current.description);

        if let Err(e) = store.update_task(&list_id, &task_id, &title, &description, due_date) {
            drop(store);
            bail_public!(_, "{}", describe_error(&e));
        }
        drop(store);

        Ok(format!("Task {} updated successfully", task_id))
    }

    /// Flips the completion flag of a task.
    pub async fn handle_toggle_task(
        &self,
        task_id: String,
        list_id: Option<String>,
    ) -> McpResult<String> {
        let list_id = self.resolve_list_id(list_id)?;
        let task_id = validation::normalize_id(&task_id);

        let mut store = self.store();
        let task = match store.toggle_complete(&list_id, &task_id) {
            Ok(task) => task,
            Err(e) => {
                drop(store);
                bail_public!(_, "{}", describe_error(&e));
            }
        };
        drop(store);

        Ok(format!(
            "Task {} marked as {}",
            task.id,
            if task.completed { "completed" } else { "active" }
        ))
    }

    /// Deletes a task once the caller confirmed.
    pub async fn handle_delete_task(
        &self,
        task_id: String,
        list_id: Option<String>,
        confirm: Option<bool>,
    ) -> McpResult<String> {
        let list_id = self.resolve_list_id(list_id)?;
        let task_id = validation::normalize_id(&task_id);

        let mut store = self.store();
        if !confirm.unwrap_or(false) {
            let Some(task) = store.task(&list_id, &task_id) else {
                bail_public!(
                    _,
                    "Task not found: Task '{}' does not exist in list '{}'. Use tasks() to see available tasks.",
                    task_id,
                    list_id
                );
            };
            return Ok(format!(
                "Are you sure you want to delete \"{}\"? Call delete_task again with confirm=true to proceed.",
                task.title
            ));
        }

        let task = match store.delete_task(&list_id, &task_id) {
            Ok(task) => task,
            Err(e) => {
                drop(store);
                bail_public!(_, "{}", describe_error(&e));
            }
        };
        drop(store);

        Ok(format!("Task {} ({}) deleted", task.id, task.title))
    }
}
