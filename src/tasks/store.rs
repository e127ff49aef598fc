use chrono::NaiveDateTime;
use log::{error, info, warn};

use super::queries::visible_tasks;
use super::task::{Task, TaskList, TaskQuery};
use crate::error::{Error, Result};
use crate::storage::Persistence;

/// Lists created for a first run, in this order
pub const DEFAULT_LIST_NAMES: [&str; 3] = ["Work", "Personal", "Shopping"];

/// Owner of all task lists
///
/// Every mutator validates its input before touching state, so a rejected call
/// leaves the store unchanged. A successful mutation is immediately followed by
/// a full-state save. When that save fails the mutation stays applied in memory
/// and `Error::Storage` is returned: in-memory and persisted state are then only
/// eventually consistent, until the next successful save.
pub struct TaskStore {
    /// Lists in creation order
    lists: Vec<TaskList>,
    persistence: Box<dyn Persistence>,
}

impl TaskStore {
    /// Load the store from `persistence`, seeding the default lists on first run
    pub fn open(persistence: impl Persistence + 'static) -> Result<Self> {
        let persistence: Box<dyn Persistence> = Box::new(persistence);
        match persistence.load()? {
            Some(lists) => {
                info!(
                    "event=store_load module=store status=ok lists={}",
                    lists.len()
                );
                Ok(Self { lists, persistence })
            }
            None => {
                let lists = DEFAULT_LIST_NAMES
                    .iter()
                    .map(|name| TaskList::new(name.to_string()))
                    .collect();
                let store = Self { lists, persistence };
                store.persist()?;
                info!("event=store_seed module=store status=ok lists=3");
                Ok(store)
            }
        }
    }

    /// All lists in creation order
    pub fn lists(&self) -> &[TaskList] {
        &self.lists
    }

    /// Find a list by its ID
    pub fn list(&self, list_id: &str) -> Option<&TaskList> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    /// Find a task by list and task ID
    pub fn task(&self, list_id: &str, task_id: &str) -> Option<&Task> {
        self.list(list_id).and_then(|l| l.find_task(task_id))
    }

    fn list_mut(&mut self, list_id: &str) -> Result<&mut TaskList> {
        self.lists
            .iter_mut()
            .find(|l| l.id == list_id)
            .ok_or_else(|| Error::list_not_found(list_id))
    }

    fn task_mut(&mut self, list_id: &str, task_id: &str) -> Result<&mut Task> {
        self.list_mut(list_id)?
            .find_task_mut(task_id)
            .ok_or_else(|| Error::task_not_found(task_id))
    }

    fn persist(&self) -> Result<()> {
        if let Err(e) = self.persistence.save(&self.lists) {
            error!("event=store_save module=store status=error error={}", e);
            return Err(e.into());
        }
        Ok(())
    }

    /// Create a new empty list at the end of the sequence
    ///
    /// # Errors
    /// - `Validation` when the trimmed name is empty
    /// - `DuplicateName` when a list with the same name exists, ignoring case
    pub fn create_list(&mut self, name: &str) -> Result<TaskList> {
        let name = name.trim();
        if name.is_empty() {
            warn!("event=list_create module=store status=rejected reason=empty_name");
            return Err(Error::validation("list name cannot be empty"));
        }

        let lowered = name.to_lowercase();
        if self
            .lists
            .iter()
            .any(|l| l.name.trim().to_lowercase() == lowered)
        {
            warn!("event=list_create module=store status=rejected reason=duplicate_name");
            return Err(Error::DuplicateName(name.to_string()));
        }

        let list = TaskList::new(name.to_string());
        self.lists.push(list.clone());
        info!("event=list_create module=store status=ok list_id={}", list.id);
        self.persist()?;
        Ok(list)
    }

    /// Delete a list together with all its tasks
    ///
    /// # Returns
    /// The removed list
    pub fn delete_list(&mut self, list_id: &str) -> Result<TaskList> {
        let Some(pos) = self.lists.iter().position(|l| l.id == list_id) else {
            warn!("event=list_delete module=store status=rejected reason=not_found");
            return Err(Error::list_not_found(list_id));
        };

        let list = self.lists.remove(pos);
        info!(
            "event=list_delete module=store status=ok list_id={} tasks={}",
            list.id,
            list.tasks.len()
        );
        self.persist()?;
        Ok(list)
    }

    /// Append a new incomplete task to a list
    ///
    /// Title and description are stored trimmed.
    pub fn create_task(
        &mut self,
        list_id: &str,
        title: &str,
        description: &str,
        due_date: Option<NaiveDateTime>,
    ) -> Result<Task> {
        let title = title.trim();
        let list = self.list_mut(list_id)?;
        if title.is_empty() {
            warn!("event=task_create module=store status=rejected reason=empty_title");
            return Err(Error::validation("task title cannot be empty"));
        }

        let task = Task::new(title.to_string(), description.trim().to_string(), due_date);
        list.tasks.push(task.clone());
        info!(
            "event=task_create module=store status=ok list_id={} task_id={}",
            list_id, task.id
        );
        self.persist()?;
        Ok(task)
    }

    /// Overwrite title, description and due date of a task in place
    ///
    /// `id`, `completed` and `created_at` are never touched.
    pub fn update_task(
        &mut self,
        list_id: &str,
        task_id: &str,
        title: &str,
        description: &str,
        due_date: Option<NaiveDateTime>,
    ) -> Result<Task> {
        let title = title.trim();
        let task = self.task_mut(list_id, task_id)?;
        if title.is_empty() {
            warn!("event=task_update module=store status=rejected reason=empty_title");
            return Err(Error::validation("task title cannot be empty"));
        }

        task.title = title.to_string();
        task.description = description.trim().to_string();
        task.due_date = due_date;
        let updated = task.clone();
        info!(
            "event=task_update module=store status=ok list_id={} task_id={}",
            list_id, task_id
        );
        self.persist()?;
        Ok(updated)
    }

    /// Remove a task permanently
    ///
    /// # Returns
    /// The removed task
    pub fn delete_task(&mut self, list_id: &str, task_id: &str) -> Result<Task> {
        let list = self.list_mut(list_id)?;
        let Some(pos) = list.tasks.iter().position(|t| t.id == task_id) else {
            warn!("event=task_delete module=store status=rejected reason=not_found");
            return Err(Error::task_not_found(task_id));
        };

        let task = list.tasks.remove(pos);
        info!(
            "event=task_delete module=store status=ok list_id={} task_id={}",
            list_id, task_id
        );
        self.persist()?;
        Ok(task)
    }

    /// Flip the completion flag of a task
    ///
    /// # Returns
    /// The task after toggling
    pub fn toggle_complete(&mut self, list_id: &str, task_id: &str) -> Result<Task> {
        let task = self.task_mut(list_id, task_id)?;
        task.completed = !task.completed;
        let toggled = task.clone();
        info!(
            "event=task_toggle module=store status=ok list_id={} task_id={} completed={}",
            list_id, task_id, toggled.completed
        );
        self.persist()?;
        Ok(toggled)
    }

    /// Ordered visible tasks of a list for the given query
    pub fn visible_tasks(&self, list_id: &str, query: &TaskQuery) -> Result<Vec<Task>> {
        let list = self
            .list(list_id)
            .ok_or_else(|| Error::list_not_found(list_id))?;
        Ok(visible_tasks(
            &list.tasks,
            &query.search,
            query.filter,
            query.sort,
        ))
    }
}
