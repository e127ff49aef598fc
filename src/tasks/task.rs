use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::id::new_id;

/// A single actionable item inside a list
///
/// Field names are serialized in camelCase (`dueDate`, `createdAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, never reused
    pub id: String,
    /// Non-empty title
    pub title: String,
    /// Optional free text; empty string when absent
    #[serde(default)]
    pub description: String,
    /// Optional due date in local wall-clock time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
    /// Completion flag
    #[serde(default)]
    pub completed: bool,
    /// Creation instant, stored as epoch milliseconds
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a new incomplete task stamped with the current time
    ///
    /// The timestamp is truncated to milliseconds, the precision it is
    /// persisted with.
    pub fn new(title: String, description: String, due_date: Option<NaiveDateTime>) -> Self {
        Self {
            id: new_id(),
            title,
            description,
            due_date,
            completed: false,
            created_at: Utc::now().trunc_subsecs(3),
        }
    }
}

/// A named, ordered collection of tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    /// Unique identifier, never reused
    pub id: String,
    /// Display name, unique case-insensitively within a store
    pub name: String,
    /// Tasks in insertion order
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TaskList {
    /// Create an empty list with a fresh identifier
    pub fn new(name: String) -> Self {
        Self {
            id: new_id(),
            name,
            tasks: Vec::new(),
        }
    }

    /// Find a task of this list by ID
    pub fn find_task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub(crate) fn find_task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }
}

/// Completion-based visibility rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Every task
    #[default]
    All,
    /// Tasks not yet completed
    Active,
    /// Completed tasks only
    Completed,
}

impl FilterMode {
    /// Check whether a task passes this filter
    pub fn matches(self, task: &Task) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Active => !task.completed,
            FilterMode::Completed => task.completed,
        }
    }
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(FilterMode::All),
            "active" => Ok(FilterMode::Active),
            "completed" => Ok(FilterMode::Completed),
            other => Err(format!(
                "Invalid filter '{}'. Valid options are: all, active, completed",
                other
            )),
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterMode::All => "all",
            FilterMode::Active => "active",
            FilterMode::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Ordering rule for visible tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Most recently created first
    #[default]
    DateCreated,
    /// Earliest due date first, undated tasks last
    DueDate,
    /// Alphabetical by title
    Title,
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "date-created" => Ok(SortMode::DateCreated),
            "due-date" => Ok(SortMode::DueDate),
            "title" => Ok(SortMode::Title),
            other => Err(format!(
                "Invalid sort '{}'. Valid options are: date-created, due-date, title",
                other
            )),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortMode::DateCreated => "date-created",
            SortMode::DueDate => "due-date",
            SortMode::Title => "title",
        };
        f.write_str(name)
    }
}

/// Search, filter and sort parameters for a task view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub search: String,
    pub filter: FilterMode,
    pub sort: SortMode,
}
