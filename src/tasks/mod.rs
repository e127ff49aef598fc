//! Task list domain models and business logic
//!
//! This module contains the core data structures and their operations.
//! It is split into submodules:
//! - `task`: `Task`, `TaskList` and the query parameter types
//! - `due_date`: due date classification and display labels
//! - `queries`: search, completion filter, sorting and statistics
//! - `store`: `TaskStore`, the owner of all lists and tasks

pub mod due_date;
mod queries;
mod store;
mod task;

// Re-export all public types
pub use due_date::{DueStatus, local_now};
pub use queries::{TaskStats, task_stats, visible_tasks};
pub use store::{DEFAULT_LIST_NAMES, TaskStore};
pub use task::{FilterMode, SortMode, Task, TaskList, TaskQuery};
