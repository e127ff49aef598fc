use std::io;

use thiserror::Error;

/// Failure reading or writing the persisted task lists.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to encode task lists: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("failed to decode task lists: {0}")]
    Decode(#[from] toml::de::Error),
    #[error("unsupported data file format version {0}")]
    UnsupportedVersion(u32),
}

/// Errors returned by task store operations.
///
/// Every variant is recoverable by the caller. `Validation`, `DuplicateName`
/// and `NotFound` are raised before any mutation; `Storage` is raised after the
/// in-memory change was applied, when persisting it failed.
#[derive(Debug, Error)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("a list named '{0}' already exists")]
    DuplicateName(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn list_not_found(list_id: &str) -> Self {
        Self::NotFound(format!("list '{}' does not exist", list_id))
    }

    pub fn task_not_found(task_id: &str) -> Self {
        Self::NotFound(format!("task '{}' does not exist", task_id))
    }
}
