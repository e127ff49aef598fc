//! MCP tool handlers for the task list server
//!
//! This module contains the implementation of all MCP tool handlers, grouped
//! by what they act on. Handlers translate tool parameters into task store
//! calls and render the result; business rules stay in the store.

pub mod board;
pub mod lists;
pub mod tasks;

use crate::error::Error;

/// User-facing message for a failed store operation
pub(crate) fn describe_error(error: &Error) -> String {
    match error {
        Error::Validation(message) => format!("Validation failed: {}", message),
        Error::DuplicateName(name) => format!(
            "A list named '{}' already exists. List names must be unique (ignoring case).",
            name
        ),
        Error::NotFound(message) => format!(
            "Not found: {}. Use lists() or tasks() to see available IDs.",
            message
        ),
        Error::Storage(e) => format!(
            "Failed to save: {}. The change is kept in memory but was not written to disk.",
            e
        ),
    }
}
