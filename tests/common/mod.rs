//! Common test utilities for integration tests

#![allow(dead_code)]

use tasklists_mcp::{MemoryStorage, TaskListServerHandler};
use tempfile::NamedTempFile;

/// Create a test handler with temporary file storage
pub fn get_test_handler() -> (TaskListServerHandler, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let handler = TaskListServerHandler::new(temp_file.path().to_str().unwrap()).unwrap();
    (handler, temp_file)
}

/// Create a test handler with in-memory storage
///
/// The returned storage shares its slot with the handler, so tests can
/// inspect saves or make them fail.
pub fn get_memory_handler() -> (TaskListServerHandler, MemoryStorage) {
    let storage = MemoryStorage::new();
    let handler = TaskListServerHandler::with_persistence(storage.clone()).unwrap();
    (handler, storage)
}

/// ID from a "... created with ID: <id> (...)" response
pub fn extract_id_from_response(response: &str) -> String {
    let (_, rest) = response.split_once("ID: ").unwrap();
    let (id, _) = rest.split_once(" (").unwrap();
    id.to_string()
}
