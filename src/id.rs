//! Identifier generation for lists and tasks
//!
//! Identifiers are opaque strings. Fresh ones are UUID v7 values: a
//! millisecond timestamp followed by random bits, so uniqueness never depends
//! on checking the identifiers already in the store.

use uuid::Uuid;

/// Generate a fresh identifier for a list or task
///
/// # Returns
/// 32 lowercase hex digits (a UUID v7 without hyphens)
pub fn new_id() -> String {
    Uuid::now_v7().simple().to_string()
}
