//! Validation helper functions for the MCP server
//!
//! This module parses tool parameters (filter, sort and due date strings)
//! before they reach the task store. Emptiness checks on names and titles are
//! left to the store itself.

use chrono::{NaiveDate, NaiveDateTime};
use mcp_attr::Result as McpResult;

use crate::tasks::{FilterMode, SortMode};

/// Accepted due date layouts, tried in order
const DUE_DATE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

fn invalid_params(message: String) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message, true)
}

/// Parse a due date string into local wall-clock time
///
/// Accepts `YYYY-MM-DDTHH:MM` (what an HTML date-time input produces), the
/// same with seconds or a space separator, and a bare `YYYY-MM-DD` which means
/// the start of that day.
pub fn parse_due_date(date_str: &str) -> Result<NaiveDateTime, String> {
    let trimmed = date_str.trim();
    for format in DUE_DATE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            format!(
                "Invalid due date '{}'. Use YYYY-MM-DDTHH:MM (e.g., '2025-03-15T14:30') or YYYY-MM-DD",
                trimmed
            )
        })
}

/// Parse an optional due date parameter
///
/// # Returns
/// `None` when the parameter is absent or blank
pub fn parse_due_date_param(date_str: Option<&str>) -> McpResult<Option<NaiveDateTime>> {
    match date_str.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_due_date(s).map(Some).map_err(invalid_params),
    }
}

/// Parse the completion filter parameter, defaulting to `all`
pub fn parse_filter_param(filter: Option<&str>) -> McpResult<FilterMode> {
    match filter.map(str::trim) {
        None | Some("") => Ok(FilterMode::default()),
        Some(s) => s.parse().map_err(invalid_params),
    }
}

/// Parse the sort parameter, defaulting to `date-created`
pub fn parse_sort_param(sort: Option<&str>) -> McpResult<SortMode> {
    match sort.map(str::trim) {
        None | Some("") => Ok(SortMode::default()),
        Some(s) => s.parse().map_err(invalid_params),
    }
}

/// Normalize an ID parameter by trimming surrounding whitespace
pub fn normalize_id(id: &str) -> String {
    id.trim().to_string()
}
