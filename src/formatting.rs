//! Formatting helper functions for the MCP server
//!
//! This module turns the render model from `view` into the plain text returned
//! by the tools.

use crate::tasks::TaskStats;
use crate::view::{ActiveListView, BoardView, DueHighlight, ListEntry, TaskView};

/// Format the sidebar: every list with its task count
///
/// # Arguments
/// * `lists` - Sidebar entries in store order
pub fn format_lists(lists: &[ListEntry]) -> String {
    if lists.is_empty() {
        return "No lists found".to_string();
    }

    let mut result = format!("Found {} list(s):\n\n", lists.len());
    for entry in lists {
        result.push_str(&format!(
            "- [{}] {} ({}){}\n",
            entry.id,
            entry.name,
            entry.task_count,
            if entry.active { " (active)" } else { "" }
        ));
    }
    result
}

/// Format the stats bar, e.g. "3 tasks · 1 completed · 2 active"
pub fn format_stats(stats: &TaskStats) -> String {
    format!(
        "{} task{} · {} completed · {} active",
        stats.total,
        if stats.total == 1 { "" } else { "s" },
        stats.completed,
        stats.active
    )
}

fn format_task(task: &TaskView) -> String {
    let mut line = format!(
        "- [{}] {} (id: {})",
        if task.completed { "x" } else { " " },
        task.title,
        task.id
    );
    if let Some(ref label) = task.due_label {
        line.push_str(&format!("\n  Due: {}", label));
        match task.due_highlight {
            Some(DueHighlight::Overdue) => line.push_str(" [overdue]"),
            Some(DueHighlight::Today) => line.push_str(" [today]"),
            None => {}
        }
    }
    if let Some(ref description) = task.description {
        for desc_line in description.lines() {
            line.push_str(&format!("\n  {}", desc_line));
        }
    }
    line.push('\n');
    line
}

/// Format the content pane of the active list
pub fn format_active_list(view: &ActiveListView) -> String {
    let mut result = format!("{} (id: {})\n", view.name, view.id);
    if let Some(ref stats) = view.stats {
        result.push_str(&format_stats(stats));
        result.push('\n');
    }
    result.push('\n');

    if let Some(message) = view.empty_message {
        result.push_str(message);
        result.push('\n');
        return result;
    }

    for task in &view.tasks {
        result.push_str(&format_task(task));
    }
    result
}

/// Format the whole board: the selected list, or the empty-state message
pub fn format_board(board: &BoardView) -> String {
    match (&board.active, board.empty_message) {
        (Some(active), _) => format_active_list(active),
        (None, Some(message)) => format!("{}\n", message),
        (None, None) => String::new(),
    }
}
