//! Query engine for task views
//!
//! `visible_tasks` turns a list's tasks plus a (search, filter, sort) request
//! into the ordered subset shown to the user. Every sort is stable so that an
//! unchanged list renders in the same order every time.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::task::{FilterMode, SortMode, Task};

/// Produce the ordered visible subset of `tasks`
///
/// # Arguments
/// * `tasks` - All tasks of a list, in insertion order
/// * `search` - Case-insensitive substring matched against title or description; blank means no search
/// * `filter` - Completion filter, combined with the search by AND
/// * `sort` - Ordering of the result
///
/// # Returns
/// A new vector; `tasks` is left untouched
pub fn visible_tasks(tasks: &[Task], search: &str, filter: FilterMode, sort: SortMode) -> Vec<Task> {
    let needle = search.trim().to_lowercase();

    let mut visible: Vec<Task> = tasks
        .iter()
        .filter(|task| needle.is_empty() || matches_search(task, &needle))
        .filter(|task| filter.matches(task))
        .cloned()
        .collect();

    // slice::sort_by is stable
    match sort {
        SortMode::DateCreated => visible.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortMode::DueDate => visible.sort_by(compare_due_dates),
        SortMode::Title => visible.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }

    visible
}

fn matches_search(task: &Task, needle: &str) -> bool {
    task.title.to_lowercase().contains(needle)
        || (!task.description.is_empty() && task.description.to_lowercase().contains(needle))
}

fn compare_due_dates(a: &Task, b: &Task) -> Ordering {
    match (a.due_date, b.due_date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Locale-style title comparison
///
/// Three levels, each only consulted on a tie of the previous one:
/// base letters (accents and case removed), then accents, then case with
/// lowercase first. So "apple" < "Apple" < "eclair" < "éclair" < "fig".
fn compare_titles(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| {
            a.chars()
                .map(|c| c.is_uppercase())
                .cmp(b.chars().map(|c| c.is_uppercase()))
        })
}

fn base_letters(title: &str) -> String {
    title
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Completion counts for a whole list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
}

/// Count total, completed and active tasks
pub fn task_stats(tasks: &[Task]) -> TaskStats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    TaskStats {
        total,
        completed,
        active: total - completed,
    }
}
