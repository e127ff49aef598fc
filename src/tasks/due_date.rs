//! Due date classification and display labels
//!
//! All comparisons happen in local wall-clock time and on local calendar-day
//! boundaries: a task due tomorrow at 01:00 is "Tomorrow" even when it is only
//! a couple of hours away.
//!
//! Every function has an `_at` variant taking an explicit `now`, which the
//! render model and the tests use to keep a single reference instant.

use chrono::{Local, NaiveDateTime};

/// Get the current date and time in the local timezone
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Relative-day classification of a due date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    /// No due date set
    None,
    /// Due strictly before now
    Overdue,
    /// Due later today
    Today,
    /// Due on a later calendar day
    Future,
}

pub fn is_overdue(date: Option<NaiveDateTime>) -> bool {
    is_overdue_at(date, local_now())
}

pub fn is_overdue_at(date: Option<NaiveDateTime>, now: NaiveDateTime) -> bool {
    date.is_some_and(|due| due < now)
}

pub fn is_today(date: Option<NaiveDateTime>) -> bool {
    is_today_at(date, local_now())
}

pub fn is_today_at(date: Option<NaiveDateTime>, now: NaiveDateTime) -> bool {
    date.is_some_and(|due| due.date() == now.date())
}

pub fn classify(date: Option<NaiveDateTime>) -> DueStatus {
    classify_at(date, local_now())
}

/// Classify a due date relative to `now`
///
/// Overdue wins over today: a task due at 09:00 is overdue at 10:00 the same
/// day.
pub fn classify_at(date: Option<NaiveDateTime>, now: NaiveDateTime) -> DueStatus {
    if date.is_none() {
        DueStatus::None
    } else if is_overdue_at(date, now) {
        DueStatus::Overdue
    } else if is_today_at(date, now) {
        DueStatus::Today
    } else {
        DueStatus::Future
    }
}

pub fn format_label(date: Option<NaiveDateTime>) -> String {
    format_label_at(date, local_now())
}

/// Human-readable due label
///
/// # Returns
/// - `""` when no due date is set
/// - `"Today at 03:30 PM"` / `"Tomorrow at 09:00 AM"` for today and tomorrow
/// - `"Overdue - Mar 5"` for any earlier calendar day
/// - `"Mar 5, 2026"` for anything later
pub fn format_label_at(date: Option<NaiveDateTime>, now: NaiveDateTime) -> String {
    let Some(due) = date else {
        return String::new();
    };

    let diff_days = (due.date() - now.date()).num_days();
    match diff_days {
        0 => format!("Today at {}", due.format("%I:%M %p")),
        1 => format!("Tomorrow at {}", due.format("%I:%M %p")),
        d if d < 0 => format!("Overdue - {}", due.format("%b %-d")),
        _ => due.format("%b %-d, %Y").to_string(),
    }
}
