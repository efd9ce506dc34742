//! Display Formatting
//!
//! Text helpers for the task table and header.

use chrono::{DateTime, Utc};

use crate::models::{Priority, Status};

/// "Mar 1, 2024"
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

pub fn priority_icon(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "🔥",
        Priority::Medium => "⚡",
        Priority::Low => "🌱",
    }
}

pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Completed => "✅",
        Status::InProgress => "🔄",
        Status::ToDo => "📋",
    }
}

/// CSS modifier shared by badges and selects
pub fn priority_class(priority: Priority) -> String {
    format!("badge priority-{}", priority.as_str())
}

pub fn status_class(status: Status) -> String {
    format!("status-select status-{}", status.as_str())
}

/// "1 task" / "3 tasks"
pub fn count_label(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_date() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        assert_eq!(format_date(&at), "Mar 1, 2024");

        let at = Utc.with_ymd_and_hms(2023, 12, 25, 23, 59, 59).unwrap();
        assert_eq!(format_date(&at), "Dec 25, 2023");
    }

    #[test]
    fn test_classes_follow_wire_names() {
        assert_eq!(priority_class(Priority::High), "badge priority-high");
        assert_eq!(status_class(Status::InProgress), "status-select status-in_progress");
    }

    #[test]
    fn test_count_label() {
        assert_eq!(count_label(0, "task"), "0 tasks");
        assert_eq!(count_label(1, "task"), "1 task");
        assert_eq!(count_label(12, "task"), "12 tasks");
    }
}
