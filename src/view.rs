use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::models::Task;
use crate::query::Filter;

/// Deadline classification for a dated task. The three states are mutually
/// exclusive; undated tasks have no status at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Overdue,
    DueSoon,
    Normal,
}

/// Classify a task's deadline against `now`.
///
/// A task without a due time is overdue only once its whole day has passed,
/// so the effective deadline falls back to 23:59. Note the asymmetry with
/// the due-date sort in `query`, which defaults to 00:00.
pub fn due_status(task: &Task, now: NaiveDateTime) -> Option<DueStatus> {
    let date = task.due_date?;
    let deadline = match task.due_time {
        Some(time) => date.and_time(time),
        None => date.and_hms_opt(23, 59, 0)?,
    };

    let until = deadline - now;
    if until < Duration::zero() {
        Some(DueStatus::Overdue)
    } else if until <= Duration::hours(24) {
        Some(DueStatus::DueSoon)
    } else {
        Some(DueStatus::Normal)
    }
}

/// Format a due date relative to `today`: "Today", "Tomorrow", or a short
/// month/day string with the year appended only when it differs.
pub fn format_date(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if date == today + Duration::days(1) {
        "Tomorrow".to_string()
    } else if date.year() == today.year() {
        date.format("%b %-d").to_string()
    } else {
        date.format("%b %-d, %Y").to_string()
    }
}

/// Convert a 24-hour time to `H:MM AM/PM`. Hour 0 renders as 12 AM and
/// hour 12 as 12 PM.
pub fn format_time(time: NaiveTime) -> String {
    let hour = time.hour();
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hour, time.minute(), meridiem)
}

/// Title and subtitle shown when the projection is empty, keyed by filter.
pub fn empty_state(filter: Filter) -> (&'static str, &'static str) {
    match filter {
        Filter::Active => ("All caught up!", "No active tasks remaining."),
        Filter::Completed => ("No completed tasks", "Complete some tasks to see them here."),
        Filter::All => ("No tasks yet", "Add your first task to get started!"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_due_date, parse_due_time, Priority};

    fn task_due(date: &str, time: Option<&str>) -> Task {
        Task::new(
            1,
            "dated".to_string(),
            Priority::Medium,
            parse_due_date(date),
            time.and_then(parse_due_time),
        )
    }

    fn at(date: &str, time: &str) -> NaiveDateTime {
        parse_due_date(date)
            .unwrap()
            .and_time(parse_due_time(time).unwrap())
    }

    #[test]
    fn test_no_due_date_has_no_status() {
        let task = Task::new(1, "free".to_string(), Priority::Medium, None, None);
        assert_eq!(due_status(&task, at("2026-08-30", "12:00")), None);
    }

    #[test]
    fn test_yesterday_without_time_is_overdue() {
        let task = task_due("2026-08-29", None);
        assert_eq!(
            due_status(&task, at("2026-08-30", "12:00")),
            Some(DueStatus::Overdue)
        );
    }

    #[test]
    fn test_today_without_time_is_due_soon_until_end_of_day() {
        let task = task_due("2026-08-30", None);
        assert_eq!(
            due_status(&task, at("2026-08-30", "12:00")),
            Some(DueStatus::DueSoon)
        );
        assert_eq!(
            due_status(&task, at("2026-08-31", "00:00")),
            Some(DueStatus::Overdue)
        );
    }

    #[test]
    fn test_explicit_time_beats_end_of_day_default() {
        let task = task_due("2026-08-30", Some("09:00"));
        assert_eq!(
            due_status(&task, at("2026-08-30", "10:00")),
            Some(DueStatus::Overdue)
        );
    }

    #[test]
    fn test_due_soon_window_is_24_hours_inclusive() {
        let task = task_due("2026-08-31", Some("12:00"));
        assert_eq!(
            due_status(&task, at("2026-08-30", "12:00")),
            Some(DueStatus::DueSoon)
        );
        assert_eq!(
            due_status(&task, at("2026-08-30", "11:59")),
            Some(DueStatus::Normal)
        );
        // A deadline landing exactly on `now` is still due-soon, not overdue.
        assert_eq!(
            due_status(&task, at("2026-08-31", "12:00")),
            Some(DueStatus::DueSoon)
        );
    }

    #[test]
    fn test_format_date_today_and_tomorrow() {
        let today = parse_due_date("2026-08-30").unwrap();
        assert_eq!(format_date(today, today), "Today");
        assert_eq!(
            format_date(parse_due_date("2026-08-31").unwrap(), today),
            "Tomorrow"
        );
    }

    #[test]
    fn test_format_date_same_year_omits_year() {
        let today = parse_due_date("2026-08-30").unwrap();
        assert_eq!(
            format_date(parse_due_date("2026-09-09").unwrap(), today),
            "Sep 9"
        );
    }

    #[test]
    fn test_format_date_other_year_includes_year() {
        let today = parse_due_date("2026-12-30").unwrap();
        assert_eq!(
            format_date(parse_due_date("2027-01-05").unwrap(), today),
            "Jan 5, 2027"
        );
    }

    #[test]
    fn test_format_time_edges() {
        assert_eq!(format_time(parse_due_time("00:05").unwrap()), "12:05 AM");
        assert_eq!(format_time(parse_due_time("12:00").unwrap()), "12:00 PM");
        assert_eq!(format_time(parse_due_time("15:30").unwrap()), "3:30 PM");
        assert_eq!(format_time(parse_due_time("11:59").unwrap()), "11:59 AM");
    }

    #[test]
    fn test_empty_state_messages() {
        assert_eq!(
            empty_state(Filter::Active),
            ("All caught up!", "No active tasks remaining.")
        );
        assert_eq!(
            empty_state(Filter::Completed),
            ("No completed tasks", "Complete some tasks to see them here.")
        );
        assert_eq!(
            empty_state(Filter::All),
            ("No tasks yet", "Add your first task to get started!")
        );
    }
}
