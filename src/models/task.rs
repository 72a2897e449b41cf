use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::Priority;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// A single to-do item.
///
/// `due_time` is only meaningful when `due_date` is set; consumers ignore a
/// dangling time. `created_at` is fixed at creation and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,

    pub text: String,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default, with = "date_serde")]
    pub due_date: Option<NaiveDate>,

    #[serde(default, with = "time_serde")]
    pub due_time: Option<NaiveTime>,

    pub created_at: i64,
}

impl Task {
    /// Creates a new task, stamping the current wall clock as `created_at`.
    pub fn new(
        id: u64,
        text: String,
        priority: Priority,
        due_date: Option<NaiveDate>,
        due_time: Option<NaiveTime>,
    ) -> Self {
        Self {
            id,
            text,
            completed: false,
            priority,
            due_date,
            due_time,
            created_at: chrono::Local::now().timestamp_millis(),
        }
    }
}

/// Parse a `YYYY-MM-DD` due date. Anything unparsable counts as no due date.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Parse a 24-hour `HH:MM` due time. Anything unparsable counts as no time.
pub fn parse_due_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), TIME_FORMAT).ok()
}

/// Serialize due dates as `YYYY-MM-DD` strings; malformed persisted values
/// deserialize to `None` so a bad date never fails the whole load.
mod date_serde {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_some(&d.format(super::DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(super::parse_due_date))
    }
}

/// Same treatment for `HH:MM` due times.
mod time_serde {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => serializer.serialize_some(&t.format(super::TIME_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(super::parse_due_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new(1, "Test".to_string(), Priority::Medium, None, None);
        assert_eq!(task.id, 1);
        assert!(!task.completed);
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.due_date.is_none());
        assert!(task.created_at > 0);
    }

    #[test]
    fn test_parse_due_date() {
        assert_eq!(
            parse_due_date("2026-09-01"),
            NaiveDate::from_ymd_opt(2026, 9, 1)
        );
        assert_eq!(parse_due_date(" 2026-09-01 "), parse_due_date("2026-09-01"));
        assert_eq!(parse_due_date("not-a-date"), None);
        assert_eq!(parse_due_date(""), None);
    }

    #[test]
    fn test_parse_due_time() {
        assert_eq!(parse_due_time("09:30"), NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(parse_due_time("25:00"), None);
        assert_eq!(parse_due_time(""), None);
    }

    #[test]
    fn test_serde_round_trip() {
        let task = Task::new(
            7,
            "File taxes".to_string(),
            Priority::High,
            parse_due_date("2026-04-15"),
            parse_due_time("17:00"),
        );
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, task.id);
        assert_eq!(back.text, task.text);
        assert_eq!(back.completed, task.completed);
        assert_eq!(back.priority, task.priority);
        assert_eq!(back.due_date, task.due_date);
        assert_eq!(back.due_time, task.due_time);
        assert_eq!(back.created_at, task.created_at);
    }

    #[test]
    fn test_malformed_due_date_degrades_to_none() {
        let json = r#"{
            "id": 1,
            "text": "Old entry",
            "completed": false,
            "priority": "low",
            "dueDate": "soonish",
            "dueTime": "99:99",
            "createdAt": 1000
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.due_date, None);
        assert_eq!(task.due_time, None);
    }

    #[test]
    fn test_camel_case_field_names() {
        let task = Task::new(1, "Test".to_string(), Priority::Low, None, None);
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"dueDate\""));
        assert!(json.contains("\"priority\":\"low\""));
    }
}
