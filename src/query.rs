use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};
use clap::ValueEnum;

use crate::models::Task;

/// Completion filter for the visible projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        };
        write!(f, "{}", name)
    }
}

/// Sort order for the visible projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum SortKey {
    #[default]
    DateAdded,
    DueDate,
    Priority,
    Alphabetical,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::DateAdded => "date-added",
            SortKey::DueDate => "due-date",
            SortKey::Priority => "priority",
            SortKey::Alphabetical => "alphabetical",
        };
        write!(f, "{}", name)
    }
}

/// Whole-store counters, independent of the current filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

pub fn stats(tasks: &[Task]) -> Stats {
    let total = tasks.len();
    let active = tasks.iter().filter(|t| !t.completed).count();
    Stats {
        total,
        active,
        completed: total - active,
    }
}

/// Compute the filtered, sorted, search-narrowed view of the store.
///
/// Filter and search combine conjunctively; the search term matches
/// case-insensitively against the task text. The input is never mutated, so
/// repeated projections with the same arguments are identical.
pub fn project<'a>(tasks: &'a [Task], filter: Filter, sort: SortKey, search: &str) -> Vec<&'a Task> {
    let term = search.trim().to_lowercase();
    let mut visible: Vec<&Task> = tasks
        .iter()
        .filter(|t| filter.matches(t))
        .filter(|t| term.is_empty() || t.text.to_lowercase().contains(&term))
        .collect();
    sort_tasks(&mut visible, sort);
    visible
}

fn sort_tasks(tasks: &mut [&Task], sort: SortKey) {
    match sort {
        // Most recently created first.
        SortKey::DateAdded => tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        // Earliest deadline first; undated tasks keep their relative order
        // at the back.
        SortKey::DueDate => tasks.sort_by(|a, b| match (sort_deadline(a), sort_deadline(b)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => x.cmp(&y),
        }),
        SortKey::Priority => tasks.sort_by(|a, b| b.priority.weight().cmp(&a.priority.weight())),
        SortKey::Alphabetical => {
            tasks.sort_by(|a, b| a.text.to_lowercase().cmp(&b.text.to_lowercase()))
        }
    }
}

/// Composite sort deadline. A missing due time counts as the start of the
/// day here; the status classifier in `view` deliberately uses the end of
/// the day instead.
fn sort_deadline(task: &Task) -> Option<NaiveDateTime> {
    task.due_date
        .map(|d| d.and_time(task.due_time.unwrap_or(NaiveTime::MIN)))
}
