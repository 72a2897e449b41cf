use chrono::{NaiveDate, NaiveTime};

use crate::error::{Result, TodoError};
use crate::models::{Priority, Task};

/// Field replacements for an existing task.
///
/// Outer `None` leaves a field unchanged; the nested options on the due
/// fields let an edit clear a deadline entirely.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub text: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<NaiveDate>>,
    pub due_time: Option<Option<NaiveTime>>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.due_time.is_none()
    }
}

/// The authoritative ordered task collection. New tasks are prepended, so
/// insertion order is newest-first. Persistence is the owner's concern;
/// every operation here is a pure in-memory mutation.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn next_id(&self) -> u64 {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Create a task and prepend it. Rejects text that trims to empty,
    /// leaving the store untouched.
    pub fn create(
        &mut self,
        text: &str,
        priority: Priority,
        due_date: Option<NaiveDate>,
        due_time: Option<NaiveTime>,
    ) -> Result<&Task> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TodoError::EmptyText);
        }

        let task = Task::new(self.next_id(), text.to_string(), priority, due_date, due_time);
        self.tasks.insert(0, task);
        Ok(&self.tasks[0])
    }

    /// Apply an update in place, preserving id, completion and `created_at`.
    /// Validation happens before any field is touched, so a rejected update
    /// leaves the task exactly as it was.
    pub fn update(&mut self, id: u64, update: TaskUpdate) -> Result<&Task> {
        let pos = self.position(id).ok_or(TodoError::NotFound(id))?;

        let text = match update.text {
            Some(t) => {
                let trimmed = t.trim();
                if trimmed.is_empty() {
                    return Err(TodoError::EmptyText);
                }
                Some(trimmed.to_string())
            }
            None => None,
        };

        let task = &mut self.tasks[pos];
        if let Some(t) = text {
            task.text = t;
        }
        if let Some(p) = update.priority {
            task.priority = p;
        }
        if let Some(d) = update.due_date {
            task.due_date = d;
        }
        if let Some(t) = update.due_time {
            task.due_time = t;
        }

        Ok(&self.tasks[pos])
    }

    pub fn toggle_completed(&mut self, id: u64) -> Result<&Task> {
        let pos = self.position(id).ok_or(TodoError::NotFound(id))?;
        self.tasks[pos].completed = !self.tasks[pos].completed;
        Ok(&self.tasks[pos])
    }

    pub fn delete(&mut self, id: u64) -> Result<Task> {
        let pos = self.position(id).ok_or(TodoError::NotFound(id))?;
        Ok(self.tasks.remove(pos))
    }

    /// Remove every completed task in one pass, preserving the relative
    /// order of the survivors. Returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        before - self.tasks.len()
    }
}
