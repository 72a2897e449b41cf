use std::collections::HashSet;
use std::path::Path;

use chrono::{Local, NaiveDate, NaiveTime};

use crate::config::Config;
use crate::directory::resolve_data_directory;
use crate::error::{Result, TodoError};
use crate::models::{parse_due_date, parse_due_time, Priority};
use crate::query::{self, Filter, SortKey};
use crate::render::Render;
use crate::storage::{LocalStorage, Persistence};
use crate::store::{TaskStore, TaskUpdate};

/// Top-level application context: owns the store, the persistence backend
/// and the renderer. The store is loaded once at startup and written back
/// in full after every successful mutation.
pub struct TodoApp {
    store: TaskStore,
    storage: Box<dyn Persistence>,
    render: Render,
}

impl TodoApp {
    pub fn new(data_dir: Option<&Path>) -> Result<Self> {
        let config = Config::load().unwrap_or_default();
        let render = Render::new(config);

        let resolved_dir = match resolve_data_directory(data_dir) {
            Ok(dir) => dir,
            Err(TodoError::InvalidDirectory(path)) => {
                render.invalid_custom_app_dir(&path);
                return Err(TodoError::InvalidDirectory(path));
            }
            Err(e) => return Err(e),
        };

        let storage: Box<dyn Persistence> = Box::new(LocalStorage::new(&resolved_dir)?);
        let store = TaskStore::new(storage.load()?);

        Ok(Self {
            store,
            storage,
            render,
        })
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(self.store.tasks())
    }

    /// Unparsable due dates degrade to "no due date" with a warning.
    fn parse_due(&self, raw: &str) -> Option<NaiveDate> {
        let parsed = parse_due_date(raw);
        if parsed.is_none() {
            self.render.invalid_due_date(raw);
        }
        parsed
    }

    fn parse_time(&self, raw: &str) -> Option<NaiveTime> {
        let parsed = parse_due_time(raw);
        if parsed.is_none() {
            self.render.invalid_due_time(raw);
        }
        parsed
    }

    fn remove_duplicates(ids: &[u64]) -> Vec<u64> {
        let mut seen = HashSet::with_capacity(ids.len());
        ids.iter().filter(|id| seen.insert(**id)).copied().collect()
    }

    pub fn add_task(
        &mut self,
        input: &[String],
        priority: Priority,
        due: Option<&str>,
        time: Option<&str>,
    ) -> Result<()> {
        let text = input.join(" ");
        let due_date = due.and_then(|raw| self.parse_due(raw));
        let due_time = time.and_then(|raw| self.parse_time(raw));

        match self.store.create(&text, priority, due_date, due_time) {
            Ok(task) => {
                let id = task.id;
                self.persist()?;
                self.render.success_create(id);
                Ok(())
            }
            Err(TodoError::EmptyText) => {
                self.render.missing_text();
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Edit a task addressed as `@<id>`; the remaining words become the new
    /// text. Priority and due fields are replaced only when their flags are
    /// present.
    pub fn edit_task(
        &mut self,
        input: &[String],
        priority: Option<Priority>,
        due: Option<&str>,
        time: Option<&str>,
    ) -> Result<()> {
        let targets: Vec<&String> = input.iter().filter(|x| x.starts_with('@')).collect();

        if targets.is_empty() {
            self.render.missing_id();
            return Ok(());
        }

        if targets.len() > 1 {
            self.render.invalid_ids_number();
            return Ok(());
        }

        let target = targets[0];
        let id: u64 = match target.trim_start_matches('@').parse() {
            Ok(id) => id,
            Err(_) => {
                self.render.missing_id();
                return Ok(());
            }
        };

        let text: String = input
            .iter()
            .filter(|x| *x != target)
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");

        let update = TaskUpdate {
            text: if text.trim().is_empty() { None } else { Some(text) },
            priority,
            due_date: due.map(|raw| self.parse_due(raw)),
            due_time: time.map(|raw| self.parse_time(raw)),
        };

        if update.is_empty() {
            self.render.missing_text();
            return Ok(());
        }

        match self.store.update(id, update) {
            Ok(_) => {
                self.persist()?;
                self.render.success_edit(id);
                Ok(())
            }
            Err(TodoError::NotFound(id)) => {
                self.render.invalid_id(id);
                Ok(())
            }
            Err(TodoError::EmptyText) => {
                self.render.missing_text();
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Toggle completion for each id. Stale ids are reported and skipped;
    /// the survivors still go through in one persistence write.
    pub fn toggle_tasks(&mut self, ids: &[u64]) -> Result<()> {
        if ids.is_empty() {
            self.render.missing_id();
            return Ok(());
        }

        let mut checked = Vec::new();
        let mut unchecked = Vec::new();

        for id in Self::remove_duplicates(ids) {
            match self.store.toggle_completed(id) {
                Ok(task) => {
                    if task.completed {
                        checked.push(id);
                    } else {
                        unchecked.push(id);
                    }
                }
                Err(TodoError::NotFound(_)) => self.render.invalid_id(id),
                Err(e) => return Err(e),
            }
        }

        if !checked.is_empty() || !unchecked.is_empty() {
            self.persist()?;
        }
        self.render.success_toggle(&checked, &unchecked);
        Ok(())
    }

    pub fn delete_tasks(&mut self, ids: &[u64]) -> Result<()> {
        if ids.is_empty() {
            self.render.missing_id();
            return Ok(());
        }

        let mut deleted = Vec::new();

        for id in Self::remove_duplicates(ids) {
            match self.store.delete(id) {
                Ok(_) => deleted.push(id),
                Err(TodoError::NotFound(_)) => self.render.invalid_id(id),
                Err(e) => return Err(e),
            }
        }

        if !deleted.is_empty() {
            self.persist()?;
        }
        self.render.success_delete(&deleted);
        Ok(())
    }

    /// Remove all completed tasks in a single persistence write.
    pub fn clear_completed(&mut self) -> Result<()> {
        let count = self.store.clear_completed();
        if count > 0 {
            self.persist()?;
        }
        self.render.success_clear(count);
        Ok(())
    }

    /// Render the projection for the given view state plus the whole-store
    /// counters.
    pub fn display(&self, filter: Filter, sort: SortKey, search: &str) -> Result<()> {
        let projection = query::project(self.store.tasks(), filter, sort, search);
        let stats = query::stats(self.store.tasks());
        let now = Local::now().naive_local();

        self.render.display_tasks(&projection, filter, &stats, now);
        self.render.display_stats(&stats);
        Ok(())
    }

    pub fn toggle_theme(&self) -> Result<()> {
        let theme = self.storage.load_theme()?.toggle();
        self.storage.save_theme(theme)?;
        self.render.success_theme(theme);
        Ok(())
    }
}
