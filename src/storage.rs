use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::Result;
use crate::models::Task;
use crate::theme::Theme;

/// Persistence boundary for the task collection and the theme preference.
///
/// Both must tolerate absence (first run) and round-trip every task field
/// exactly. Saves always overwrite the full collection.
pub trait Persistence {
    fn load(&self) -> Result<Vec<Task>>;
    fn save(&self, tasks: &[Task]) -> Result<()>;
    fn load_theme(&self) -> Result<Theme>;
    fn save_theme(&self, theme: Theme) -> Result<()>;
}

/// Local file-based storage with atomic writes
pub struct LocalStorage {
    main_app_dir: PathBuf,
    storage_dir: PathBuf,
    temp_dir: PathBuf,
    tasks_file: PathBuf,
    theme_file: PathBuf,
}

impl LocalStorage {
    pub fn new(data_dir: &Path) -> Result<Self> {
        let main_app_dir = data_dir.to_path_buf();
        let storage_dir = main_app_dir.join("storage");
        let temp_dir = main_app_dir.join(".temp");
        let tasks_file = storage_dir.join("tasks.json");
        let theme_file = storage_dir.join("theme.json");

        let storage = Self {
            main_app_dir,
            storage_dir,
            temp_dir,
            tasks_file,
            theme_file,
        };

        storage.ensure_directories()?;

        Ok(storage)
    }

    fn ensure_directories(&self) -> Result<()> {
        if !self.main_app_dir.exists() {
            fs::create_dir_all(&self.main_app_dir)?;
        }
        if !self.storage_dir.exists() {
            fs::create_dir(&self.storage_dir)?;
        }
        if !self.temp_dir.exists() {
            fs::create_dir(&self.temp_dir)?;
        }

        self.clean_temp_dir()?;

        Ok(())
    }

    fn clean_temp_dir(&self) -> Result<()> {
        if self.temp_dir.exists() {
            for entry in fs::read_dir(&self.temp_dir)? {
                let entry = entry?;
                fs::remove_file(entry.path())?;
            }
        }
        Ok(())
    }

    fn get_temp_file(&self, target_file: &Path) -> PathBuf {
        let random_string = Uuid::new_v4().to_string()[..8].to_string();
        let filename = target_file
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let temp_filename = filename.replace(".json", &format!(".TEMP-{}.json", random_string));
        self.temp_dir.join(temp_filename)
    }

    fn write_atomic(&self, target: &Path, json: &str) -> Result<()> {
        let temp_file = self.get_temp_file(target);
        fs::write(&temp_file, json)?;
        fs::rename(&temp_file, target)?;
        Ok(())
    }
}

impl Persistence for LocalStorage {
    fn load(&self) -> Result<Vec<Task>> {
        if !self.tasks_file.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.tasks_file)?;
        // A task file that fails to parse falls back to the empty store
        // rather than failing startup.
        Ok(serde_json::from_str(&content).unwrap_or_default())
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string_pretty(tasks)?;
        self.write_atomic(&self.tasks_file, &json)
    }

    fn load_theme(&self) -> Result<Theme> {
        if !self.theme_file.exists() {
            return Ok(Theme::default());
        }

        let content = fs::read_to_string(&self.theme_file)?;
        Ok(serde_json::from_str(&content).unwrap_or_default())
    }

    fn save_theme(&self, theme: Theme) -> Result<()> {
        let json = serde_json::to_string(&theme)?;
        self.write_atomic(&self.theme_file, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_due_date, parse_due_time, Priority};

    fn temp_data_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("todolite-tests")
            .join(format!("{}-{}", name, Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_first_run_loads_empty_and_light() {
        let dir = temp_data_dir("first-run");
        let storage = LocalStorage::new(&dir).unwrap();
        assert!(storage.load().unwrap().is_empty());
        assert_eq!(storage.load_theme().unwrap(), Theme::Light);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_tasks_round_trip() {
        let dir = temp_data_dir("round-trip");
        let storage = LocalStorage::new(&dir).unwrap();

        let tasks = vec![
            Task::new(
                2,
                "File taxes".to_string(),
                Priority::High,
                parse_due_date("2026-04-15"),
                parse_due_time("17:00"),
            ),
            Task::new(1, "Buy milk".to_string(), Priority::Medium, None, None),
        ];
        storage.save(&tasks).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, 2);
        assert_eq!(loaded[0].text, "File taxes");
        assert_eq!(loaded[0].due_date, parse_due_date("2026-04-15"));
        assert_eq!(loaded[0].due_time, parse_due_time("17:00"));
        assert_eq!(loaded[1].due_date, None);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_malformed_task_file_falls_back_to_empty() {
        let dir = temp_data_dir("malformed");
        let storage = LocalStorage::new(&dir).unwrap();
        fs::write(dir.join("storage").join("tasks.json"), "{not json").unwrap();
        assert!(storage.load().unwrap().is_empty());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_theme_round_trip() {
        let dir = temp_data_dir("theme");
        let storage = LocalStorage::new(&dir).unwrap();
        storage.save_theme(Theme::Dark).unwrap();
        assert_eq!(storage.load_theme().unwrap(), Theme::Dark);
        fs::remove_dir_all(&dir).ok();
    }
}
