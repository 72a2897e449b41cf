use std::env;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Result, TodoError};

const DATA_DIR_NAME: &str = ".todolite";
const DATA_DIR_ENV: &str = "TODOLITE_DIR";

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .ok_or_else(|| TodoError::InvalidDirectory("could not find home directory".to_string()))
}

/// Resolve the data directory with priority:
/// 1. --todolite-dir CLI flag (highest)
/// 2. TODOLITE_DIR environment variable
/// 3. Config file todoliteDirectory
/// 4. Default ~/.todolite/ (lowest)
pub fn resolve_data_directory(cli_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(custom) = select_candidate(cli_dir)? {
        return resolve_custom(&custom);
    }

    let home = home_dir()?;
    Ok(home.join(DATA_DIR_NAME))
}

fn select_candidate(cli_dir: Option<&Path>) -> Result<Option<String>> {
    if let Some(dir) = cli_dir {
        let raw = dir.to_string_lossy().to_string();
        if raw.trim().is_empty() {
            return Err(TodoError::MissingDataDirValue);
        }
        return Ok(Some(raw));
    }

    if let Ok(env_dir) = env::var(DATA_DIR_ENV) {
        if !env_dir.trim().is_empty() {
            return Ok(Some(env_dir));
        }
    }

    if let Ok(config) = Config::load() {
        let config_dir = config.todolite_directory;
        let home = home_dir()?.to_string_lossy().to_string();
        if config_dir != home && config_dir != "~" {
            return Ok(Some(config_dir));
        }
    }

    Ok(None)
}

fn resolve_custom(candidate: &str) -> Result<PathBuf> {
    let expanded = expand_directory(candidate);
    let resolved = PathBuf::from(&expanded)
        .canonicalize()
        .unwrap_or_else(|_| PathBuf::from(&expanded));

    // A path already ending in .todolite only needs an existing parent.
    if resolved
        .file_name()
        .map(|name| name == DATA_DIR_NAME)
        .unwrap_or(false)
    {
        let parent = resolved.parent().ok_or_else(|| {
            TodoError::InvalidDirectory(format!("{candidate}: path has no parent"))
        })?;
        if !parent.exists() {
            return Err(TodoError::InvalidDirectory(candidate.to_string()));
        }
        return Ok(resolved);
    }

    if !resolved.exists() {
        return Err(TodoError::InvalidDirectory(candidate.to_string()));
    }
    Ok(resolved.join(DATA_DIR_NAME))
}

fn expand_directory(directory: &str) -> String {
    if directory.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            let rest = directory.trim_start_matches('~');
            return format!("{}{}", home.to_string_lossy(), rest);
        }
    }
    directory.to_string()
}
