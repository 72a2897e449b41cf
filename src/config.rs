use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::Result;

/// Configuration settings for todolite
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_todolite_directory")]
    pub todolite_directory: String,

    #[serde(default = "default_true")]
    pub display_stats: bool,
}

fn default_todolite_directory() -> String {
    "~".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            todolite_directory: default_todolite_directory(),
            display_stats: true,
        }
    }
}

impl Config {
    /// Get the config file path (~/.todolite.json)
    fn config_file_path() -> PathBuf {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".todolite.json")
    }

    /// Ensure the config file exists, creating it with defaults if not
    fn ensure_config_file() -> Result<()> {
        let config_path = Self::config_file_path();
        if !config_path.exists() {
            let default_config = Config::default();
            let data = serde_json::to_string_pretty(&default_config)?;
            fs::write(&config_path, data)?;
        }
        Ok(())
    }

    /// Load configuration from file, merging with defaults
    pub fn load() -> Result<Self> {
        Self::ensure_config_file()?;

        let config_path = Self::config_file_path();
        let content = fs::read_to_string(&config_path)?;
        let config: Config = serde_json::from_str(&content)?;

        Ok(config)
    }
}
