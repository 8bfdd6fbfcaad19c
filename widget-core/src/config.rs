use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::model::Coordinates;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;

/// Coordinates used when location acquisition fails.
pub const DEFAULT_FALLBACK: Coordinates = Coordinates { latitude: 28.67, longitude: 77.22 };

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// base_url = "https://api.openweathermap.org/data/2.5/"
/// api_key = "..."
/// poll_interval_secs = 600
///
/// [fallback]
/// latitude = 28.67
/// longitude = 77.22
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Weather endpoint base URL, trailing slash included.
    pub base_url: String,

    /// OpenWeatherMap API key; unset until `configure` has run.
    pub api_key: Option<String>,

    /// Refresh period for the widget, in seconds.
    pub poll_interval_secs: u64,

    /// Coordinates substituted when location acquisition fails.
    pub fallback: Coordinates,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            fallback: DEFAULT_FALLBACK,
        }
    }
}

impl Config {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-widget", "weather-widget")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
