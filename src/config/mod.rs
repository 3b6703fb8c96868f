use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::calendar::SystemCalendar;

const DEFAULT_DIR_NAME: &str = "select_foods";
const HOME_ENV: &str = "SELECT_FOODS_HOME";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),
}

/// Stores user-configurable planner preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Number of days in the window opened at startup, starting today.
    #[serde(default = "Config::default_window_days")]
    pub window_days: u32,
    /// Minutes east of UTC used to decide which calendar day "today" is.
    #[serde(default)]
    pub utc_offset_minutes: i32,
    /// Seed a fresh menu catalog with the bundled sample menus.
    #[serde(default = "Config::default_seed_sample_menus")]
    pub seed_sample_menus: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_days: Self::default_window_days(),
            utc_offset_minutes: 0,
            seed_sample_menus: Self::default_seed_sample_menus(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn default_window_days() -> u32 {
        7
    }

    pub fn default_seed_sample_menus() -> bool {
        true
    }

    /// Window length clamped to at least one day.
    pub fn effective_window_days(&self) -> u32 {
        self.window_days.max(1)
    }

    pub fn calendar(&self) -> SystemCalendar {
        SystemCalendar::from_offset_minutes(self.utc_offset_minutes)
    }

    /// Resolves the data directory: `SELECT_FOODS_HOME`, then `data_dir`,
    /// then the platform data directory.
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        if let Some(path) = &self.data_dir {
            return path.clone();
        }
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }
}

/// Handles persistence for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&base)?;
        Ok(Self::new(base.join(CONFIG_FILE)))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.config_path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.config_path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn window_days_never_below_one() {
        let config = Config {
            window_days: 0,
            ..Config::default()
        };
        assert_eq!(config.effective_window_days(), 1);
    }

    #[test]
    fn configured_data_dir_is_used() {
        if env::var_os(HOME_ENV).is_some() {
            return;
        }
        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/select-foods-test")),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_data_dir(),
            PathBuf::from("/tmp/select-foods-test")
        );
    }
}
