//! TOML-based application configuration.
//!
//! Notification preferences only - interval lengths are fixed and have no
//! configuration surface.
//!
//! Stored at `<data_dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, Result};

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Master switch for the chime and desktop notification.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Chime gain percentage, 0-100.
    #[serde(default = "default_volume")]
    pub volume: u32,
    /// Drive the terminal title: countdown while running, flashing on
    /// completion.
    #[serde(default = "default_true")]
    pub title_flash: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

fn default_true() -> bool {
    true
}

fn default_volume() -> u32 {
    50
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 50,
            title_flash: true,
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, or write out and return the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg = toml::from_str(&content).map_err(|err| ConfigError::LoadFailed {
                    path,
                    message: err.to_string(),
                })?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|err| ConfigError::SaveFailed {
            path: path.clone(),
            message: err.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|err| ConfigError::SaveFailed {
            path,
            message: err.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "notifications.enabled" => Some(self.notifications.enabled.to_string()),
            "notifications.volume" => Some(self.notifications.volume.to_string()),
            "notifications.title_flash" => Some(self.notifications.title_flash.to_string()),
            _ => None,
        }
    }

    /// Set a config value by key and persist. Unknown keys and unparsable
    /// values are rejected.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Apply a key/value pair without touching disk.
    fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "notifications.enabled" => {
                self.notifications.enabled = parse_value(key, value)?;
            }
            "notifications.volume" => {
                let volume: u32 = parse_value(key, value)?;
                if volume > 100 {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: "expected a percentage in 0-100".to_string(),
                    }
                    .into());
                }
                self.notifications.volume = volume;
            }
            "notifications.title_flash" => {
                self.notifications.title_flash = parse_value(key, value)?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string()).into()),
        }
        Ok(())
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|err: T::Err| {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: err.to_string(),
        }
        .into()
    })
}
