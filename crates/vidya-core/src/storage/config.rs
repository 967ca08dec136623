//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Timer session lengths (work / short break / long break)
//! - Scheduler daily budget and day start
//!
//! Configuration is stored at `~/.config/vidya/config.toml`.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;
use crate::timer::TimerSettings;

/// Timer-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
}

/// Scheduler-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerSettings {
    /// Default daily study budget in hours.
    #[serde(default = "default_max_daily_hours")]
    pub max_daily_hours: f64,
    /// Time-of-day the first block starts, HH:mm.
    #[serde(default = "default_day_start")]
    pub day_start: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/vidya/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub scheduler: SchedulerSettings,
}

// Default functions
fn default_work_minutes() -> u32 {
    25
}
fn default_short_break_minutes() -> u32 {
    5
}
fn default_long_break_minutes() -> u32 {
    15
}
fn default_max_daily_hours() -> f64 {
    4.0
}
fn default_day_start() -> String {
    "09:00".into()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
        }
    }
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            max_daily_hours: default_max_daily_hours(),
            day_start: default_day_start(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/vidya"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing defaults when no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Timer settings derived from the `[timer]` section.
    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            work_minutes: self.timer.work_minutes,
            short_break_minutes: self.timer.short_break_minutes,
            long_break_minutes: self.timer.long_break_minutes,
        }
    }

    /// Parsed day start; `None` when the configured string is malformed.
    pub fn day_start(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(&self.scheduler.day_start, "%H:%M").ok()
    }

    /// Set a config value by dotted key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value fails to parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        match key {
            "timer.work_minutes" => {
                self.timer.work_minutes = value.parse().map_err(|_| invalid("expected a positive integer".into()))?
            }
            "timer.short_break_minutes" => {
                self.timer.short_break_minutes =
                    value.parse().map_err(|_| invalid("expected a positive integer".into()))?
            }
            "timer.long_break_minutes" => {
                self.timer.long_break_minutes =
                    value.parse().map_err(|_| invalid("expected a positive integer".into()))?
            }
            "scheduler.max_daily_hours" => {
                self.scheduler.max_daily_hours =
                    value.parse().map_err(|_| invalid("expected a number of hours".into()))?
            }
            "scheduler.day_start" => {
                NaiveTime::parse_from_str(value, "%H:%M")
                    .map_err(|_| invalid("expected HH:MM".into()))?;
                self.scheduler.day_start = value.to_string();
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timer.work_minutes, 25);
        assert_eq!(parsed.scheduler.max_daily_hours, 4.0);
        assert_eq!(parsed.scheduler.day_start, "09:00");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("[timer]\nwork_minutes = 50\n").unwrap();
        assert_eq!(parsed.timer.work_minutes, 50);
        assert_eq!(parsed.timer.short_break_minutes, 5);
        assert_eq!(parsed.scheduler.max_daily_hours, 4.0);
    }

    #[test]
    fn set_known_keys() {
        let mut cfg = Config::default();
        cfg.set("timer.work_minutes", "45").unwrap();
        cfg.set("scheduler.day_start", "08:30").unwrap();
        assert_eq!(cfg.timer.work_minutes, 45);
        assert_eq!(cfg.day_start(), NaiveTime::from_hms_opt(8, 30, 0));
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_values() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("timer.volume", "5"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(cfg.set("timer.work_minutes", "soon").is_err());
        assert!(cfg.set("scheduler.day_start", "9am").is_err());
    }

    #[test]
    fn timer_settings_mirror_the_timer_section() {
        let mut cfg = Config::default();
        cfg.timer.work_minutes = 50;
        let settings = cfg.timer_settings();
        assert_eq!(settings.work_minutes, 50);
        assert_eq!(settings.short_break_minutes, 5);
    }
}
