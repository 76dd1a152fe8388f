//! TOML-based application configuration.
//!
//! Stores user preferences for the derived views:
//! - Trend window length and date rendering
//! - Number of moods in the frequency ranking
//! - Battery band thresholds
//!
//! Configuration is stored at `~/.config/socialbattery/config.toml`.

use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::ranking::DEFAULT_RANK_LIMIT;
use crate::taxonomy::BandThresholds;
use crate::trend::{DateFormat, DEFAULT_DATE_PATTERN, DEFAULT_WINDOW_DAYS};
use crate::tracker::TrackerSettings;

const CONFIG_FILE: &str = "config.toml";

/// Longest trend window the config accepts, roughly a century.
pub const MAX_WINDOW_DAYS: i64 = 36_500;

/// Returns the configuration directory, creating it if needed.
///
/// `SOCIALBATTERY_HOME` overrides the location entirely. Otherwise this is
/// `~/.config/socialbattery[-dev]/`, with the `-dev` suffix selected by
/// `SOCIALBATTERY_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("SOCIALBATTERY_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("SOCIALBATTERY_ENV").unwrap_or_default();
            if env == "dev" {
                base_dir.join("socialbattery-dev")
            } else {
                base_dir.join("socialbattery")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Trend view configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendConfig {
    #[serde(default = "default_window_days")]
    pub window_days: i64,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub timezone_offset_hours: i32,
}

/// Ranking view configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_rank_limit")]
    pub limit: usize,
}

/// Battery band thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryConfig {
    #[serde(default = "default_high_threshold")]
    pub high_threshold: i32,
    #[serde(default = "default_low_threshold")]
    pub low_threshold: i32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/socialbattery/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub trend: TrendConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub battery: BatteryConfig,
}

fn default_window_days() -> i64 {
    DEFAULT_WINDOW_DAYS
}
fn default_date_format() -> String {
    DEFAULT_DATE_PATTERN.into()
}
fn default_rank_limit() -> usize {
    DEFAULT_RANK_LIMIT
}
fn default_high_threshold() -> i32 {
    BandThresholds::default().high
}
fn default_low_threshold() -> i32 {
    BandThresholds::default().low
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            date_format: default_date_format(),
            timezone_offset_hours: 0,
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            limit: default_rank_limit(),
        }
    }
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            high_threshold: default_high_threshold(),
            low_threshold: default_low_threshold(),
        }
    }
}

impl Config {
    fn lookup<'a>(root: &'a serde_json::Value, key: &str) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }
        key.split('.').try_fold(root, |current, part| current.get(part))
    }

    fn assign(root: &mut serde_json::Value, key: &str, value: &str) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let parent = match parent_path {
            Some(path) => path
                .split('.')
                .try_fold(&mut *root, |current, part| current.get_mut(part))
                .ok_or_else(unknown)?,
            None => root,
        };
        let slot = parent
            .as_object_mut()
            .and_then(|obj| obj.get_mut(leaf))
            .ok_or_else(unknown)?;

        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let new_value = match &*slot {
            serde_json::Value::Number(_) => value
                .trim()
                .parse::<i64>()
                .map(|n| serde_json::Value::Number(n.into()))
                .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?,
            serde_json::Value::Bool(_) => value
                .trim()
                .parse::<bool>()
                .map(serde_json::Value::Bool)
                .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
            serde_json::Value::Object(_) => {
                return Err(invalid("cannot assign a whole section".into()));
            }
            _ => serde_json::Value::String(value.into()),
        };
        *slot = new_value;
        Ok(())
    }

    /// Reject combinations the derived views cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_WINDOW_DAYS).contains(&self.trend.window_days) {
            return Err(ConfigError::InvalidValue {
                key: "trend.window_days".into(),
                message: format!("must be between 1 and {MAX_WINDOW_DAYS}"),
            });
        }
        if !DateFormat::is_valid_pattern(&self.trend.date_format) {
            return Err(ConfigError::InvalidValue {
                key: "trend.date_format".into(),
                message: format!("'{}' is not a valid strftime pattern", self.trend.date_format),
            });
        }
        if !(-23..=23).contains(&self.trend.timezone_offset_hours) {
            return Err(ConfigError::InvalidValue {
                key: "trend.timezone_offset_hours".into(),
                message: "must be between -23 and 23".into(),
            });
        }
        if self.battery.low_threshold > self.battery.high_threshold {
            return Err(ConfigError::InvalidValue {
                key: "battery.low_threshold".into(),
                message: "must not exceed battery.high_threshold".into(),
            });
        }
        Ok(())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join(CONFIG_FILE))
    }

    /// Load from disk or return (and persist) the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)
                    .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                cfg.validate()?;
                tracing::info!(path = %path.display(), "loaded configuration");
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        tracing::info!(path = %path.display(), "saved configuration");
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("falling back to default configuration: {e}");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match Self::lookup(&json, key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result fails [`Config::validate`]. On error `self` is unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::assign(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Trend window as a duration.
    pub fn window(&self) -> Duration {
        Duration::try_days(self.trend.window_days).unwrap_or_else(crate::trend::default_window)
    }

    pub fn band_thresholds(&self) -> BandThresholds {
        BandThresholds {
            high: self.battery.high_threshold,
            low: self.battery.low_threshold,
        }
    }

    /// Settings for a [`crate::MoodTracker`] built from this config.
    pub fn tracker_settings(&self) -> TrackerSettings {
        TrackerSettings {
            window: self.window(),
            rank_limit: self.ranking.limit,
            date_format: DateFormat::new(
                self.trend.date_format.clone(),
                self.trend.timezone_offset_hours,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.trend.window_days, 7);
        assert_eq!(parsed.ranking.limit, 5);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[ranking]\nlimit = 3\n").unwrap();
        assert_eq!(parsed.ranking.limit, 3);
        assert_eq!(parsed.trend.date_format, "%Y-%m-%d");
        assert_eq!(parsed.battery.high_threshold, 70);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("trend.window_days").as_deref(), Some("7"));
        assert_eq!(cfg.get("trend.date_format").as_deref(), Some("%Y-%m-%d"));
        assert!(cfg.get("trend.missing").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("ranking.limit", "3").unwrap();
        cfg.set("trend.timezone_offset_hours", "-5").unwrap();
        cfg.set("trend.date_format", "%d %b").unwrap();
        assert_eq!(cfg.ranking.limit, 3);
        assert_eq!(cfg.trend.timezone_offset_hours, -5);
        assert_eq!(cfg.trend.date_format, "%d %b");
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.set("trend.nonexistent", "1").unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::UnknownKey(_))));
        assert!(cfg.set("trend", "1").is_err());
    }

    #[test]
    fn set_rejects_invalid_values_and_leaves_config_unchanged() {
        let mut cfg = Config::default();
        assert!(cfg.set("ranking.limit", "many").is_err());
        assert!(cfg.set("ranking.limit", "-1").is_err());
        assert!(cfg.set("trend.window_days", "0").is_err());
        assert!(cfg.set("trend.window_days", "9223372036854775807").is_err());
        assert!(cfg.set("trend.date_format", "%Q").is_err());
        assert!(cfg.set("battery.low_threshold", "90").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("battery.high_threshold", "80").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.battery.high_threshold, 80);
        assert_eq!(loaded.band_thresholds().high, 80);
    }

    #[test]
    fn load_from_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "trend = [").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::ParseFailed(_))));
    }

    #[test]
    fn tracker_settings_follow_config() {
        let mut cfg = Config::default();
        cfg.set("trend.window_days", "14").unwrap();
        cfg.set("ranking.limit", "2").unwrap();
        let settings = cfg.tracker_settings();
        assert_eq!(settings.window, Duration::days(14));
        assert_eq!(settings.rank_limit, 2);
        assert_eq!(settings.date_format.pattern(), "%Y-%m-%d");
    }
}
