//! Configuration for hrglitch.

use crate::core::policy::{GlitchLevel, GlitchPolicy, DEFAULT_THRESHOLD_BPM, DEFAULT_WINDOW_SECS};
use chrono::Duration;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the glitch scanner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Per-level glitch policies
    pub levels: LevelSettings,

    /// Directory CSV exports are written to
    pub export_dir: PathBuf,

    /// IANA timezone name used when formatting export dates
    pub export_timezone: String,

    /// Default maximum number of readings per fetch (None = unlimited)
    pub fetch_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hrglitch");

        Self {
            levels: LevelSettings::default(),
            export_dir: data_dir.join("exports"),
            export_timezone: "UTC".to_string(),
            fetch_limit: None,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(e.to_string()))?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(&config_path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hrglitch")
            .join("config.json")
    }

    /// Ensure the export directory exists.
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.export_dir)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Parse the configured export timezone.
    pub fn export_tz(&self) -> Result<Tz, ConfigError> {
        self.export_timezone.parse().map_err(|_| {
            ConfigError::ParseError(format!("unknown timezone: {}", self.export_timezone))
        })
    }
}

/// Per-level policy settings, each independently overridable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSettings {
    pub high: LevelConfig,
    pub medium: LevelConfig,
    pub low: LevelConfig,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            high: LevelConfig::default(),
            medium: LevelConfig::default(),
            low: LevelConfig::default(),
        }
    }
}

impl LevelSettings {
    /// Resolve the policy for a named level.
    pub fn policy_for(&self, level: GlitchLevel) -> GlitchPolicy {
        match level {
            GlitchLevel::High => self.high.policy(),
            GlitchLevel::Medium => self.medium.policy(),
            GlitchLevel::Low => self.low.policy(),
        }
    }
}

/// Threshold/window settings for one level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    pub threshold_bpm: f64,
    pub window_secs: u64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            threshold_bpm: DEFAULT_THRESHOLD_BPM,
            window_secs: DEFAULT_WINDOW_SECS as u64,
        }
    }
}

impl LevelConfig {
    pub fn policy(&self) -> GlitchPolicy {
        GlitchPolicy::new(self.threshold_bpm, Duration::seconds(self.window_secs as i64))
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.export_timezone, "UTC");
        assert_eq!(config.fetch_limit, None);
        assert_eq!(config.levels.high.threshold_bpm, 10.0);
        assert_eq!(config.levels.high.window_secs, 600);
    }

    #[test]
    fn test_levels_resolve_independently() {
        let mut settings = LevelSettings::default();
        settings.low = LevelConfig {
            threshold_bpm: 25.0,
            window_secs: 120,
        };

        let low = settings.policy_for(GlitchLevel::Low);
        assert_eq!(low.threshold_bpm, 25.0);
        assert_eq!(low.window, Duration::seconds(120));

        // Other levels keep their defaults
        let high = settings.policy_for(GlitchLevel::High);
        assert_eq!(high.threshold_bpm, 10.0);
        assert_eq!(high.window, Duration::seconds(600));
    }

    #[test]
    fn test_export_timezone_parsing() {
        let mut config = Config::default();
        assert_eq!(config.export_tz().unwrap(), chrono_tz::UTC);

        config.export_timezone = "Asia/Seoul".to_string();
        assert_eq!(config.export_tz().unwrap(), chrono_tz::Asia::Seoul);

        config.export_timezone = "Mars/Olympus".to_string();
        assert!(matches!(config.export_tz(), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = Config::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.export_timezone, config.export_timezone);
        assert_eq!(back.levels.medium.window_secs, config.levels.medium.window_secs);
    }
}
