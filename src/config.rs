//! Configuration for the accelerometer resampler.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Output interval in milliseconds
    pub interval_ms: i64,

    /// Synthetic source timing
    pub source: SourceConfig,

    /// Directory for exported sessions
    pub export_path: PathBuf,

    /// Format used when exporting sessions
    pub output_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("accel-resampler");

        Self {
            interval_ms: 100,
            source: SourceConfig::default(),
            export_path: data_dir.join("exports"),
            output_format: OutputFormat::Json,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration, falling back to defaults when the file is unreadable.
    ///
    /// The failure is logged, since saving the result afterwards replaces
    /// the broken file with defaults.
    pub fn load_or_default() -> Self {
        Self::load_or_default_from(&Self::config_path())
    }

    pub fn load_or_default_from(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            tracing::warn!(path = ?path, "ignoring unusable configuration, using defaults: {e}");
            Self::default()
        })
    }

    /// Load configuration from `config_path`, or defaults if it does not exist.
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::Parse(e.to_string()))?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.validate()?;
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("accel-resampler")
            .join("config.json")
    }

    /// Ensure the export directory exists.
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.export_path)?;
        Ok(())
    }

    /// Reject values the resampler cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_ms <= 0 {
            return Err(ConfigError::Validation(format!(
                "interval_ms must be positive, got {}",
                self.interval_ms
            )));
        }
        if self.source.mean_period_ms == 0 {
            return Err(ConfigError::Validation(
                "source.mean_period_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Timing of the synthetic sample source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub mean_period_ms: u64,
    pub jitter_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            mean_period_ms: 20,
            jitter_ms: 15,
        }
    }
}

/// Session export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Jsonl,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" => Ok(OutputFormat::Jsonl),
            other => Err(ConfigError::Validation(format!(
                "unknown output format '{other}'"
            ))),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialize error: {0}")]
    Serialize(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.interval_ms, 100);
        assert_eq!(config.source.mean_period_ms, 20);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_interval() {
        let config = Config {
            interval_ms: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_or_default_falls_back_on_broken_file() {
        let dir = std::env::temp_dir()
            .join(format!("accel-resampler-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::Parse(_))));
        assert_eq!(Config::load_or_default_from(&path).interval_ms, 100);

        let saved = Config {
            interval_ms: 250,
            output_format: OutputFormat::Jsonl,
            ..Config::default()
        };
        std::fs::write(&path, serde_json::to_string(&saved).unwrap()).unwrap();
        let config = Config::load_or_default_from(&path);
        assert_eq!(config.interval_ms, 250);
        assert_eq!(config.output_format, OutputFormat::Jsonl);

        assert_eq!(
            Config::load_from(&dir.join("missing.json")).unwrap().interval_ms,
            100
        );
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_ensure_directories_creates_export_path() {
        let dir = std::env::temp_dir()
            .join(format!("accel-resampler-export-{}", std::process::id()));
        let config = Config {
            export_path: dir.join("nested").join("exports"),
            ..Config::default()
        };

        config.ensure_directories().unwrap();
        assert!(config.export_path.is_dir());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("JSONL".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_config_json_round_trip_keeps_format_lowercase() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("\"output_format\":\"json\""));
    }
}
