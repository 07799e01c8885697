//! Report configuration, read from a JSON file.

use std::fs;
use std::path::Path;

use fin_core::NormalizerConfig;
use fin_indicators::EngineConfig;
use fin_insight::SnapshotConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a config file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// File path.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file is not a valid config document.
    #[error("Invalid config {path}: {source}")]
    Parse {
        /// File path.
        path: String,
        /// Underlying error.
        source: serde_json::Error,
    },
}

/// Everything the report pipeline can be tuned with.
///
/// Every field is optional in the file; missing ones take their defaults.
///
/// ```json
/// { "engine": { "rsi": { "window": 21 } }, "snapshot": { "recent_rows": 5 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Indicator settings.
    pub engine: EngineConfig,
    /// Normalizer settings.
    pub normalizer: NormalizerConfig,
    /// Snapshot settings.
    pub snapshot: SnapshotConfig,
    /// Fallback log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            normalizer: NormalizerConfig::default(),
            snapshot: SnapshotConfig::default(),
            log_level: "warn".to_string(),
        }
    }
}

impl ReportConfig {
    /// Parse a JSON document.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(ReportConfig::from_json("{}").unwrap(), ReportConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = ReportConfig::from_json(
            r#"{ "engine": { "rsi": { "window": 21 } }, "snapshot": { "recent_rows": 5 }, "log_level": "debug" }"#,
        )
        .unwrap();

        assert_eq!(config.engine.rsi.window, 21);
        assert_eq!(config.engine.bollinger, fin_indicators::BollingerConfig::default());
        assert_eq!(config.snapshot.recent_rows, 5);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.normalizer.date_column, "Date");
    }

    #[test]
    fn test_malformed_document() {
        assert!(ReportConfig::from_json("{ \"engine\": 3 }").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = ReportConfig::load("/nonexistent/fin-report.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
