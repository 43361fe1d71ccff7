//! Configuration for the Inscribe overlay engine.
//!
//! ```
//! use inscribe_core::EngineConfig;
//!
//! let config = EngineConfig::from_toml_str(
//!     r#"
//!     max_overlays = 16
//!     timestamp_zone = "local"
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.max_overlays, 16);
//! assert_eq!(config.max_text_len, 511);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors produced while loading or validating an [`EngineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Engine-wide settings fixed at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of overlay slots allocated by the engine. At least 1.
    pub max_overlays: usize,
    /// Upper bound on the rendered text of a single overlay, in bytes.
    pub max_text_len: usize,
    /// Upper bound on a formatted timestamp, in bytes.
    pub max_timestamp_len: usize,
    /// Zone used when formatting frame timestamps into text overlays.
    pub timestamp_zone: TimestampZone,
    /// `tracing-subscriber` filter directives.
    pub log_filter: String,
    pub benchmark: BenchmarkMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_overlays: 8,
            max_text_len: 511,
            max_timestamp_len: 63,
            timestamp_zone: TimestampZone::Utc,
            log_filter: "info".to_string(),
            benchmark: BenchmarkMode::Off,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_overlays == 0 {
            return Err(ConfigError::Invalid(
                "max_overlays must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the number of overlay slots.
    pub fn with_max_overlays(mut self, max_overlays: usize) -> Self {
        self.max_overlays = max_overlays;
        self
    }

    /// Set the zone used for timestamp formatting.
    pub fn with_timestamp_zone(mut self, zone: TimestampZone) -> Self {
        self.timestamp_zone = zone;
        self
    }
}

/// Zone applied to frame timestamps before strftime formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampZone {
    #[default]
    Utc,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkMode {
    /// Benchmarking is disabled
    #[default]
    Off,
    /// Profiling scopes are recorded
    On,
    /// Profiling scopes are recorded and served to external tools such as
    /// 'puffin_viewer'
    WithWebserver,
}
