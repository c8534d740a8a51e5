//! Graph configuration
//!
//! Tuning knobs for the compaction trigger, loadable from TOML:
//!
//! ```toml
//! compaction_frequency = 100
//! stale_ratio = 2
//! ```

use crate::compaction::CompactionPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default counter modulus at which compaction is considered
pub const DEFAULT_COMPACTION_FREQUENCY: u64 = 100;

/// Default multiplier applied to the live child count in the trigger
pub const DEFAULT_STALE_RATIO: u64 = 2;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for [`GraphConfig`]
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Registry-wide configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Compaction is considered when the cleanup counter is a multiple of this
    pub compaction_frequency: u64,

    /// Compaction runs only if the counter exceeds `stale_ratio` times the
    /// number of live child slots
    pub stale_ratio: u64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            compaction_frequency: DEFAULT_COMPACTION_FREQUENCY,
            stale_ratio: DEFAULT_STALE_RATIO,
        }
    }
}

impl GraphConfig {
    /// Configuration with a custom compaction frequency
    #[must_use]
    pub fn with_compaction_frequency(mut self, frequency: u64) -> Self {
        self.compaction_frequency = frequency;
        self
    }

    /// Configuration with a custom stale ratio
    #[must_use]
    pub fn with_stale_ratio(mut self, ratio: u64) -> Self {
        self.stale_ratio = ratio;
        self
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if either knob is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compaction_frequency == 0 {
            return Err(ConfigError::Invalid(
                "compaction_frequency must be greater than zero".to_string(),
            ));
        }
        if self.stale_ratio == 0 {
            return Err(ConfigError::Invalid(
                "stale_ratio must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] or [`ConfigError::Invalid`]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`GraphConfig::from_toml_str`]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Compaction policy derived from this configuration
    #[inline]
    #[must_use]
    pub fn policy(&self) -> CompactionPolicy {
        CompactionPolicy::new(self.compaction_frequency, self.stale_ratio)
    }
}
