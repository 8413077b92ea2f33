//! Validator configuration, read from `validator.toml`-style files.

use std::path::{Path, PathBuf};

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Errors loading or validating a [`ValidatorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this structure.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The UTC offset is outside ±24 hours.
    #[error("utc offset of {0} seconds is out of range")]
    InvalidOffset(i32),

    /// A date format string is blank.
    #[error("date formats cannot be blank")]
    BlankDateFormat,
}

/// Tunables for [`Validator`](crate::Validator) date handling.
///
/// Every field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// `chrono` formats tried, in order, for date-time strings without a
    /// UTC offset (RFC 3339 strings are always accepted first).
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<String>,
    /// `chrono` formats tried for date-only strings, read as midnight.
    #[serde(default = "default_date_only_formats")]
    pub date_only_formats: Vec<String>,
    /// Offset east of UTC applied to naive date-times.
    #[serde(default)]
    pub utc_offset_seconds: i32,
}

fn default_date_formats() -> Vec<String> {
    [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_date_only_formats() -> Vec<String> {
    vec!["%Y-%m-%d".to_string(), "%Y/%m/%d".to_string()]
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            date_formats: default_date_formats(),
            date_only_formats: default_date_only_formats(),
            utc_offset_seconds: 0,
        }
    }
}

impl ValidatorConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads config from `path`, falling back to defaults if the file does
    /// not exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No validator config found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        debug!("Loaded validator config from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.utc_offset()?;
        if self
            .date_formats
            .iter()
            .chain(&self.date_only_formats)
            .any(|format| format.trim().is_empty())
        {
            return Err(ConfigError::BlankDateFormat);
        }
        Ok(())
    }

    pub fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        FixedOffset::east_opt(self.utc_offset_seconds)
            .ok_or(ConfigError::InvalidOffset(self.utc_offset_seconds))
    }
}
