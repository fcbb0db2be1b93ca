#![forbid(unsafe_code)]

//! Loading settings from TOML and JSON.
//!
//! ```toml
//! columns = 12
//! rows = 8
//! gap = 4
//! ```
//!
//! ```rust,ignore
//! let settings = GridSettings::from_toml_str(src)?;
//! let settings = GridSettings::from_json_file("grid.json")?;
//! ```
//!
//! Every loader validates after parsing. The free functions let
//! downstream crates load their own config types the same way.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::settings::GridSettings;

impl GridSettings {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        parse_toml::<Self>(s)?.validated()
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read_file(path)?)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        parse_json::<Self>(s)?.validated()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&read_file(path)?)
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }
}

/// Errors that can occur when loading settings or builder configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML did not parse into the expected shape.
    #[error("config TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON did not parse into the expected shape.
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Parsed values failed validation.
    #[error("invalid config: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Parse TOML into any config type, for crates layering their own config.
pub fn parse_toml<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    Ok(toml::from_str(s)?)
}

/// Parse JSON into any config type.
pub fn parse_json<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    Ok(serde_json::from_str(s)?)
}

/// Read a config file to a string.
pub fn read_file(path: impl AsRef<Path>) -> Result<String, ConfigError> {
    Ok(std::fs::read_to_string(path.as_ref())?)
}
