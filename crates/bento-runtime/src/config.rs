#![forbid(unsafe_code)]

//! Builder configuration.
//!
//! Groups the grid settings, history depth, and the shape of newly added
//! blocks into one [`BuilderConfig`] that can be loaded from TOML or JSON.
//!
//! ```toml
//! [settings]
//! columns = 12
//! rows = 8
//!
//! [history]
//! max_depth = 50
//!
//! [default_block]
//! width = 3
//! height = 2
//! ```
//!
//! Every section and key is optional; missing values take the defaults.
//! The loaders need the `policy-config` feature (on by default).

#[cfg(feature = "policy-config")]
use std::path::Path;

#[cfg(feature = "policy-config")]
use bento_core::config_loader::{self, ConfigError};
use bento_core::{BlockShape, GridSettings};
use serde::{Deserialize, Serialize};

use crate::undo::SnapshotConfig;

/// Top-level configuration for a [`BuilderStore`](crate::BuilderStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Initial grid settings.
    pub settings: GridSettings,
    /// Undo history limits.
    pub history: SnapshotConfig,
    /// Size of blocks created by `add`.
    pub default_block: BlockShape,
}

impl BuilderConfig {
    /// Validate all parameters are within acceptable ranges.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.settings.validate();
        if self.default_block.width == 0 || self.default_block.height == 0 {
            errors.push(format!(
                "default_block must be at least 1x1, got {}x{}",
                self.default_block.width, self.default_block.height
            ));
        }
        if self.history.max_depth == 0 {
            errors.push("history.max_depth must be > 0".into());
        }
        errors
    }
}

#[cfg(feature = "policy-config")]
impl BuilderConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        config_loader::parse_toml::<Self>(s)?.validated()
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&config_loader::read_file(path)?)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        config_loader::parse_json::<Self>(s)?.validated()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&config_loader::read_file(path)?)
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
