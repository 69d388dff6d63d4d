//! Dispatcher configuration.
//!
//! ```toml
//! prefix = "?"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dispatcher::DEFAULT_PREFIX;
use crate::error::ConfigError;

/// Settings applied when a dispatcher is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Literal that must open every command invocation. May be empty.
    pub prefix: String,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl DispatcherConfig {
    /// Create a config with the given prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Parse config from TOML text. Missing fields take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
