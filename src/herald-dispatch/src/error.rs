//! Error types for registry construction, lookup and handler invocation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a command registry.
///
/// Both variants are fatal: the builder stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A declaration does not satisfy the handler contract.
    #[error("Command '{name}' is not a valid handler: {reason}")]
    HandlerSignature { name: String, reason: String },

    /// Two declarations fold to the same registry key.
    #[error("Duplicate command '{key}': '{name}' collides with already registered '{existing}'")]
    DuplicateCommand {
        /// Lowercase registry key both names fold to.
        key: String,
        /// Name of the command that was registered first.
        existing: String,
        /// Name of the rejected command.
        name: String,
    },
}

impl BuildError {
    pub(crate) fn signature(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::HandlerSignature {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Returned by explicit lookups when no command is stored under the name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Command not found: {command_name}")]
pub struct CommandNotFound {
    /// The name that was looked up.
    pub command_name: String,
}

impl CommandNotFound {
    /// Create an error for the given name.
    pub fn new(command_name: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
        }
    }
}

/// Why a resolved command did not succeed.
#[derive(Debug, Error)]
pub enum HandlerFailure {
    /// The handler ran and returned `false`.
    #[error("Handler declined the input")]
    Declined,

    /// The handler returned an error.
    #[error("Handler returned an error: {0:#}")]
    Error(anyhow::Error),

    /// The handler panicked; holds the panic message.
    #[error("Handler panicked: {0}")]
    Panicked(String),
}

/// Errors that can occur while loading dispatcher configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file.
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
