//! Input resolution and handler invocation.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace, warn};

use crate::command::{Command, CommandMeta};
use crate::config::DispatcherConfig;
use crate::error::{CommandNotFound, HandlerFailure};
use crate::parse::command_token;
use crate::registry::CommandRegistry;

/// Prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "!";

/// Outcome of interpreting one input line.
#[derive(Debug)]
pub enum DispatchResult {
    /// A handler ran and returned `true`.
    Succeeded,
    /// No command matched: missing prefix, unknown name, or rejected casing.
    NotFound,
    /// A handler ran but did not succeed.
    Failed(HandlerFailure),
}

impl DispatchResult {
    /// Check if a handler ran and succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Check if no command matched the input.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Check if a handler ran but did not succeed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The failure cause, if the handler did not succeed.
    pub fn failure(&self) -> Option<&HandlerFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Resolves input lines against a registry and invokes the matching handler.
///
/// The registry is shared and read-only; the prefix is the only mutable
/// state and can be changed through `&self`, including from inside a
/// handler.
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    prefix: RwLock<String>,
}

impl Dispatcher {
    /// Create a dispatcher with the default `!` prefix.
    pub fn new(registry: impl Into<Arc<CommandRegistry>>) -> Self {
        Self::with_prefix(registry, DEFAULT_PREFIX)
    }

    /// Create a dispatcher with a custom prefix.
    pub fn with_prefix(
        registry: impl Into<Arc<CommandRegistry>>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            registry: registry.into(),
            prefix: RwLock::new(prefix.into()),
        }
    }

    /// Create a dispatcher from configuration.
    pub fn from_config(registry: impl Into<Arc<CommandRegistry>>, config: &DispatcherConfig) -> Self {
        Self::with_prefix(registry, config.prefix.clone())
    }

    /// Snapshot of the current prefix.
    pub fn prefix(&self) -> String {
        self.prefix.read().clone()
    }

    /// Replace the prefix. Any string is accepted, including the empty one.
    pub fn set_prefix(&self, prefix: impl Into<String>) {
        let prefix = prefix.into();
        debug!(prefix = %prefix, "Command prefix changed");
        *self.prefix.write() = prefix;
    }

    /// The shared registry.
    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Get command metadata by exact registry key.
    ///
    /// Keys are lowercase; the name is not folded before lookup.
    pub fn get_by_name(&self, name: &str) -> Result<&CommandMeta, CommandNotFound> {
        self.registry
            .get(name)
            .map(Command::meta)
            .ok_or_else(|| CommandNotFound::new(name))
    }

    /// Metadata of every registered command.
    pub fn list_all(&self) -> Vec<&CommandMeta> {
        self.registry.iter().map(Command::meta).collect()
    }

    /// Resolve an input line to a command without invoking it.
    ///
    /// Applies the prefix check, tokenizing, key lookup and casing policy.
    pub fn resolve(&self, input: &str) -> Option<&Command> {
        let prefix = self.prefix();

        let Some(raw_name) = command_token(input, &prefix) else {
            trace!(prefix = %prefix, "Input is not a command invocation");
            return None;
        };

        let command = self.registry.lookup(raw_name)?;

        if !command.accepts(raw_name) {
            debug!(
                typed = raw_name,
                command = command.name(),
                "Casing rejected by case-sensitive command"
            );
            return None;
        }

        Some(command)
    }

    /// Interpret one input line.
    ///
    /// Misses are reported as [`DispatchResult::NotFound`], never as errors.
    /// Handler errors and panics are caught and reported as
    /// [`DispatchResult::Failed`].
    pub fn interpret(&self, input: &str) -> DispatchResult {
        match self.resolve(input) {
            Some(command) => self.invoke(command, input),
            None => DispatchResult::NotFound,
        }
    }

    fn invoke(&self, command: &Command, input: &str) -> DispatchResult {
        let handler = command.handler();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler(input, self)));

        match outcome {
            Ok(Ok(true)) => {
                debug!(command = command.name(), "Command succeeded");
                DispatchResult::Succeeded
            }
            Ok(Ok(false)) => {
                debug!(command = command.name(), "Command handler declined");
                DispatchResult::Failed(HandlerFailure::Declined)
            }
            Ok(Err(err)) => {
                warn!(command = command.name(), error = %format!("{err:#}"), "Command handler failed");
                DispatchResult::Failed(HandlerFailure::Error(err))
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(command = command.name(), panic = %message, "Command handler panicked");
                DispatchResult::Failed(HandlerFailure::Panicked(message))
            }
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("prefix", &*self.prefix.read())
            .field("commands", &self.registry.len())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
