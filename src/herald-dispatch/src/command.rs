//! Command metadata, handlers and declarations.

use std::fmt;
use std::sync::Arc;

use crate::dispatcher::Dispatcher;

/// Signature every command handler conforms to.
///
/// The handler receives the full raw input line (prefix and arguments
/// included) and the dispatcher that resolved it.
pub type HandlerFn = dyn Fn(&str, &Dispatcher) -> anyhow::Result<bool> + Send + Sync;

/// Shared reference to a handler.
pub type Handler = Arc<HandlerFn>;

/// Whether a command must be typed with its declared casing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CaseSensitivity {
    /// Any casing of the name resolves to the command.
    #[default]
    CaseInvariant,
    /// Only the exact declared casing resolves to the command.
    CaseSensitive,
}

impl CaseSensitivity {
    /// Check whether `typed` is acceptable for a command declared as `declared`.
    ///
    /// Callers have already matched the folded key.
    pub fn accepts(self, typed: &str, declared: &str) -> bool {
        match self {
            Self::CaseInvariant => true,
            Self::CaseSensitive => typed == declared,
        }
    }
}

/// Metadata describing a registered command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMeta {
    /// Name as declared (casing preserved).
    pub name: String,
    /// Free text shown in help listings.
    pub description: String,
    /// Casing policy applied during resolution.
    pub case_sensitivity: CaseSensitivity,
}

impl CommandMeta {
    /// Create case-invariant metadata.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            case_sensitivity: CaseSensitivity::default(),
        }
    }

    /// Registry key: the lowercase-folded name.
    pub fn key(&self) -> String {
        fold_key(&self.name)
    }

    /// Check if this command requires exact casing.
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitivity == CaseSensitivity::CaseSensitive
    }
}

/// Fold a command name into its registry key.
pub fn fold_key(name: &str) -> String {
    name.to_lowercase()
}

/// A registry entry: metadata plus the handler it resolves to.
#[derive(Clone)]
pub struct Command {
    meta: CommandMeta,
    handler: Handler,
}

impl Command {
    pub(crate) fn new(meta: CommandMeta, handler: Handler) -> Self {
        Self { meta, handler }
    }

    /// Get the command metadata.
    pub fn meta(&self) -> &CommandMeta {
        &self.meta
    }

    /// Get the declared name.
    pub fn name(&self) -> &str {
        &self.meta.name
    }

    /// Get the description of the command.
    pub fn description(&self) -> &str {
        &self.meta.description
    }

    /// Get the casing policy.
    pub fn case_sensitivity(&self) -> CaseSensitivity {
        self.meta.case_sensitivity
    }

    /// Get the handler this command resolves to.
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// Check whether `raw_name` passes this command's casing policy.
    pub fn accepts(&self, raw_name: &str) -> bool {
        self.meta.case_sensitivity.accepts(raw_name, &self.meta.name)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

/// A candidate command inside a container.
///
/// Declarations are checked by the registry builder: one without a handler
/// is rejected rather than silently skipped.
///
/// ```rust,ignore
/// let decl = Declaration::new("CaseSensitive", "Exact casing only")
///     .case_sensitive()
///     .handler(|_input, _ctx| Ok(true));
/// ```
#[derive(Clone)]
pub struct Declaration {
    pub(crate) meta: CommandMeta,
    pub(crate) handler: Option<Handler>,
}

impl Declaration {
    /// Declare a case-invariant command with no handler bound yet.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            meta: CommandMeta::new(name, description),
            handler: None,
        }
    }

    /// Require exact casing.
    pub fn case_sensitive(self) -> Self {
        self.case_sensitivity(CaseSensitivity::CaseSensitive)
    }

    /// Set the casing policy.
    pub fn case_sensitivity(mut self, case_sensitivity: CaseSensitivity) -> Self {
        self.meta.case_sensitivity = case_sensitivity;
        self
    }

    /// Bind the handler function.
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str, &Dispatcher) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Bind an already shared handler.
    pub fn shared_handler(mut self, handler: Handler) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Get the declared metadata.
    pub fn meta(&self) -> &CommandMeta {
        &self.meta
    }

    /// Check if a handler is bound.
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }
}

impl fmt::Debug for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Declaration")
            .field("meta", &self.meta)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

/// A logical namespace of command declarations.
///
/// The registry builder is the only consumer.
pub trait CommandContainer {
    /// Every declaration in the container, in declaration order.
    fn declarations(&self) -> Vec<Declaration>;
}

impl CommandContainer for [Declaration] {
    fn declarations(&self) -> Vec<Declaration> {
        self.to_vec()
    }
}

impl<const N: usize> CommandContainer for [Declaration; N] {
    fn declarations(&self) -> Vec<Declaration> {
        self.to_vec()
    }
}

impl CommandContainer for Vec<Declaration> {
    fn declarations(&self) -> Vec<Declaration> {
        self.clone()
    }
}
