//! Command registry and the builder that produces it.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::command::{
    CaseSensitivity, Command, CommandContainer, CommandMeta, Declaration, Handler, fold_key,
};
use crate::config::DispatcherConfig;
use crate::dispatcher::Dispatcher;
use crate::error::BuildError;

/// Build a dispatcher from every declaration in a container.
///
/// The dispatcher uses the default `!` prefix.
pub fn build<C>(container: &C) -> Result<Dispatcher, BuildError>
where
    C: CommandContainer + ?Sized,
{
    let mut builder = RegistryBuilder::new();
    builder.extend_from(container)?;
    Ok(builder.into_dispatcher())
}

/// Registry of commands keyed by their lowercase-folded name.
///
/// Immutable once built. Iteration follows registration order.
#[derive(Debug, Default, Clone)]
pub struct CommandRegistry {
    commands: IndexMap<String, Command>,
}

impl CommandRegistry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Get a command by its exact registry key.
    ///
    /// Keys are stored lowercase, so this does not fold `key`.
    pub fn get(&self, key: &str) -> Option<&Command> {
        self.commands.get(key)
    }

    /// Get a command by a user-typed name, folding it to a key first.
    ///
    /// The casing policy is not applied here.
    pub fn lookup(&self, raw_name: &str) -> Option<&Command> {
        self.commands.get(fold_key(raw_name).as_str())
    }

    /// Check if a command is stored under the exact key.
    pub fn contains(&self, key: &str) -> bool {
        self.commands.contains_key(key)
    }

    /// Get all registered commands.
    pub fn list(&self) -> Vec<&Command> {
        self.commands.values().collect()
    }

    /// Get all declared command names.
    pub fn names(&self) -> Vec<&str> {
        self.commands.values().map(Command::name).collect()
    }

    /// Get the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Find commands whose name starts with `prefix` (for autocompletion).
    pub fn find_by_prefix(&self, prefix: &str) -> Vec<&Command> {
        let prefix_lower = prefix.to_lowercase();

        self.commands
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix_lower))
            .map(|(_, cmd)| cmd)
            .collect()
    }

    /// Search commands by name or description.
    pub fn search(&self, query: &str) -> Vec<&Command> {
        let query_lower = query.to_lowercase();

        self.commands
            .iter()
            .filter(|(key, cmd)| {
                key.contains(&query_lower) || cmd.description().to_lowercase().contains(&query_lower)
            })
            .map(|(_, cmd)| cmd)
            .collect()
    }

    /// Create an iterator over all commands.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }
}

impl<'a> IntoIterator for &'a CommandRegistry {
    type Item = &'a Command;
    type IntoIter = indexmap::map::Values<'a, String, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.values()
    }
}

/// Builder that validates declarations and assembles a [`CommandRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    commands: IndexMap<String, Command>,
}

impl RegistryBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self {
            commands: IndexMap::new(),
        }
    }

    /// Register a handler function under `name`.
    pub fn register<F>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        case_sensitivity: CaseSensitivity,
        handler: F,
    ) -> Result<&mut Self, BuildError>
    where
        F: Fn(&str, &Dispatcher) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        let meta = CommandMeta {
            name: name.into(),
            description: description.into(),
            case_sensitivity,
        };
        self.insert(meta, Arc::new(handler))?;
        Ok(self)
    }

    /// Register a single declaration.
    pub fn declare(&mut self, declaration: Declaration) -> Result<&mut Self, BuildError> {
        let Declaration { meta, handler } = declaration;

        let Some(handler) = handler else {
            return Err(BuildError::signature(meta.name, "no handler function is bound"));
        };

        self.insert(meta, handler)?;
        Ok(self)
    }

    /// Register every declaration in a container, stopping at the first error.
    pub fn extend_from<C>(&mut self, container: &C) -> Result<&mut Self, BuildError>
    where
        C: CommandContainer + ?Sized,
    {
        for declaration in container.declarations() {
            self.declare(declaration)?;
        }
        Ok(self)
    }

    fn insert(&mut self, meta: CommandMeta, handler: Handler) -> Result<(), BuildError> {
        validate_name(&meta.name)?;

        let key = meta.key();
        if let Some(existing) = self.commands.get(&key) {
            return Err(BuildError::DuplicateCommand {
                key,
                existing: existing.name().to_string(),
                name: meta.name,
            });
        }

        debug!(
            command = %meta.name,
            key = %key,
            case_sensitivity = ?meta.case_sensitivity,
            "Registered command"
        );
        self.commands.insert(key, Command::new(meta, handler));
        Ok(())
    }

    /// Number of commands registered so far.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Finish building.
    pub fn build(self) -> CommandRegistry {
        info!(count = self.commands.len(), "Built command registry");
        CommandRegistry {
            commands: self.commands,
        }
    }

    /// Finish building and wrap the registry in a dispatcher with the default prefix.
    pub fn into_dispatcher(self) -> Dispatcher {
        Dispatcher::new(self.build())
    }

    /// Finish building and wrap the registry in a configured dispatcher.
    pub fn into_dispatcher_with(self, config: &DispatcherConfig) -> Dispatcher {
        Dispatcher::from_config(self.build(), config)
    }
}

/// A name the tokenizer could never produce cannot be invoked.
fn validate_name(name: &str) -> Result<(), BuildError> {
    if name.is_empty() {
        return Err(BuildError::signature(name, "command name is empty"));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(BuildError::signature(name, "command name contains whitespace"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_handler(_: &str, _: &Dispatcher) -> anyhow::Result<bool> {
        Ok(true)
    }

    fn make_registry(names: &[(&str, &str)]) -> CommandRegistry {
        let mut builder = RegistryBuilder::new();
        for (name, description) in names {
            builder
                .register(*name, *description, CaseSensitivity::CaseInvariant, ok_handler)
                .unwrap();
        }
        builder.build()
    }

    #[test]
    fn test_register_and_get() {
        let registry = make_registry(&[("test", "A test command")]);

        assert!(registry.contains("test"));
        assert_eq!(registry.get("test").map(Command::name), Some("test"));
    }

    #[test]
    fn test_builder_entry_point() {
        let mut builder = CommandRegistry::builder();
        assert!(builder.is_empty());

        builder
            .declare(Declaration::new("ping", "Reply with pong").handler(ok_handler))
            .unwrap();
        assert_eq!(builder.len(), 1);

        let registry = builder.build();
        assert_eq!(registry.names(), vec!["ping"]);
    }

    #[test]
    fn test_key_is_folded_name_is_preserved() {
        let registry = make_registry(&[("CaseSensitive", "Mixed case")]);

        assert!(registry.contains("casesensitive"));
        assert!(!registry.contains("CaseSensitive"));
        assert_eq!(
            registry.get("casesensitive").map(Command::name),
            Some("CaseSensitive")
        );
    }

    #[test]
    fn test_lookup_folds() {
        let registry = make_registry(&[("help", "Show help")]);

        assert!(registry.lookup("HELP").is_some());
        assert!(registry.lookup("Help").is_some());
        assert!(registry.lookup("hel").is_none());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut builder = RegistryBuilder::new();
        builder
            .register("help", "first", CaseSensitivity::CaseInvariant, ok_handler)
            .unwrap();

        let err = builder
            .register("HELP", "second", CaseSensitivity::CaseSensitive, ok_handler)
            .unwrap_err();

        assert_eq!(
            err,
            BuildError::DuplicateCommand {
                key: "help".to_string(),
                existing: "help".to_string(),
                name: "HELP".to_string(),
            }
        );

        // First registration is kept
        let registry = builder.build();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("help").map(Command::description), Some("first"));
    }

    #[test]
    fn test_declaration_without_handler_rejected() {
        let mut builder = RegistryBuilder::new();
        let err = builder
            .declare(Declaration::new("orphan", "No handler"))
            .unwrap_err();

        assert!(matches!(err, BuildError::HandlerSignature { ref name, .. } if name == "orphan"));
    }

    #[test]
    fn test_invalid_names_rejected() {
        let mut builder = RegistryBuilder::new();

        let err = builder
            .register("", "empty", CaseSensitivity::CaseInvariant, ok_handler)
            .unwrap_err();
        assert!(matches!(err, BuildError::HandlerSignature { .. }));

        let err = builder
            .register("two words", "spaced", CaseSensitivity::CaseInvariant, ok_handler)
            .unwrap_err();
        assert!(matches!(err, BuildError::HandlerSignature { .. }));
        assert!(builder.is_empty());
    }

    #[test]
    fn test_build_from_container() {
        let container = vec![
            Declaration::new("test", "Test").handler(ok_handler),
            Declaration::new("help", "Help").handler(ok_handler),
        ];

        let dispatcher = build(&container).unwrap();
        assert_eq!(dispatcher.registry().len(), 2);
        assert_eq!(dispatcher.prefix(), "!");
    }

    #[test]
    fn test_build_from_container_stops_at_duplicate() {
        let container = [
            Declaration::new("test", "Test").handler(ok_handler),
            Declaration::new("Test", "Again").handler(ok_handler),
        ];

        let err = build(&container).unwrap_err();
        assert!(matches!(err, BuildError::DuplicateCommand { ref key, .. } if key == "test"));
    }

    #[test]
    fn test_list_keeps_registration_order() {
        let registry = make_registry(&[("zeta", "Z"), ("alpha", "A"), ("Mid", "M")]);

        assert_eq!(registry.names(), vec!["zeta", "alpha", "Mid"]);
        assert_eq!(registry.list().len(), 3);
        assert_eq!((&registry).into_iter().count(), 3);
    }

    #[test]
    fn test_find_by_prefix() {
        let registry = make_registry(&[("build", "Build"), ("Bump", "Bump"), ("test", "Test")]);

        let found = registry.find_by_prefix("bu");
        assert_eq!(found.len(), 2);

        let found = registry.find_by_prefix("TE");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_search() {
        let registry = make_registry(&[
            ("build", "Build the project"),
            ("test", "Run tests"),
            ("deploy", "Deploy to production"),
        ]);

        let found = registry.search("PROJECT");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "build");

        let found = registry.search("build");
        assert_eq!(found.len(), 1);
    }
}
