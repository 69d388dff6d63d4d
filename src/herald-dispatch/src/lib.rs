//! Prefixed command registry and dispatcher.
//!
//! This crate turns lines typed by a user (in a chat bot, console or REPL)
//! such as `!help` or `!kick alice` into calls to registered handler
//! functions.
//!
//! # Building a Registry
//!
//! Commands are declared in a container and collected by [`build`], or
//! registered one by one on a [`RegistryBuilder`]:
//!
//! ```rust,ignore
//! use herald_dispatch::{Declaration, build};
//!
//! let commands = vec![
//!     Declaration::new("help", "List commands").handler(|_input, ctx| {
//!         for meta in ctx.list_all() {
//!             println!("{}{} - {}", ctx.prefix(), meta.name, meta.description);
//!         }
//!         Ok(true)
//!     }),
//!     Declaration::new("CaseSensitive", "Exact casing only")
//!         .case_sensitive()
//!         .handler(|_input, _ctx| Ok(true)),
//! ];
//!
//! let dispatcher = build(&commands)?;
//! ```
//!
//! Names are stored under their lowercase form; two names that differ only
//! in casing are rejected with [`BuildError::DuplicateCommand`].
//!
//! # Dispatching
//!
//! ```rust,ignore
//! use herald_dispatch::DispatchResult;
//!
//! match dispatcher.interpret("!HELP") {
//!     DispatchResult::Succeeded => {}
//!     DispatchResult::NotFound => { /* not a command, or unknown */ }
//!     DispatchResult::Failed(cause) => tracing::warn!("{cause}"),
//! }
//! ```
//!
//! Handlers receive the full input line; [`split_arguments`] splits off the
//! arguments. A case-sensitive command only resolves when typed with its
//! declared casing, and any other casing is reported as a plain miss.

mod command;
mod config;
mod dispatcher;
mod error;
pub mod parse;
mod registry;

pub use command::{
    CaseSensitivity, Command, CommandContainer, CommandMeta, Declaration, Handler, HandlerFn,
    fold_key,
};
pub use config::DispatcherConfig;
pub use dispatcher::{DEFAULT_PREFIX, DispatchResult, Dispatcher};
pub use error::{BuildError, CommandNotFound, ConfigError, HandlerFailure};
pub use parse::split_arguments;
pub use registry::{CommandRegistry, RegistryBuilder, build};

/// Re-export common types for convenience.
pub mod prelude {
    pub use crate::{
        CaseSensitivity, CommandMeta, Declaration, DispatchResult, Dispatcher, DispatcherConfig,
        HandlerFailure, RegistryBuilder, build, split_arguments,
    };
}
