//! Command registry and built-in command handlers.
//!
//! Every command implements the same [`CommandHandler`] contract and is
//! registered once at startup. The registry is read-only afterwards and is
//! shared with the dispatcher behind an `Arc`.

pub mod builtin;
pub mod catalog;
pub mod command;
pub mod error;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;

pub use {
    catalog::HandlerCatalog,
    command::{Command, CommandArgs, CommandHandler, Invocation},
    error::CommandLoadError,
    pagebot_config::Role,
    registry::CommandRegistry,
};
