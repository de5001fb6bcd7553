//! Route inbound events to commands.
//!
//! Per event: parse text into (name, args) → look up the command or fall
//! back to the default route → authorize → execute with failure isolation.
//! Independently, an image resolved from the event (direct attachment or
//! replied-to message) is routed to the reserved image command according to
//! the configured image policy.

pub mod dispatch;
pub mod error;
pub mod outcome;
pub mod parse;
pub mod resolve;

#[cfg(test)]
pub(crate) mod testing;

pub use {
    dispatch::Dispatcher,
    error::DispatchError,
    outcome::{DispatchOutcome, HandlerRun, Route, RunStatus},
    parse::{ParsedInput, parse},
    resolve::AttachmentResolver,
};
