//! Configuration loading, env substitution, and validation.
//!
//! Config files: `pagebot.toml`, `pagebot.yaml`, or `pagebot.json`
//! Searched in `./` then `~/.config/pagebot/`.
//!
//! Supports `${ENV_VAR}` and `${ENV_VAR:-default}` substitution in all
//! string values.

pub mod env_subst;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    error::{Error, Result},
    loader::{apply_env_overrides, config_dir, discover_and_load, load_config},
    schema::{
        BackendsConfig, CommandDescriptor, ImagePolicy, MessengerConfig, PagebotConfig, Role,
        RoutingConfig, RoutingMessages, ServerConfig,
    },
    validate::{Diagnostic, Severity, ValidationResult, validate},
};
