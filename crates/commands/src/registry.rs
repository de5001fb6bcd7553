use std::{collections::HashMap, sync::Arc};

use {
    pagebot_config::{CommandDescriptor, Role},
    tracing::{info, warn},
};

use crate::{catalog::HandlerCatalog, command::Command, error::CommandLoadError};

/// Commands keyed by lower-cased name.
///
/// Populated once at startup, then frozen behind an `Arc` and shared
/// read-only with the dispatcher.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from configured descriptors.
    ///
    /// Each descriptor is validated on its own: a malformed entry is logged
    /// and returned in the error list, and loading continues with the rest.
    pub fn load(
        descriptors: &[CommandDescriptor],
        catalog: &HandlerCatalog,
    ) -> (Self, Vec<CommandLoadError>) {
        let mut registry = Self::new();
        let mut errors = Vec::new();

        for descriptor in descriptors {
            let result = Self::build(descriptor, catalog).and_then(|cmd| registry.register(cmd));
            if let Err(e) = result {
                warn!(command = %descriptor.name, error = %e, "command load failure");
                errors.push(e);
            }
        }

        info!(
            loaded = registry.len(),
            failed = errors.len(),
            "command registry loaded"
        );
        (registry, errors)
    }

    fn build(
        descriptor: &CommandDescriptor,
        catalog: &HandlerCatalog,
    ) -> Result<Command, CommandLoadError> {
        let role: Role = descriptor
            .role
            .parse()
            .map_err(|_| CommandLoadError::UnknownRole {
                name: descriptor.name.clone(),
                role: descriptor.role.clone(),
            })?;
        let handler = catalog.get(descriptor.handler_key()).ok_or_else(|| {
            CommandLoadError::UnknownHandler {
                name: descriptor.name.clone(),
                handler: descriptor.handler_key().to_string(),
            }
        })?;

        let mut command = Command::new(&descriptor.name, handler).with_role(role);
        if let Some(description) = &descriptor.description {
            command = command.with_description(description);
        }
        if let Some(usage) = &descriptor.usage {
            command = command.with_usage(usage);
        }
        Ok(command)
    }

    /// Register a command. Names are unique under case-insensitive
    /// comparison; on collision the existing command stays active.
    pub fn register(&mut self, command: Command) -> Result<(), CommandLoadError> {
        let name = command.name();
        if name.is_empty() {
            return Err(CommandLoadError::EmptyName);
        }
        if name.chars().any(char::is_whitespace) {
            return Err(CommandLoadError::InvalidName {
                name: name.to_string(),
            });
        }

        let key = name.to_lowercase();
        if self.commands.contains_key(&key) {
            return Err(CommandLoadError::Duplicate { name: key });
        }
        self.commands.insert(key, Arc::new(command));
        Ok(())
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<Arc<Command>> {
        self.commands.get(&name.to_lowercase()).cloned()
    }

    /// All commands, sorted by name.
    pub fn list(&self) -> Vec<Arc<Command>> {
        let mut commands: Vec<_> = self.commands.values().cloned().collect();
        commands.sort_by(|a, b| a.name().cmp(b.name()));
        commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
