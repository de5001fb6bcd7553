/// Why a command could not be registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandLoadError {
    #[error("command name is empty")]
    EmptyName,

    #[error("command name '{name}' must be a single word")]
    InvalidName { name: String },

    #[error("command '{name}' is already registered")]
    Duplicate { name: String },

    #[error("command '{name}' references unknown handler '{handler}'")]
    UnknownHandler { name: String, handler: String },

    #[error("command '{name}' has undefined role '{role}'")]
    UnknownRole { name: String, role: String },
}
