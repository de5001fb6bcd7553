use std::time::Duration;

/// Failures inside one handler run. Always logged and turned into a
/// user-visible notice; never returned from [`crate::Dispatcher::dispatch`].
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("sender {sender_id} is not allowed to run '{command}'")]
    Unauthorized { command: String, sender_id: String },

    #[error("command '{command}' failed: {error:#}")]
    Handler {
        command: String,
        error: anyhow::Error,
    },

    #[error("command '{command}' timed out after {after:?}")]
    TimedOut { command: String, after: Duration },

    #[error("command '{command}' aborted: {reason}")]
    Aborted { command: String, reason: String },
}
