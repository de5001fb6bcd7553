use std::sync::Arc;

use {
    anyhow::Result,
    async_trait::async_trait,
    pagebot_channels::ChannelOutbound,
    pagebot_common::types::{ImageRef, OutboundPayload},
    pagebot_config::Role,
    secrecy::Secret,
};

/// Arguments handed to a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandArgs {
    /// Whitespace-split words following an explicit command name.
    Words(Vec<String>),
    /// Original full text, passed unsplit to the fallback command.
    Raw(String),
}

impl CommandArgs {
    pub fn empty() -> Self {
        Self::Words(Vec::new())
    }

    /// Arguments as one string, words joined by single spaces.
    pub fn joined(&self) -> String {
        match self {
            Self::Words(words) => words.join(" "),
            Self::Raw(text) => text.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Words(words) => words.is_empty(),
            Self::Raw(text) => text.trim().is_empty(),
        }
    }
}

/// Everything a handler receives for one run.
///
/// Handlers ignore the parts they do not need.
#[derive(Clone)]
pub struct Invocation {
    pub sender_id: String,
    pub args: CommandArgs,
    pub auth_token: Secret<String>,
    pub send: Arc<dyn ChannelOutbound>,
    pub image: Option<ImageRef>,
}

impl Invocation {
    /// Send a single payload back to the sender.
    pub async fn reply(&self, payload: &OutboundPayload) -> Result<()> {
        self.send
            .send(&self.sender_id, payload, &self.auth_token)
            .await
    }

    pub async fn reply_text(&self, text: &str) -> Result<()> {
        self.reply(&OutboundPayload::text(text)).await
    }
}

impl std::fmt::Debug for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invocation")
            .field("sender_id", &self.sender_id)
            .field("args", &self.args)
            .field("auth_token", &"[REDACTED]")
            .field("image", &self.image)
            .finish()
    }
}

/// Uniform invocation contract implemented by every command.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    fn description(&self) -> &str;

    fn usage(&self) -> Option<&str> {
        None
    }

    async fn execute(&self, invocation: Invocation) -> Result<()>;
}

/// A named, registered capability.
#[derive(Clone)]
pub struct Command {
    name: String,
    description: String,
    usage: Option<String>,
    required_role: Role,
    handler: Arc<dyn CommandHandler>,
}

impl Command {
    /// Wrap a handler under `name`, taking description and usage from it.
    pub fn new(name: impl Into<String>, handler: Arc<dyn CommandHandler>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            description: handler.description().to_string(),
            usage: handler.usage().map(String::from),
            required_role: Role::User,
            handler,
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.required_role = role;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn usage(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    pub fn required_role(&self) -> Role {
        self.required_role
    }

    pub async fn execute(&self, invocation: Invocation) -> Result<()> {
        self.handler.execute(invocation).await
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("usage", &self.usage)
            .field("required_role", &self.required_role)
            .finish_non_exhaustive()
    }
}
