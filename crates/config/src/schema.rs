//! Config schema types.

use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagebotConfig {
    pub server: ServerConfig,
    pub messenger: MessengerConfig,
    pub routing: RoutingConfig,
    pub backends: BackendsConfig,
    /// Commands to register at startup, in order.
    pub commands: Vec<CommandDescriptor>,
}

impl Default for PagebotConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            messenger: MessengerConfig::default(),
            routing: RoutingConfig::default(),
            backends: BackendsConfig::default(),
            commands: default_commands(),
        }
    }
}

fn default_commands() -> Vec<CommandDescriptor> {
    ["ai", "imagine", "image"]
        .into_iter()
        .map(CommandDescriptor::builtin)
        .collect()
}

/// HTTP listener for the webhook gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Path the platform posts webhook events to.
    pub webhook_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".into(),
            port: 3000,
            webhook_path: "/webhook".into(),
        }
    }
}

/// Messenger page credentials and Graph API endpoint.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessengerConfig {
    /// Page access token passed to every Send/Graph API call.
    #[serde(serialize_with = "serialize_secret")]
    pub page_access_token: Secret<String>,

    /// Token echoed back during webhook subscription verification.
    #[serde(serialize_with = "serialize_secret")]
    pub verify_token: Secret<String>,

    /// App secret used to check `X-Hub-Signature-256` on webhook POSTs.
    /// When empty, signatures are not checked.
    #[serde(serialize_with = "serialize_secret")]
    pub app_secret: Secret<String>,

    pub graph_api_base: String,
    pub graph_api_version: String,
}

impl std::fmt::Debug for MessengerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessengerConfig")
            .field("page_access_token", &"[REDACTED]")
            .field("verify_token", &"[REDACTED]")
            .field("app_secret", &"[REDACTED]")
            .field("graph_api_base", &self.graph_api_base)
            .field("graph_api_version", &self.graph_api_version)
            .finish()
    }
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            page_access_token: Secret::new(String::new()),
            verify_token: Secret::new(String::new()),
            app_secret: Secret::new(String::new()),
            graph_api_base: "https://graph.facebook.com".into(),
            graph_api_version: "v21.0".into(),
        }
    }
}

fn serialize_secret<S: serde::Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

/// When the reserved image command runs for a resolved image.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImagePolicy {
    /// Only when no explicitly named command handled the text.
    #[default]
    Unclaimed,
    /// For every resolved image.
    Always,
    /// Never; images are only passed along to text commands.
    Never,
}

/// Dispatcher behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Optional command prefix stripped before lookup (e.g. `/`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Command receiving unmatched text.
    pub fallback_command: String,
    /// Command receiving resolved images.
    pub image_command: String,
    pub image_policy: ImagePolicy,
    /// Sender ids (or `*` globs) allowed to run admin commands.
    pub admins: Vec<String>,
    /// Maximum characters per outbound text message.
    pub max_message_len: usize,
    pub lookup_timeout_secs: u64,
    pub execution_timeout_secs: u64,
    pub messages: RoutingMessages,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            prefix: None,
            fallback_command: "ai".into(),
            image_command: "image".into(),
            image_policy: ImagePolicy::default(),
            admins: Vec::new(),
            max_message_len: 2000,
            lookup_timeout_secs: 10,
            execution_timeout_secs: 60,
            messages: RoutingMessages::default(),
        }
    }
}

/// User-visible replies produced by the dispatcher itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingMessages {
    pub denied: String,
    pub failed: String,
    pub image_failed: String,
}

impl Default for RoutingMessages {
    fn default() -> Self {
        Self {
            denied: "You are not allowed to use this command.".into(),
            failed: "There was an error executing that command.".into(),
            image_failed: "There was an error processing your image.".into(),
        }
    }
}

/// HTTP backends used by the built-in commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendsConfig {
    /// Text completion endpoint, called as `GET {ai_url}?prompt=..`.
    pub ai_url: String,
    /// Image generation endpoint; the generated image URL is
    /// `{imagine_url}?prompt=..`.
    pub imagine_url: String,
    /// Image understanding endpoint, called as `GET {vision_url}?prompt=..&url=..`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vision_url: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for BackendsConfig {
    fn default() -> Self {
        Self {
            ai_url: "https://heru-ai-1kgm.vercel.app/heru".into(),
            imagine_url: "https://ccprojectsjonellapis-production.up.railway.app/api/generate-art"
                .into(),
            vision_url: None,
            request_timeout_secs: 30,
        }
    }
}

/// Authorization level gating access to a command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Anyone may run the command.
    #[default]
    User,
    /// Only senders on `routing.admins`.
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    pub fn is_restricted(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "user" | "everyone" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Declarative command entry, resolved against the handler catalog at load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    pub name: String,
    /// Handler catalog key; defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
    /// Role name, validated when the registry loads.
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
}

fn default_role() -> String {
    Role::User.as_str().into()
}

impl CommandDescriptor {
    /// Descriptor for a built-in handler registered under its own key.
    pub fn builtin(name: &str) -> Self {
        Self {
            name: name.into(),
            handler: None,
            role: default_role(),
            description: None,
            usage: None,
        }
    }

    pub fn handler_key(&self) -> &str {
        self.handler.as_deref().unwrap_or(&self.name)
    }
}
