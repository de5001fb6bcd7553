use std::{sync::Arc, time::Duration};

use {
    pagebot_channels::{AttachmentLookup, ChannelOutbound},
    pagebot_commands::{CommandRegistry, HandlerCatalog},
    pagebot_config::PagebotConfig,
    pagebot_messenger::{GraphAttachmentLookup, GraphClient, MessengerOutbound},
    pagebot_routing::Dispatcher,
    secrecy::{ExposeSecret, Secret},
    tracing::warn,
};

/// Shared gateway state handed to every request handler.
pub struct GatewayState {
    pub dispatcher: Arc<Dispatcher>,
    /// Token the platform must echo during the subscription handshake.
    pub verify_token: Secret<String>,
    /// Key for `X-Hub-Signature-256`; empty disables the check.
    pub app_secret: Secret<String>,
    pub version: String,
    pub started_at: std::time::Instant,
}

impl GatewayState {
    pub fn new(
        dispatcher: Dispatcher,
        verify_token: Secret<String>,
        app_secret: Secret<String>,
    ) -> Arc<Self> {
        Arc::new(Self {
            dispatcher: Arc::new(dispatcher),
            verify_token,
            app_secret,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: std::time::Instant::now(),
        })
    }

    /// Wire the Messenger adapter, built-in command handlers and the
    /// dispatcher from a loaded configuration.
    ///
    /// Malformed command descriptors are skipped (and logged) rather than
    /// failing startup.
    pub fn from_config(config: &PagebotConfig) -> anyhow::Result<Arc<Self>> {
        let request_timeout = Duration::from_secs(config.backends.request_timeout_secs);
        let graph = GraphClient::from_config(&config.messenger, request_timeout)?;
        let outbound: Arc<dyn ChannelOutbound> = Arc::new(MessengerOutbound::new(graph.clone()));
        let lookup: Arc<dyn AttachmentLookup> = Arc::new(GraphAttachmentLookup::new(graph));

        let catalog = HandlerCatalog::builtin(&config.backends, config.routing.max_message_len)?;
        let (registry, errors) = CommandRegistry::load(&config.commands, &catalog);
        if !errors.is_empty() {
            warn!(
                skipped = errors.len(),
                "some configured commands were not registered"
            );
        }

        let dispatcher = Dispatcher::new(
            Arc::new(registry),
            lookup,
            outbound,
            config.messenger.page_access_token.clone(),
            config.routing.clone(),
        );
        if config.messenger.app_secret.expose_secret().is_empty() {
            warn!("messenger.app_secret is empty; webhook signatures will not be checked");
        }
        Ok(Self::new(
            dispatcher,
            config.messenger.verify_token.clone(),
            config.messenger.app_secret.clone(),
        ))
    }

    pub fn checks_signatures(&self) -> bool {
        !self.app_secret.expose_secret().is_empty()
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
