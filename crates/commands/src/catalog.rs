use std::{collections::HashMap, sync::Arc, time::Duration};

use pagebot_config::BackendsConfig;

use crate::{
    builtin::{AiCommand, ImageCommand, ImagineCommand},
    command::CommandHandler,
};

/// Handlers available to command descriptors, keyed by handler name.
#[derive(Default, Clone)]
pub struct HandlerCatalog {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl HandlerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of the built-in handlers (`ai`, `imagine`, `image`).
    pub fn builtin(backends: &BackendsConfig, max_message_len: usize) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(backends.request_timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build backend client: {e}"))?;

        let mut catalog = Self::new();
        catalog.insert(
            "ai",
            Arc::new(AiCommand::new(
                http.clone(),
                &backends.ai_url,
                max_message_len,
            )),
        );
        catalog.insert("imagine", Arc::new(ImagineCommand::new(&backends.imagine_url)));
        catalog.insert(
            "image",
            Arc::new(ImageCommand::new(
                http,
                backends.vision_url.as_deref(),
                max_message_len,
            )),
        );
        Ok(catalog)
    }

    pub fn insert(&mut self, key: impl Into<String>, handler: Arc<dyn CommandHandler>) {
        self.handlers.insert(key.into().to_lowercase(), handler);
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(&key.to_lowercase()).cloned()
    }

    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_default_handlers() {
        let catalog = HandlerCatalog::builtin(&BackendsConfig::default(), 2000).unwrap();
        assert_eq!(catalog.keys(), ["ai", "image", "imagine"]);
        assert!(catalog.get("AI").is_some());
    }
}
