use {
    anyhow::Result, async_trait::async_trait, pagebot_common::types::OutboundPayload,
};

use crate::command::{CommandHandler, Invocation};

const MISSING_PROMPT: &str =
    "Please provide a prompt for image generation.\n\nExample: imagine a cat";

/// Image generation: replies with an image attachment whose URL renders the
/// prompt on the generation backend.
pub struct ImagineCommand {
    endpoint: String,
}

impl ImagineCommand {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
        }
    }

    fn image_url(&self, prompt: &str) -> String {
        let separator = if self.endpoint.contains('?') {
            '&'
        } else {
            '?'
        };
        format!(
            "{}{separator}prompt={}",
            self.endpoint,
            urlencoding::encode(prompt)
        )
    }
}

#[async_trait]
impl CommandHandler for ImagineCommand {
    fn description(&self) -> &str {
        "Generate an image from a prompt"
    }

    fn usage(&self) -> Option<&str> {
        Some("imagine <prompt>")
    }

    async fn execute(&self, invocation: Invocation) -> Result<()> {
        if invocation.args.is_empty() {
            return invocation.reply_text(MISSING_PROMPT).await;
        }
        let prompt = invocation.args.joined();
        invocation
            .reply(&OutboundPayload::image(self.image_url(prompt.trim())))
            .await
    }
}
