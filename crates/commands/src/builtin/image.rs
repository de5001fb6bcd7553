use {
    anyhow::Result, async_trait::async_trait, pagebot_auto_reply::send_chunked, tracing::debug,
};

use {
    super::fetch_response,
    crate::command::{CommandHandler, Invocation},
};

const DEFAULT_PROMPT: &str = "Describe this image.";
const NO_IMAGE: &str = "Send an image, or reply to one, and I will describe it.";
const NOT_CONFIGURED: &str = "Image analysis is not configured on this page.";

/// Image understanding; the dispatcher's reserved image route.
pub struct ImageCommand {
    http: reqwest::Client,
    endpoint: Option<String>,
    max_message_len: usize,
}

impl ImageCommand {
    pub fn new(http: reqwest::Client, endpoint: Option<&str>, max_message_len: usize) -> Self {
        Self {
            http,
            endpoint: endpoint.map(String::from).filter(|e| !e.trim().is_empty()),
            max_message_len,
        }
    }
}

#[async_trait]
impl CommandHandler for ImageCommand {
    fn description(&self) -> &str {
        "Describe or answer questions about an image"
    }

    fn usage(&self) -> Option<&str> {
        Some("image [question] (with an attached or replied-to image)")
    }

    async fn execute(&self, invocation: Invocation) -> Result<()> {
        let Some(image) = invocation.image.as_ref() else {
            return invocation.reply_text(NO_IMAGE).await;
        };
        let Some(endpoint) = self.endpoint.as_deref() else {
            return invocation.reply_text(NOT_CONFIGURED).await;
        };

        let question = invocation.args.joined();
        let prompt = match question.trim() {
            "" => DEFAULT_PROMPT,
            q => q,
        };
        debug!(sender_id = %invocation.sender_id, source = ?image.source, "querying vision backend");
        let answer = fetch_response(&self.http, endpoint, &[
            ("prompt", prompt),
            ("url", image.url.as_str()),
        ])
        .await?;
        send_chunked(
            invocation.send.as_ref(),
            &invocation.sender_id,
            &answer,
            &invocation.auth_token,
            self.max_message_len,
        )
        .await?;
        Ok(())
    }
}
