use {
    anyhow::Result, async_trait::async_trait, pagebot_auto_reply::send_chunked, tracing::debug,
};

use {
    super::fetch_response,
    crate::command::{CommandHandler, Invocation},
};

const EMPTY_PROMPT_HINT: &str = "Please ask me something.\n\nExample: ai what is the speed of light?";

/// Conversational assistant; also the default fallback route.
pub struct AiCommand {
    http: reqwest::Client,
    endpoint: String,
    max_message_len: usize,
}

impl AiCommand {
    pub fn new(http: reqwest::Client, endpoint: &str, max_message_len: usize) -> Self {
        Self {
            http,
            endpoint: endpoint.to_string(),
            max_message_len,
        }
    }
}

#[async_trait]
impl CommandHandler for AiCommand {
    fn description(&self) -> &str {
        "Ask the AI assistant a question"
    }

    fn usage(&self) -> Option<&str> {
        Some("ai <question>")
    }

    async fn execute(&self, invocation: Invocation) -> Result<()> {
        let prompt = invocation.args.joined();
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return invocation.reply_text(EMPTY_PROMPT_HINT).await;
        }

        debug!(sender_id = %invocation.sender_id, "querying ai backend");
        let answer = fetch_response(&self.http, &self.endpoint, &[("prompt", prompt)]).await?;
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
