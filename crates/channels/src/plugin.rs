use {
    anyhow::Result,
    async_trait::async_trait,
    pagebot_common::types::{ImageRef, OutboundPayload},
    secrecy::Secret,
};

/// Send messages to a channel.
///
/// Implementations deliver one payload per call; callers that need ordering
/// across several payloads must await each send before issuing the next.
#[async_trait]
pub trait ChannelOutbound: Send + Sync {
    async fn send(
        &self,
        recipient_id: &str,
        payload: &OutboundPayload,
        auth_token: &Secret<String>,
    ) -> Result<()>;

    /// Convenience wrapper for a plain text message.
    async fn send_text(
        &self,
        recipient_id: &str,
        text: &str,
        auth_token: &Secret<String>,
    ) -> Result<()> {
        self.send(recipient_id, &OutboundPayload::text(text), auth_token)
            .await
    }
}

/// Look up images on previously sent platform messages.
#[async_trait]
pub trait AttachmentLookup: Send + Sync {
    /// Return the first image attached to `message_id`, or `None` when the
    /// message carries no image.
    async fn image_for_message(
        &self,
        message_id: &str,
        auth_token: &Secret<String>,
    ) -> crate::Result<Option<ImageRef>>;
}
