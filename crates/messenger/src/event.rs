use {
    pagebot_channels::{InboundAttachment, InboundEvent},
    pagebot_common::types::AttachmentKind,
    serde::Deserialize,
    tracing::debug,
};

/// Body of a page webhook POST.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    pub object: String,
    #[serde(default)]
    pub entry: Vec<WebhookEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEntry {
    pub id: Option<String>,
    pub time: Option<i64>,
    #[serde(default)]
    pub messaging: Vec<MessagingEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagingEvent {
    pub sender: Option<Participant>,
    pub recipient: Option<Participant>,
    pub timestamp: Option<i64>,
    pub message: Option<MessengerMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Participant {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessengerMessage {
    pub mid: Option<String>,
    pub text: Option<String>,
    #[serde(default)]
    pub attachments: Vec<MessengerAttachment>,
    pub reply_to: Option<ReplyTo>,
    #[serde(default)]
    pub is_echo: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessengerAttachment {
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    pub payload: Option<MessengerAttachmentPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessengerAttachmentPayload {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplyTo {
    pub mid: Option<String>,
}

impl WebhookPayload {
    /// Page subscriptions use `object = "page"`; anything else is not ours.
    pub fn is_page(&self) -> bool {
        self.object == "page"
    }

    /// Every routable event in the payload, in delivery order.
    pub fn inbound_events(&self) -> Vec<InboundEvent> {
        self.entry
            .iter()
            .flat_map(|entry| entry.messaging.iter())
            .filter_map(MessagingEvent::to_inbound)
            .collect()
    }
}

impl MessagingEvent {
    pub fn sender_id(&self) -> Option<&str> {
        self.sender
            .as_ref()
            .and_then(|s| s.id.as_deref())
            .filter(|id| !id.is_empty())
    }

    /// Convert to a platform-neutral event.
    ///
    /// Returns `None` for events without a sender, without a message
    /// (delivery/read receipts), and for echoes of the page's own messages.
    pub fn to_inbound(&self) -> Option<InboundEvent> {
        let Some(sender_id) = self.sender_id() else {
            debug!("skipping messaging event without sender id");
            return None;
        };
        let message = self.message.as_ref()?;
        if message.is_echo {
            return None;
        }

        let mut event = InboundEvent::new(sender_id);
        if let Some(text) = message.text.as_deref().filter(|t| !t.trim().is_empty()) {
            event = event.with_text(text);
        }
        if let Some(mid) = message.mid.as_deref() {
            event = event.with_message_id(mid);
        }
        if let Some(reply_mid) = message
            .reply_to
            .as_ref()
            .and_then(|r| r.mid.as_deref())
            .filter(|mid| !mid.is_empty())
        {
            event = event.with_reply_to(reply_mid);
        }
        for attachment in &message.attachments {
            event = event.with_attachment(InboundAttachment {
                kind: attachment.kind.clone(),
                url: attachment.payload.as_ref().and_then(|p| p.url.clone()),
            });
        }
        Some(event)
    }
}
