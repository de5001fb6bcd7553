use {
    pagebot_common::types::{AttachmentKind, ImageRef},
    serde::Serialize,
};

/// One attachment carried by an inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InboundAttachment {
    pub kind: AttachmentKind,
    pub url: Option<String>,
}

impl InboundAttachment {
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            kind: AttachmentKind::Image,
            url: Some(url.into()),
        }
    }
}

/// Platform-neutral inbound conversational event.
///
/// Built once per platform callback and dropped after dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InboundEvent {
    pub sender_id: String,
    /// Platform id of this message, when known.
    pub message_id: Option<String>,
    /// Trimmed message text.
    pub text: Option<String>,
    pub attachments: Vec<InboundAttachment>,
    /// Id of the message this one replies to.
    pub reply_to: Option<String>,
}

impl InboundEvent {
    pub fn new(sender_id: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            ..Default::default()
        }
    }

    /// Set the message text. Surrounding whitespace is trimmed.
    #[must_use]
    pub fn with_text(mut self, text: impl AsRef<str>) -> Self {
        self.text = Some(text.as_ref().trim().to_string());
        self
    }

    #[must_use]
    pub fn with_attachment(mut self, attachment: InboundAttachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    #[must_use]
    pub fn with_reply_to(mut self, message_id: impl Into<String>) -> Self {
        self.reply_to = Some(message_id.into());
        self
    }

    #[must_use]
    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    /// First directly attached image, if any.
    pub fn direct_image(&self) -> Option<ImageRef> {
        self.attachments
            .iter()
            .filter(|a| a.kind == AttachmentKind::Image)
            .find_map(|a| a.url.as_deref().filter(|u| !u.is_empty()))
            .map(ImageRef::direct)
    }
}
