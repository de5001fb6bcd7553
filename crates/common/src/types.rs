use serde::{Deserialize, Serialize};

/// Where a resolved image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    /// Attached to the inbound message itself.
    Direct,
    /// Looked up from the message the sender replied to.
    Reply,
}

/// Reference to an image associated with one inbound event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    pub source: ImageSource,
}

impl ImageRef {
    pub fn direct(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source: ImageSource::Direct,
        }
    }

    pub fn reply(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source: ImageSource::Reply,
        }
    }
}

/// Kind of media carried by an attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Audio,
    Video,
    File,
    #[serde(other)]
    Other,
}

/// Attachment URL wrapper, matching the platform's `payload` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentPayload {
    pub url: String,
}

/// Message body handed to a send capability.
///
/// Serializes to `{ "text": .. }` or
/// `{ "attachment": { "type": .., "payload": { "url": .. } } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OutboundPayload {
    Text {
        text: String,
    },
    Attachment {
        attachment: OutboundAttachment,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundAttachment {
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    pub payload: AttachmentPayload,
}

impl OutboundPayload {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self::Attachment {
            attachment: OutboundAttachment {
                kind: AttachmentKind::Image,
                payload: AttachmentPayload { url: url.into() },
            },
        }
    }

    /// Text body, if this is a text payload.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Attachment { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_payload_wire_shape() {
        let value = serde_json::to_value(OutboundPayload::text("hi")).unwrap();
        assert_eq!(value, serde_json::json!({ "text": "hi" }));
    }

    #[test]
    fn image_payload_wire_shape() {
        let value = serde_json::to_value(OutboundPayload::image("https://x/cat.png")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "attachment": { "type": "image", "payload": { "url": "https://x/cat.png" } }
            })
        );
    }

    #[test]
    fn unknown_attachment_kind_maps_to_other() {
        let kind: AttachmentKind = serde_json::from_str("\"fallback\"").unwrap();
        assert_eq!(kind, AttachmentKind::Other);
    }
}
