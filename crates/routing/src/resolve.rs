use std::{sync::Arc, time::Duration};

use {
    pagebot_channels::{AttachmentLookup, InboundEvent},
    pagebot_common::types::ImageRef,
    secrecy::Secret,
    tracing::{debug, warn},
};

/// Finds the image an event refers to.
///
/// A direct image attachment wins and needs no network call. Otherwise the
/// replied-to message, if any, is looked up through the platform. Lookup
/// failures and timeouts resolve to `None`; they never abort dispatch.
pub struct AttachmentResolver {
    lookup: Arc<dyn AttachmentLookup>,
    timeout: Duration,
}

impl AttachmentResolver {
    pub fn new(lookup: Arc<dyn AttachmentLookup>, timeout: Duration) -> Self {
        Self { lookup, timeout }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn resolve(
        &self,
        event: &InboundEvent,
        auth_token: &Secret<String>,
    ) -> Option<ImageRef> {
        if let Some(image) = event.direct_image() {
            return Some(image);
        }
        let message_id = event.reply_to.as_deref().filter(|m| !m.is_empty())?;

        match tokio::time::timeout(
            self.timeout,
            self.lookup.image_for_message(message_id, auth_token),
        )
        .await
        {
            Ok(Ok(Some(image))) => Some(image),
            Ok(Ok(None)) => {
                debug!(message_id, "replied-to message has no image");
                None
            },
            Ok(Err(e)) => {
                warn!(message_id, error = %e, "attachment lookup failed");
                None
            },
            Err(_) => {
                warn!(message_id, timeout = ?self.timeout, "attachment lookup timed out");
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::testing::{LookupBehavior, MockLookup},
        pagebot_channels::InboundAttachment,
        pagebot_common::types::ImageSource,
    };

    fn token() -> Secret<String> {
        Secret::new("page-tok".into())
    }

    fn resolver(lookup: &Arc<MockLookup>) -> AttachmentResolver {
        AttachmentResolver::new(lookup.clone(), Duration::from_millis(100))
    }

    #[tokio::test]
    async fn direct_image_skips_lookup() {
        let lookup = Arc::new(MockLookup::new(LookupBehavior::Found("https://cdn/old.jpg")));
        let event = InboundEvent::new("u")
            .with_attachment(InboundAttachment::image("https://cdn/new.jpg"))
            .with_reply_to("m_1");

        let image = resolver(&lookup).resolve(&event, &token()).await.unwrap();
        assert_eq!(image.url, "https://cdn/new.jpg");
        assert_eq!(image.source, ImageSource::Direct);
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn reply_image_is_looked_up() {
        let lookup = Arc::new(MockLookup::new(LookupBehavior::Found("https://cdn/old.jpg")));
        let event = InboundEvent::new("u").with_reply_to("m_1");

        let image = resolver(&lookup).resolve(&event, &token()).await.unwrap();
        assert_eq!(image, ImageRef::reply("https://cdn/old.jpg"));
        assert_eq!(lookup.requested(), ["m_1"]);
    }

    #[tokio::test]
    async fn no_image_anywhere() {
        let lookup = Arc::new(MockLookup::new(LookupBehavior::Found("https://cdn/x.jpg")));
        let event = InboundEvent::new("u").with_text("hello");
        assert!(resolver(&lookup).resolve(&event, &token()).await.is_none());
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn lookup_failure_resolves_to_none() {
        let lookup = Arc::new(MockLookup::new(LookupBehavior::Fail));
        let event = InboundEvent::new("u").with_reply_to("m_1");
        assert!(resolver(&lookup).resolve(&event, &token()).await.is_none());
        assert_eq!(lookup.calls(), 1);
    }

    #[tokio::test]
    async fn slow_lookup_times_out() {
        let lookup = Arc::new(MockLookup::new(LookupBehavior::Hang));
        let event = InboundEvent::new("u").with_reply_to("m_1");
        assert!(resolver(&lookup).resolve(&event, &token()).await.is_none());
    }

    #[tokio::test]
    async fn replied_message_without_image() {
        let lookup = Arc::new(MockLookup::new(LookupBehavior::Empty));
        let event = InboundEvent::new("u").with_reply_to("m_1");
        assert!(resolver(&lookup).resolve(&event, &token()).await.is_none());
    }
}
