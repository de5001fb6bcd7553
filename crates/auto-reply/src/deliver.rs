use {
    anyhow::Result,
    pagebot_channels::ChannelOutbound,
    secrecy::Secret,
    tracing::debug,
};

use crate::chunk::split;

/// Send `text` to `recipient_id`, splitting it into word-safe chunks when it
/// exceeds `max_len` characters.
///
/// Chunks are sent one at a time and in order; each send is awaited before
/// the next starts. The first failed send aborts delivery of the remaining
/// chunks. Returns the number of messages sent.
pub async fn send_chunked(
    outbound: &dyn ChannelOutbound,
    recipient_id: &str,
    text: &str,
    auth_token: &Secret<String>,
    max_len: usize,
) -> Result<usize> {
    if text.trim().is_empty() {
        debug!(recipient_id, "skipping empty reply");
        return Ok(0);
    }

    if text.chars().count() <= max_len {
        outbound.send_text(recipient_id, text, auth_token).await?;
        return Ok(1);
    }

    let chunks = split(text, max_len);
    debug!(recipient_id, chunks = chunks.len(), "sending reply in chunks");
    for (sent, chunk) in chunks.iter().enumerate() {
        outbound
            .send_text(recipient_id, chunk, auth_token)
            .await
            .map_err(|e| e.context(format!("sending chunk {} of {}", sent + 1, chunks.len())))?;
    }
    Ok(chunks.len())
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        async_trait::async_trait,
        pagebot_common::types::OutboundPayload,
        std::sync::Mutex,
    };

    #[derive(Default)]
    struct RecordingOutbound {
        sent: Mutex<Vec<(String, OutboundPayload)>>,
        fail_on: Option<usize>,
    }

    #[async_trait]
    impl ChannelOutbound for RecordingOutbound {
        async fn send(
            &self,
            recipient_id: &str,
            payload: &OutboundPayload,
            _auth_token: &Secret<String>,
        ) -> Result<()> {
            let mut sent = self.sent.lock().unwrap();
            if self.fail_on == Some(sent.len()) {
                anyhow::bail!("send api unavailable");
            }
            sent.push((recipient_id.to_string(), payload.clone()));
            Ok(())
        }
    }

    fn token() -> Secret<String> {
        Secret::new("page-token".into())
    }

    #[tokio::test]
    async fn short_text_is_sent_verbatim() {
        let outbound = RecordingOutbound::default();
        let text = "line one\nline two";
        let count = send_chunked(&outbound, "42", text, &token(), 2000)
            .await
            .unwrap();
        assert_eq!(count, 1);
        let sent = outbound.sent.lock().unwrap();
        assert_eq!(sent[0].1.as_text(), Some(text));
    }

    #[tokio::test]
    async fn long_text_is_sent_in_order() {
        let outbound = RecordingOutbound::default();
        let text = (0..60).map(|i| format!("w{i:02}")).collect::<Vec<_>>().join(" ");
        let count = send_chunked(&outbound, "42", &text, &token(), 20)
            .await
            .unwrap();

        let sent = outbound.sent.lock().unwrap();
        assert_eq!(count, sent.len());
        assert!(count > 1);
        assert!(sent.iter().all(|(to, _)| to == "42"));
        let rejoined = sent
            .iter()
            .filter_map(|(_, p)| p.as_text())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rejoined, text);
    }

    #[tokio::test]
    async fn failed_send_stops_remaining_chunks() {
        let outbound = RecordingOutbound {
            fail_on: Some(1),
            ..Default::default()
        };
        let text = "alpha beta gamma delta epsilon";
        let err = send_chunked(&outbound, "42", text, &token(), 10)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("chunk 2 of"));
        assert_eq!(outbound.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn blank_text_sends_nothing() {
        let outbound = RecordingOutbound::default();
        let count = send_chunked(&outbound, "42", "   ", &token(), 2000)
            .await
            .unwrap();
        assert_eq!(count, 0);
        assert!(outbound.sent.lock().unwrap().is_empty());
    }
}
