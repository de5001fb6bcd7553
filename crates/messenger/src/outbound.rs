use {
    anyhow::Result,
    async_trait::async_trait,
    pagebot_channels::ChannelOutbound,
    pagebot_common::types::OutboundPayload,
    secrecy::{ExposeSecret, Secret},
    serde::Serialize,
    tracing::debug,
};

use crate::graph::GraphClient;

/// Send API adapter for a Messenger page.
#[derive(Debug, Clone)]
pub struct MessengerOutbound {
    graph: GraphClient,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    recipient: Recipient<'a>,
    messaging_type: &'static str,
    message: &'a OutboundPayload,
}

#[derive(Serialize)]
struct Recipient<'a> {
    id: &'a str,
}

impl MessengerOutbound {
    pub fn new(graph: GraphClient) -> Self {
        Self { graph }
    }
}

#[async_trait]
impl ChannelOutbound for MessengerOutbound {
    async fn send(
        &self,
        recipient_id: &str,
        payload: &OutboundPayload,
        auth_token: &Secret<String>,
    ) -> Result<()> {
        let body = SendRequest {
            recipient: Recipient { id: recipient_id },
            messaging_type: "RESPONSE",
            message: payload,
        };
        let resp = self
            .graph
            .http
            .post(self.graph.endpoint("me/messages"))
            .query(&[("access_token", auth_token.expose_secret())])
            .json(&body)
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Messenger send failed ({status}): {body}");
        }
        debug!(recipient_id, "messenger message sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, mockito::Matcher, serde_json::json};

    fn outbound_for(server: &mockito::ServerGuard) -> MessengerOutbound {
        MessengerOutbound::new(GraphClient::new(
            reqwest::Client::new(),
            &server.url(),
            "v21.0",
        ))
    }

    #[tokio::test]
    async fn posts_text_with_recipient_and_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v21.0/me/messages")
            .match_query(Matcher::UrlEncoded("access_token".into(), "page-tok".into()))
            .match_body(Matcher::Json(json!({
                "recipient": { "id": "USER_1" },
                "messaging_type": "RESPONSE",
                "message": { "text": "hello" }
            })))
            .with_status(200)
            .with_body(r#"{"recipient_id":"USER_1","message_id":"m_9"}"#)
            .create_async()
            .await;

        outbound_for(&server)
            .send_text("USER_1", "hello", &Secret::new("page-tok".into()))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn posts_image_attachment() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v21.0/me/messages")
            .match_query(Matcher::Any)
            .match_body(Matcher::PartialJson(json!({
                "message": {
                    "attachment": { "type": "image", "payload": { "url": "https://img/fox.png" } }
                }
            })))
            .with_status(200)
            .create_async()
            .await;

        outbound_for(&server)
            .send(
                "USER_1",
                &OutboundPayload::image("https://img/fox.png"),
                &Secret::new("t".into()),
            )
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn platform_error_is_reported_with_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v21.0/me/messages")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error":{"message":"Invalid OAuth access token."}}"#)
            .create_async()
            .await;

        let err = outbound_for(&server)
            .send_text("USER_1", "hello", &Secret::new("bad".into()))
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("400"), "{msg}");
        assert!(msg.contains("Invalid OAuth access token"), "{msg}");
    }
}
