use {
    async_trait::async_trait,
    pagebot_channels::{AttachmentLookup, Error, Result},
    pagebot_common::types::ImageRef,
    secrecy::{ExposeSecret, Secret},
    serde::Deserialize,
    tracing::debug,
};

use crate::graph::GraphClient;

/// Resolves images on earlier messages via `GET /{message-id}/attachments`.
#[derive(Debug, Clone)]
pub struct GraphAttachmentLookup {
    graph: GraphClient,
}

#[derive(Debug, Deserialize)]
struct AttachmentsResponse {
    #[serde(default)]
    data: Vec<GraphAttachment>,
}

#[derive(Debug, Deserialize)]
struct GraphAttachment {
    mime_type: Option<String>,
    image_data: Option<ImageData>,
    file_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

impl GraphAttachment {
    fn image_url(&self) -> Option<&str> {
        if let Some(url) = self
            .image_data
            .as_ref()
            .and_then(|d| d.url.as_deref())
            .filter(|u| !u.is_empty())
        {
            return Some(url);
        }
        let is_image = self
            .mime_type
            .as_deref()
            .is_some_and(|m| m.starts_with("image/"));
        self.file_url.as_deref().filter(|_| is_image)
    }
}

impl GraphAttachmentLookup {
    pub fn new(graph: GraphClient) -> Self {
        Self { graph }
    }
}

#[async_trait]
impl AttachmentLookup for GraphAttachmentLookup {
    async fn image_for_message(
        &self,
        message_id: &str,
        auth_token: &Secret<String>,
    ) -> Result<Option<ImageRef>> {
        let message_id = message_id.trim();
        if message_id.is_empty() {
            return Err(Error::invalid_input("replied-to message id is empty"));
        }

        let url = self
            .graph
            .endpoint(&format!("{}/attachments", urlencoding::encode(message_id)));
        let resp = self
            .graph
            .http
            .get(url)
            .query(&[("access_token", auth_token.expose_secret())])
            .send()
            .await
            .map_err(|e| Error::external("attachment lookup request", e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::external("attachment lookup body", e))?;
        if !status.is_success() {
            return Err(Error::platform(status.as_u16(), body));
        }

        let parsed: AttachmentsResponse = serde_json::from_str(&body)?;
        let image = parsed
            .data
            .iter()
            .find_map(GraphAttachment::image_url)
            .map(ImageRef::reply);
        if image.is_none() {
            debug!(mid = message_id, "replied-to message has no image");
        }
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        mockito::Matcher,
        pagebot_common::types::ImageSource,
        serde_json::json,
    };

    fn lookup_for(server: &mockito::ServerGuard) -> GraphAttachmentLookup {
        GraphAttachmentLookup::new(GraphClient::new(
            reqwest::Client::new(),
            &server.url(),
            "v21.0",
        ))
    }

    fn token() -> Secret<String> {
        Secret::new("page-tok".into())
    }

    #[tokio::test]
    async fn returns_first_image_url() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v21.0/m_42/attachments")
            .match_query(Matcher::UrlEncoded("access_token".into(), "page-tok".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "data": [
                        { "id": "a1", "mime_type": "audio/mp4", "file_url": "https://cdn/a.mp4" },
                        { "id": "a2", "mime_type": "image/jpeg",
                          "image_data": { "url": "https://cdn/photo.jpg", "width": 10, "height": 10 } }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let image = lookup_for(&server)
            .image_for_message("m_42", &token())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(image.url, "https://cdn/photo.jpg");
        assert_eq!(image.source, ImageSource::Reply);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn image_file_url_is_accepted() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v21.0/m_1/attachments")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"data":[{"mime_type":"image/png","file_url":"https://cdn/f.png"}]}"#)
            .create_async()
            .await;

        let image = lookup_for(&server)
            .image_for_message("m_1", &token())
            .await
            .unwrap();
        assert_eq!(image.map(|i| i.url).as_deref(), Some("https://cdn/f.png"));
    }

    #[tokio::test]
    async fn message_without_image_is_none() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v21.0/m_1/attachments")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"data":[]}"#)
            .create_async()
            .await;

        let image = lookup_for(&server)
            .image_for_message("m_1", &token())
            .await
            .unwrap();
        assert!(image.is_none());
    }

    #[tokio::test]
    async fn platform_error_maps_to_typed_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v21.0/m_gone/attachments")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"error":{"message":"Unsupported get request."}}"#)
            .create_async()
            .await;

        let err = lookup_for(&server)
            .image_for_message("m_gone", &token())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Platform { status: 404, .. }));
    }

    #[tokio::test]
    async fn empty_message_id_is_rejected_without_request() {
        let server = mockito::Server::new_async().await;
        let err = lookup_for(&server)
            .image_for_message("  ", &token())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }
}
