//! Built-in command handlers backed by HTTP text/image services.

mod ai;
mod image;
mod imagine;

pub use {ai::AiCommand, image::ImageCommand, imagine::ImagineCommand};

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct BackendReply {
    response: Option<String>,
}

/// Call a backend with query parameters and return its `response` field.
async fn fetch_response(
    http: &reqwest::Client,
    endpoint: &str,
    query: &[(&str, &str)],
) -> anyhow::Result<String> {
    let resp = http.get(endpoint).query(query).send().await?;
    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("backend request failed ({status}): {body}");
    }
    let reply: BackendReply = resp.json().await?;
    reply
        .response
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| anyhow::anyhow!("backend returned no response text"))
}
