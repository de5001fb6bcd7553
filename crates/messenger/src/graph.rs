use std::time::Duration;

use pagebot_config::MessengerConfig;

/// Thin Graph API endpoint builder shared by the Send API and attachment
/// lookup.
#[derive(Debug, Clone)]
pub struct GraphClient {
    pub(crate) http: reqwest::Client,
    base_url: String,
    version: String,
}

impl GraphClient {
    /// Build a client from page config with a per-request timeout.
    pub fn from_config(config: &MessengerConfig, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build Graph API client: {e}"))?;
        Ok(Self::new(
            http,
            &config.graph_api_base,
            &config.graph_api_version,
        ))
    }

    pub fn new(http: reqwest::Client, base_url: &str, version: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            version: version.trim_matches('/').to_string(),
        }
    }

    /// Absolute URL for a versioned Graph API path.
    pub fn endpoint(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if self.version.is_empty() {
            format!("{}/{path}", self.base_url)
        } else {
            format!("{}/{}/{path}", self.base_url, self.version)
        }
    }
}
