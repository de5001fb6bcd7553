use {
    hmac::{Hmac, Mac},
    secrecy::{ExposeSecret, Secret},
    serde::Deserialize,
    sha2::Sha256,
    tracing::warn,
};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the `sha256=<hex>` HMAC of a webhook POST body.
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

/// Query parameters of the webhook subscription handshake.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyQuery {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// Return the challenge to echo back when the handshake is valid.
///
/// The handshake is valid when the mode is `subscribe` and the token matches
/// the configured, non-empty verify token.
pub fn verify_subscription(query: &VerifyQuery, expected: &Secret<String>) -> Option<String> {
    let expected = expected.expose_secret();
    if expected.is_empty() {
        warn!("webhook verification attempted but no verify token is configured");
        return None;
    }
    if query.mode.as_deref() != Some("subscribe") {
        return None;
    }
    if query.verify_token.as_deref() != Some(expected.as_str()) {
        warn!("webhook verification failed: verify token mismatch");
        return None;
    }
    query.challenge.clone()
}

/// Hex HMAC-SHA256 of `body` keyed with the app secret, as sent after the
/// `sha256=` prefix of [`SIGNATURE_HEADER`].
pub fn body_signature(body: &[u8], app_secret: &Secret<String>) -> Option<String> {
    let mut mac = match HmacSha256::new_from_slice(app_secret.expose_secret().as_bytes()) {
        Ok(m) => m,
        Err(_) => {
            warn!("failed to create HMAC");
            return None;
        },
    };
    mac.update(body);
    Some(hex::encode(mac.finalize().into_bytes()))
}

/// Check the `X-Hub-Signature-256` header value against the raw body.
pub fn verify_signature(body: &[u8], signature_header: &str, app_secret: &Secret<String>) -> bool {
    let Some(expected) = signature_header.strip_prefix("sha256=") else {
        warn!("invalid signature header format (missing sha256= prefix)");
        return false;
    };
    let Some(computed) = body_signature(body, app_secret) else {
        return false;
    };
    constant_time_eq(&computed, &expected.to_ascii_lowercase())
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0, |acc, (x, y)| acc | (x ^ y))
        == 0
}
