use std::sync::Arc;

use {
    axum::{
        Router,
        body::Bytes,
        extract::{Query, State},
        http::{HeaderMap, StatusCode},
        response::{IntoResponse, Json, Response},
        routing::get,
    },
    pagebot_config::PagebotConfig,
    pagebot_messenger::{
        SIGNATURE_HEADER, VerifyQuery, WebhookPayload, verify_signature, verify_subscription,
    },
    tracing::{debug, info, warn},
};

use crate::state::GatewayState;

const EVENT_RECEIVED: &str = "EVENT_RECEIVED";

// ── Server startup ───────────────────────────────────────────────────────────

/// Build the gateway router (shared between production startup and tests).
pub fn build_gateway_app(state: Arc<GatewayState>, webhook_path: &str) -> Router {
    let webhook_path = if webhook_path.starts_with('/') {
        webhook_path.to_string()
    } else {
        format!("/{webhook_path}")
    };

    Router::new()
        .route("/health", get(health_handler))
        .route(&webhook_path, get(verify_handler).post(webhook_handler))
        .with_state(state)
}

/// Build the gateway from config and serve it until Ctrl-C.
pub async fn start_gateway(config: &PagebotConfig) -> anyhow::Result<()> {
    let state = GatewayState::from_config(config)?;
    let commands = state.dispatcher.registry().len();
    let app = build_gateway_app(state, &config.server.webhook_path);

    let listener =
        tokio::net::TcpListener::bind((config.server.bind.as_str(), config.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(
        %addr,
        webhook = %config.server.webhook_path,
        commands,
        "gateway listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

// ── Handlers ─────────────────────────────────────────────────────────────────

async fn health_handler(State(state): State<Arc<GatewayState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": state.version,
        "uptime_secs": state.uptime().as_secs(),
        "commands": state.dispatcher.registry().len(),
    }))
}

async fn verify_handler(
    State(state): State<Arc<GatewayState>>,
    Query(query): Query<VerifyQuery>,
) -> Response {
    match verify_subscription(&query, &state.verify_token) {
        Some(challenge) => {
            info!("webhook subscription verified");
            (StatusCode::OK, challenge).into_response()
        },
        None => StatusCode::FORBIDDEN.into_response(),
    }
}

/// Acknowledge immediately; each event is dispatched on its own task so a
/// slow or failing handler never delays the platform or other senders.
///
/// When an app secret is configured the raw body must carry a valid
/// `X-Hub-Signature-256` before it is parsed.
async fn webhook_handler(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if state.checks_signatures() {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !verify_signature(&body, signature, &state.app_secret) {
            warn!(
                has_header = headers.contains_key(SIGNATURE_HEADER),
                "rejecting webhook with bad signature"
            );
            return StatusCode::FORBIDDEN.into_response();
        }
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            debug!(error = %e, "malformed webhook body");
            return StatusCode::BAD_REQUEST.into_response();
        },
    };
    if !payload.is_page() {
        debug!(object = %payload.object, "ignoring non-page webhook");
        return StatusCode::NOT_FOUND.into_response();
    }

    let events = payload.inbound_events();
    debug!(count = events.len(), "received page events");
    for event in events {
        let dispatcher = Arc::clone(&state.dispatcher);
        tokio::spawn(async move {
            let outcome = dispatcher.dispatch(&event).await;
            debug!(sender_id = %event.sender_id, ?outcome, "event dispatched");
        });
    }
    (StatusCode::OK, EVENT_RECEIVED).into_response()
}
