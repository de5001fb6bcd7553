//! Webhook gateway: the HTTP surface between the page platform and the
//! dispatcher.
//!
//! `GET {webhook_path}` answers the subscription handshake, `POST
//! {webhook_path}` acknowledges page events immediately and dispatches each
//! one on its own task, and `GET /health` reports liveness.

pub mod server;
pub mod state;

pub use {
    server::{build_gateway_app, start_gateway},
    state::GatewayState,
};
