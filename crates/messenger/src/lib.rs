//! Facebook Messenger page adapter.
//!
//! Parses page webhook payloads into [`pagebot_channels::InboundEvent`]s,
//! answers subscription verification, checks webhook signatures, delivers
//! replies through the Send API and looks up images on replied-to messages
//! through the Graph API.

pub mod attachments;
pub mod event;
pub mod graph;
pub mod outbound;
pub mod verify;

pub use {
    attachments::GraphAttachmentLookup,
    event::WebhookPayload,
    graph::GraphClient,
    outbound::MessengerOutbound,
    verify::{
        SIGNATURE_HEADER, VerifyQuery, body_signature, verify_signature, verify_subscription,
    },
};
