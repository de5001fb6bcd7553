//! Channel seams shared by platform adapters and the dispatcher.
//!
//! A platform adapter (Messenger today) turns webhook payloads into
//! [`InboundEvent`]s and implements [`ChannelOutbound`] for delivery and
//! [`AttachmentLookup`] for resolving images on replied-to messages.

pub mod error;
pub mod event;
pub mod gating;
pub mod plugin;

pub use {
    error::{Error, Result},
    event::{InboundAttachment, InboundEvent},
    plugin::{AttachmentLookup, ChannelOutbound},
};
