//! Test doubles shared by the command tests.

use std::sync::{Arc, Mutex};

use {
    anyhow::Result,
    async_trait::async_trait,
    pagebot_channels::ChannelOutbound,
    pagebot_common::types::OutboundPayload,
    secrecy::Secret,
};

use crate::command::{CommandHandler, Invocation};

#[derive(Default)]
pub struct RecordingOutbound {
    sent: Mutex<Vec<(String, OutboundPayload)>>,
}

impl RecordingOutbound {
    pub fn payloads(&self) -> Vec<(String, OutboundPayload)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.payloads()
            .into_iter()
            .filter_map(|(_, p)| p.as_text().map(String::from))
            .collect()
    }
}

#[async_trait]
impl ChannelOutbound for RecordingOutbound {
    async fn send(
        &self,
        recipient_id: &str,
        payload: &OutboundPayload,
        _auth_token: &Secret<String>,
    ) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient_id.to_string(), payload.clone()));
        Ok(())
    }
}

pub fn recording_outbound() -> (Arc<RecordingOutbound>, Arc<dyn ChannelOutbound>) {
    let outbound = Arc::new(RecordingOutbound::default());
    let send: Arc<dyn ChannelOutbound> = outbound.clone();
    (outbound, send)
}

/// Replies with a fixed text.
pub struct StaticHandler {
    description: String,
    reply: String,
}

impl StaticHandler {
    pub fn new(description: &str, reply: &str) -> Self {
        Self {
            description: description.into(),
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl CommandHandler for StaticHandler {
    fn description(&self) -> &str {
        &self.description
    }

    async fn execute(&self, invocation: Invocation) -> Result<()> {
        invocation.reply_text(&self.reply).await
    }
}

pub fn invocation(
    send: Arc<dyn ChannelOutbound>,
    args: crate::CommandArgs,
    image: Option<pagebot_common::types::ImageRef>,
) -> Invocation {
    Invocation {
        sender_id: "USER_1".into(),
        args,
        auth_token: Secret::new("page-tok".into()),
        send,
        image,
    }
}
