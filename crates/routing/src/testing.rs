//! Test doubles for routing tests.

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use {
    anyhow::Result,
    async_trait::async_trait,
    pagebot_channels::{AttachmentLookup, ChannelOutbound},
    pagebot_commands::{CommandArgs, CommandHandler, Invocation},
    pagebot_common::types::{ImageRef, OutboundPayload},
    secrecy::Secret,
};

#[derive(Default)]
pub struct RecordingOutbound {
    sent: Mutex<Vec<(String, OutboundPayload)>>,
}

impl RecordingOutbound {
    pub fn texts_to(&self, recipient: &str) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(r, _)| r == recipient)
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

#[derive(Clone, Copy)]
pub enum LookupBehavior {
    Found(&'static str),
    Empty,
    Fail,
    Hang,
}

pub struct MockLookup {
    behavior: LookupBehavior,
    requested: Mutex<Vec<String>>,
}

impl MockLookup {
    pub fn new(behavior: LookupBehavior) -> Self {
        Self {
            behavior,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requested.lock().unwrap().len()
    }
}

#[async_trait]
impl AttachmentLookup for MockLookup {
    async fn image_for_message(
        &self,
        message_id: &str,
        _auth_token: &Secret<String>,
    ) -> pagebot_channels::Result<Option<ImageRef>> {
        self.requested.lock().unwrap().push(message_id.to_string());
        match self.behavior {
            LookupBehavior::Found(url) => Ok(Some(ImageRef::reply(url))),
            LookupBehavior::Empty => Ok(None),
            LookupBehavior::Fail => Err(pagebot_channels::Error::platform(500, "boom")),
            LookupBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(None)
            },
        }
    }
}

#[derive(Clone, Copy)]
pub enum HandlerBehavior {
    Reply(&'static str),
    Fail,
    Hang,
    Panic,
}

/// What a handler saw when it ran.
#[derive(Debug, Clone)]
pub struct SeenInvocation {
    pub sender_id: String,
    pub args: CommandArgs,
    pub image: Option<ImageRef>,
}

pub struct ScriptedHandler {
    behavior: HandlerBehavior,
    seen: Mutex<Vec<SeenInvocation>>,
    runs: AtomicUsize,
}

impl ScriptedHandler {
    pub fn new(behavior: HandlerBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            seen: Mutex::new(Vec::new()),
            runs: AtomicUsize::new(0),
        })
    }

    pub fn replying(text: &'static str) -> Arc<Self> {
        Self::new(HandlerBehavior::Reply(text))
    }

    pub fn seen(&self) -> Vec<SeenInvocation> {
        self.seen.lock().unwrap().clone()
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommandHandler for ScriptedHandler {
    fn description(&self) -> &str {
        "scripted"
    }

    async fn execute(&self, invocation: Invocation) -> Result<()> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(SeenInvocation {
            sender_id: invocation.sender_id.clone(),
            args: invocation.args.clone(),
            image: invocation.image.clone(),
        });
        match self.behavior {
            HandlerBehavior::Reply(text) => invocation.reply_text(text).await,
            HandlerBehavior::Fail => anyhow::bail!("backend unreachable"),
            HandlerBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            },
            HandlerBehavior::Panic => panic!("handler exploded"),
        }
    }
}
