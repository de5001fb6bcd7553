use pagebot_common::types::ImageRef;

/// Which route selected a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The first word named a registered command.
    Command,
    /// No command matched; the default command got the full text.
    Fallback,
    /// The reserved image command, for a resolved image.
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Succeeded,
    Failed,
    Denied,
    TimedOut,
}

/// One handler invocation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerRun {
    pub route: Route,
    pub command: String,
    pub status: RunStatus,
}

/// Result of routing one inbound event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Run driven by the message text.
    pub text: Option<HandlerRun>,
    /// Run of the image command.
    pub image_run: Option<HandlerRun>,
    /// Image resolved for the event.
    pub image: Option<ImageRef>,
}

impl DispatchOutcome {
    pub fn runs(&self) -> impl Iterator<Item = &HandlerRun> {
        self.text.iter().chain(self.image_run.iter())
    }

    /// No handler ran.
    pub fn is_none(&self) -> bool {
        self.text.is_none() && self.image_run.is_none()
    }

    /// At least one handler ran and every run succeeded.
    pub fn succeeded(&self) -> bool {
        !self.is_none() && self.runs().all(|r| r.status == RunStatus::Succeeded)
    }
}
