use std::{sync::Arc, time::Duration};

use {
    pagebot_channels::{AttachmentLookup, ChannelOutbound, InboundEvent, gating::is_privileged},
    pagebot_commands::{Command, CommandArgs, CommandRegistry, Invocation},
    pagebot_common::types::ImageRef,
    pagebot_config::{ImagePolicy, RoutingConfig},
    secrecy::Secret,
    tracing::{debug, error, info, warn},
};

use crate::{
    error::DispatchError,
    outcome::{DispatchOutcome, HandlerRun, Route, RunStatus},
    parse::parse,
    resolve::AttachmentResolver,
};

/// Routes each inbound event to at most one text-driven handler and at most
/// one image handler.
///
/// Dispatch never fails: handler errors, panics, timeouts and authorization
/// denials are logged and answered with a single notice to the sender.
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    resolver: AttachmentResolver,
    outbound: Arc<dyn ChannelOutbound>,
    auth_token: Secret<String>,
    config: RoutingConfig,
    execution_timeout: Duration,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<CommandRegistry>,
        lookup: Arc<dyn AttachmentLookup>,
        outbound: Arc<dyn ChannelOutbound>,
        auth_token: Secret<String>,
        config: RoutingConfig,
    ) -> Self {
        let resolver =
            AttachmentResolver::new(lookup, Duration::from_secs(config.lookup_timeout_secs));
        let execution_timeout = Duration::from_secs(config.execution_timeout_secs);
        Self {
            registry,
            resolver,
            outbound,
            auth_token,
            config,
            execution_timeout,
        }
    }

    #[must_use]
    pub fn with_execution_timeout(mut self, timeout: Duration) -> Self {
        self.execution_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.resolver = self.resolver.with_timeout(timeout);
        self
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub async fn dispatch(&self, event: &InboundEvent) -> DispatchOutcome {
        let image = self.resolver.resolve(event, &self.auth_token).await;
        let mut outcome = DispatchOutcome {
            image: image.clone(),
            ..Default::default()
        };

        let mut explicit = false;
        let mut text_command = None;
        if let Some(text) = event.text.as_deref()
            && let Some((route, command, args)) = self.select(text)
        {
            explicit = route == Route::Command;
            let run = self
                .run(route, Arc::clone(&command), args, &event.sender_id, image.clone())
                .await;
            text_command = Some(command);
            outcome.text = Some(run);
        }

        if let Some(image) = image
            && self.wants_image_run(explicit)
        {
            match self.registry.get(&self.config.image_command) {
                Some(command)
                    if text_command
                        .as_ref()
                        .is_some_and(|c| Arc::ptr_eq(c, &command)) =>
                {
                    debug!(command = command.name(), "image already handled by text route");
                },
                Some(command) => {
                    let run = self
                        .run(
                            Route::Image,
                            command,
                            CommandArgs::empty(),
                            &event.sender_id,
                            Some(image),
                        )
                        .await;
                    outcome.image_run = Some(run);
                },
                None => {
                    warn!(
                        command = %self.config.image_command,
                        "image command is not registered; ignoring image"
                    );
                },
            }
        }

        if outcome.is_none() {
            debug!(sender_id = %event.sender_id, "event produced no handler run");
        }
        outcome
    }

    /// Choose the text-driven command: an explicitly named one, else the
    /// fallback with the full original text.
    fn select(&self, text: &str) -> Option<(Route, Arc<Command>, CommandArgs)> {
        let parsed = parse(text, self.config.prefix.as_deref());
        if !parsed.name.is_empty()
            && let Some(command) = self.registry.get(&parsed.name)
        {
            return Some((Route::Command, command, CommandArgs::Words(parsed.args)));
        }

        match self.registry.get(&self.config.fallback_command) {
            Some(command) => Some((Route::Fallback, command, CommandArgs::Raw(text.to_string()))),
            None => {
                warn!(
                    command = %self.config.fallback_command,
                    "fallback command is not registered; dropping text"
                );
                None
            },
        }
    }

    fn wants_image_run(&self, explicit_text_command: bool) -> bool {
        match self.config.image_policy {
            ImagePolicy::Always => true,
            ImagePolicy::Never => false,
            ImagePolicy::Unclaimed => !explicit_text_command,
        }
    }

    fn authorize(&self, command: &Command, sender_id: &str) -> Result<(), DispatchError> {
        if command.required_role().is_restricted() && !is_privileged(sender_id, &self.config.admins)
        {
            return Err(DispatchError::Unauthorized {
                command: command.name().to_string(),
                sender_id: sender_id.to_string(),
            });
        }
        Ok(())
    }

    async fn run(
        &self,
        route: Route,
        command: Arc<Command>,
        args: CommandArgs,
        sender_id: &str,
        image: Option<ImageRef>,
    ) -> HandlerRun {
        let name = command.name().to_string();
        let finish = |status| HandlerRun {
            route,
            command: name.clone(),
            status,
        };

        if let Err(e) = self.authorize(&command, sender_id) {
            warn!(error = %e, "command denied");
            self.notify(sender_id, &self.config.messages.denied).await;
            return finish(RunStatus::Denied);
        }

        info!(command = %name, sender_id, route = ?route, "running command");
        let invocation = Invocation {
            sender_id: sender_id.to_string(),
            args,
            auth_token: self.auth_token.clone(),
            send: Arc::clone(&self.outbound),
            image,
        };
        match self.execute(command, invocation).await {
            Ok(()) => finish(RunStatus::Succeeded),
            Err(e) => {
                error!(command = %name, sender_id, error = %e, "command failed");
                let notice = match route {
                    Route::Image => &self.config.messages.image_failed,
                    Route::Command | Route::Fallback => &self.config.messages.failed,
                };
                self.notify(sender_id, notice).await;
                match e {
                    DispatchError::TimedOut { .. } => finish(RunStatus::TimedOut),
                    _ => finish(RunStatus::Failed),
                }
            },
        }
    }

    /// Run the handler on its own task so a panic stays contained, bounded
    /// by the execution timeout.
    async fn execute(
        &self,
        command: Arc<Command>,
        invocation: Invocation,
    ) -> Result<(), DispatchError> {
        let name = command.name().to_string();
        let mut task = tokio::spawn(async move { command.execute(invocation).await });
        match tokio::time::timeout(self.execution_timeout, &mut task).await {
            Ok(Ok(Ok(()))) => Ok(()),
            Ok(Ok(Err(error))) => Err(DispatchError::Handler {
                command: name,
                error,
            }),
            Ok(Err(join_error)) => Err(DispatchError::Aborted {
                command: name,
                reason: join_error.to_string(),
            }),
            Err(_) => {
                task.abort();
                Err(DispatchError::TimedOut {
                    command: name,
                    after: self.execution_timeout,
                })
            },
        }
    }

    async fn notify(&self, sender_id: &str, text: &str) {
        if let Err(e) = self
            .outbound
            .send_text(sender_id, text, &self.auth_token)
            .await
        {
            warn!(sender_id, error = %e, "failed to deliver notice");
        }
    }
}
