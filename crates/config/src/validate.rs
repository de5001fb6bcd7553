//! Semantic validation of a loaded configuration.
//!
//! Parsing already rejects malformed files; this pass reports settings that
//! parse fine but would leave the gateway unable to route or deliver.

use std::collections::HashSet;

use secrecy::ExposeSecret;

use crate::schema::{ImagePolicy, PagebotConfig, Role};

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Dotted path, e.g. "routing.fallback_command"
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    fn new(severity: Severity, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result of validating a configuration.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// Returns `true` if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Count diagnostics by severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Validate a loaded configuration.
pub fn validate(config: &PagebotConfig) -> ValidationResult {
    let mut diagnostics = Vec::new();

    if config.messenger.page_access_token.expose_secret().is_empty() {
        diagnostics.push(Diagnostic::new(
            Severity::Error,
            "messenger.page_access_token",
            "page access token is empty; set it or PAGEBOT_PAGE_ACCESS_TOKEN",
        ));
    }
    if config.messenger.verify_token.expose_secret().is_empty() {
        diagnostics.push(Diagnostic::new(
            Severity::Warning,
            "messenger.verify_token",
            "verify token is empty; webhook subscription cannot be verified",
        ));
    }
    if config.messenger.app_secret.expose_secret().is_empty() {
        diagnostics.push(Diagnostic::new(
            Severity::Warning,
            "messenger.app_secret",
            "app secret is empty; webhook signatures are not checked, set it or PAGEBOT_APP_SECRET",
        ));
    }
    if config.routing.max_message_len == 0 {
        diagnostics.push(Diagnostic::new(
            Severity::Error,
            "routing.max_message_len",
            "must be greater than zero",
        ));
    }
    if config.routing.execution_timeout_secs == 0 || config.routing.lookup_timeout_secs == 0 {
        diagnostics.push(Diagnostic::new(
            Severity::Error,
            "routing",
            "timeouts must be greater than zero",
        ));
    }

    let webhook = config.server.webhook_path.trim_start_matches('/');
    if webhook.is_empty() || webhook == "health" {
        diagnostics.push(Diagnostic::new(
            Severity::Error,
            "server.webhook_path",
            "webhook path must be a non-root path other than /health",
        ));
    }

    check_commands(config, &mut diagnostics);
    ValidationResult { diagnostics }
}

fn check_commands(config: &PagebotConfig, diagnostics: &mut Vec<Diagnostic>) {
    let mut seen = HashSet::new();
    let mut has_admin_command = false;

    for (i, cmd) in config.commands.iter().enumerate() {
        let path = format!("commands[{i}]");
        let name = cmd.name.trim().to_lowercase();
        if name.is_empty() {
            diagnostics.push(Diagnostic::new(
                Severity::Error,
                format!("{path}.name"),
                "command name is empty",
            ));
            continue;
        }
        if !seen.insert(name.clone()) {
            diagnostics.push(Diagnostic::new(
                Severity::Error,
                format!("{path}.name"),
                format!("duplicate command '{name}'; the first entry wins"),
            ));
        }
        match cmd.role.parse::<Role>() {
            Ok(role) => has_admin_command |= role.is_restricted(),
            Err(e) => diagnostics.push(Diagnostic::new(
                Severity::Error,
                format!("{path}.role"),
                e,
            )),
        }
    }

    let fallback = config.routing.fallback_command.to_lowercase();
    if !seen.contains(&fallback) {
        diagnostics.push(Diagnostic::new(
            Severity::Warning,
            "routing.fallback_command",
            format!("fallback command '{fallback}' is not registered; unmatched text is dropped"),
        ));
    }

    let image = config.routing.image_command.to_lowercase();
    if config.routing.image_policy != ImagePolicy::Never && !seen.contains(&image) {
        diagnostics.push(Diagnostic::new(
            Severity::Warning,
            "routing.image_command",
            format!("image command '{image}' is not registered; images are ignored"),
        ));
    }

    if has_admin_command && config.routing.admins.is_empty() {
        diagnostics.push(Diagnostic::new(
            Severity::Warning,
            "routing.admins",
            "admin commands are registered but no admins are configured",
        ));
    }
}
