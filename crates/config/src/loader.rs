use std::path::{Path, PathBuf};

use {
    secrecy::Secret,
    tracing::{debug, info, warn},
};

use crate::{
    env_subst::substitute_env,
    error::{Error, Result},
    schema::PagebotConfig,
};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "pagebot.toml",
    "pagebot.yaml",
    "pagebot.yml",
    "pagebot.json",
];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> Result<PagebotConfig> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./pagebot.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/pagebot/pagebot.{toml,yaml,yml,json}` (user-global)
///
/// Returns `PagebotConfig::default()` if no config file is found or the
/// file fails to parse.
pub fn discover_and_load() -> PagebotConfig {
    if let Some(path) = find_config_file() {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    } else {
        debug!("no config file found, using defaults");
    }
    PagebotConfig::default()
}

/// Find the first config file in standard locations.
pub fn find_config_file() -> Option<PathBuf> {
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    let config_dir = config_dir()?;
    CONFIG_FILENAMES
        .iter()
        .map(|name| config_dir.join(name))
        .find(|p| p.exists())
}

/// Returns the user-global config directory (`~/.config/pagebot/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "pagebot").map(|d| d.config_dir().to_path_buf())
}

/// Apply `PAGEBOT_*` environment overrides for secrets and admins.
///
/// - `PAGEBOT_PAGE_ACCESS_TOKEN`
/// - `PAGEBOT_VERIFY_TOKEN`
/// - `PAGEBOT_APP_SECRET`
/// - `PAGEBOT_ADMINS` (comma-separated sender ids)
pub fn apply_env_overrides(config: &mut PagebotConfig) {
    apply_env_overrides_with(config, |name| std::env::var(name).ok());
}

fn apply_env_overrides_with(config: &mut PagebotConfig, lookup: impl Fn(&str) -> Option<String>) {
    let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(token) = lookup("PAGEBOT_PAGE_ACCESS_TOKEN") {
        info!("page access token taken from PAGEBOT_PAGE_ACCESS_TOKEN");
        config.messenger.page_access_token = Secret::new(token.trim().to_string());
    }
    if let Some(token) = lookup("PAGEBOT_VERIFY_TOKEN") {
        config.messenger.verify_token = Secret::new(token.trim().to_string());
    }
    if let Some(secret) = lookup("PAGEBOT_APP_SECRET") {
        config.messenger.app_secret = Secret::new(secret.trim().to_string());
    }
    if let Some(admins) = lookup("PAGEBOT_ADMINS") {
        config.routing.admins = admins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
    }
}

fn parse_config(raw: &str, path: &Path) -> Result<PagebotConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => Err(Error::UnsupportedFormat {
            extension: ext.to_string(),
        }),
    }
}
