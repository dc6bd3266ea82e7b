use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{NotifyError, Result};

const DEFAULT_SETTINGS_NAME: &str = "romnotify.toml";
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";
const DEFAULT_BRAND: &str = "HertzifyOS";
const DEFAULT_PROFILE_BASE: &str = "https://github.com/";
const UNKNOWN_MAINTAINER: &str = "Unknown";

/// Credentials and attribution taken from the process environment.
#[derive(Clone)]
pub struct NotificationConfig {
    pub bot_token: String,
    pub channel_id: String,
    pub maintainer: String,
}

impl std::fmt::Debug for NotificationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationConfig")
            .field("bot_token", &"<redacted>")
            .field("channel_id", &self.channel_id)
            .field("maintainer", &self.maintainer)
            .finish()
    }
}

impl NotificationConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let (bot_token, channel_id) = match (get("TG_BOT_TOKEN"), get("TG_CHANNEL_ID")) {
            (Some(token), Some(channel)) => (token, channel),
            _ => {
                return Err(NotifyError::Config(
                    "Missing TG_BOT_TOKEN or TG_CHANNEL_ID".to_string(),
                ))
            }
        };
        let maintainer = get("MAINTAINER")
            .or_else(|| get("GITHUB_ACTOR"))
            .unwrap_or_else(|| UNKNOWN_MAINTAINER.to_string());

        Ok(Self {
            bot_token,
            channel_id,
            maintainer,
        })
    }
}

/// Optional presentation and endpoint settings from `romnotify.toml`.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub brand: String,
    pub api_url: String,
    pub profile_base: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            brand: DEFAULT_BRAND.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            profile_base: DEFAULT_PROFILE_BASE.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from an explicit path, or search upward from current dir.
    /// No file at all means defaults.
    pub fn load(path_override: Option<PathBuf>) -> Result<Self> {
        let path = match path_override {
            Some(p) => p,
            None => match find_upwards(DEFAULT_SETTINGS_NAME) {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };
        Self::from_file(&path)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            NotifyError::Config(format!("Reading settings file {}: {e}", path.display()))
        })?;
        toml::from_str(&contents).map_err(|e| {
            NotifyError::Config(format!("Parsing TOML settings {}: {e}", path.display()))
        })
    }
}

fn find_upwards(file_name: &str) -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir.join(file_name);
        if candidate.exists() {
            return Some(candidate);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
