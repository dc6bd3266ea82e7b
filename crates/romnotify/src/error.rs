use std::path::PathBuf;

/// Failures that end a notification run.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Usage: romnotify <device_json>")]
    Usage,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Telegram {method} failed: {reason}")]
    Publish { method: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, NotifyError>;
