use std::path::Path;

use tracing::{info, warn};

use crate::artifact::{self, LoadOutcome};
use crate::error::Result;
use crate::message;
use crate::settings::{NotificationConfig, Settings};
use crate::sink::TelegramClient;

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Input file was blank; no request was made.
    Skipped,
    Published { message_id: i64, pinned: bool },
}

/// Load, format, send, pin. Only the send is allowed to fail the run.
pub async fn notify(
    path: &Path,
    config: &NotificationConfig,
    settings: &Settings,
    api_url: &str,
) -> Result<Outcome> {
    let record = match artifact::load(path).await? {
        LoadOutcome::Empty => {
            info!(path = %path.display(), "Skipping empty file");
            return Ok(Outcome::Skipped);
        }
        LoadOutcome::Record(record) => record,
    };

    let device = artifact::device_name(path);
    info!(device = %device, version = %record.version, "announcing build");
    let announcement = message::format(&record, &device, &config.maintainer, settings);

    let client = TelegramClient::new(api_url, &config.bot_token);
    let message_id = client
        .send_message(&config.channel_id, &announcement.text)
        .await?;

    let pinned = match client.pin_message(&config.channel_id, message_id).await {
        Ok(()) => true,
        Err(e) => {
            warn!(message_id, error = %e, "pin failed, message stays unpinned");
            false
        }
    };

    Ok(Outcome::Published { message_id, pinned })
}
