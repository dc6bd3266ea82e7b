use clap::Parser;
use tokio::runtime::Runtime;

use romnotify::cli::{init_tracing, Cli};
use romnotify::error::NotifyError;
use romnotify::orchestrator::{notify, Outcome};
use romnotify::settings::{NotificationConfig, Settings};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let path = cli.path.clone().ok_or(NotifyError::Usage)?;
    // Credentials are checked before the input file is touched.
    let config = NotificationConfig::from_env()?;
    let settings = Settings::load(cli.config.clone())?;
    let api_url = cli.api_url.clone().unwrap_or_else(|| settings.api_url.clone());

    let rt = Runtime::new()?;
    rt.block_on(async {
        match notify(&path, &config, &settings, &api_url).await? {
            Outcome::Skipped => {
                println!("Skipping empty file: {}", path.display());
            }
            Outcome::Published { message_id, pinned } => {
                if pinned {
                    tracing::info!(message_id, "Telegram message sent & pinned");
                } else {
                    tracing::info!(message_id, "Telegram message sent (pin failed)");
                }
                println!("Telegram message sent & pinned successfully");
            }
        }
        Ok(())
    })
}
