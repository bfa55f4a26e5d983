use dotenv::dotenv;
use seatwatch::{DiscordNotifier, WatchConfig, WatchContext};

extern crate env_logger;
extern crate log;

use log::LevelFilter;

use log::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = WatchConfig::new()?;
    if config.courses.is_empty() {
        warn!("COURSES is empty, nothing to check");
        return Ok(());
    }

    let notifier = DiscordNotifier::new(&config.discord_webhook_url)?;
    let context = WatchContext::new(config.portal, notifier);
    let outcomes = context
        .run_batch(&config.credentials, &config.courses)
        .await?;

    let failed = outcomes.iter().filter(|outcome| outcome.result.is_err()).count();
    info!(
        "Checked {} course(s), {} failed",
        outcomes.len(),
        failed
    );
    Ok(())
}
