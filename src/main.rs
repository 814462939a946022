use std::sync::Arc;

use tentrackule_presence::{
    config::Config,
    db::{self, Repository},
    error::AppError,
    http, logging,
    poller::{StatusPoller, start_polling},
    riot::RiotClient,
    status::TrackedPlayer,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;
    logging::init()?;

    info!("🐙 Starting...");

    let pool = db::connect(&config.database_url).await?;
    let repository = Repository::new(pool);
    if let Some(last) = repository.latest_statuses(1).await?.pop() {
        info!(status = %last.output, "📜 Last recorded status");
    }

    let riot = Arc::new(RiotClient::new(
        config.riot_api_key.clone(),
        config.riot_rate_limit_per_second,
    ));

    let player =
        TrackedPlayer::from_identity(riot.as_ref(), &config.identity, config.platform).await?;
    info!(puuid = %player.puuid, platform = %player.platform, "🎯 Tracking player");

    let poller = Arc::new(StatusPoller::new(riot, repository, player));
    tokio::spawn(start_polling(poller.clone(), config.polling_interval_secs));

    http::serve(config.http_addr, poller).await
}
