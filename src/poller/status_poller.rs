use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone, Utc};
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::{debug, error, info, instrument, warn};

use crate::db::Repository;
use crate::error::AppError;
use crate::riot::{CurrentGameInfoDto, RiotApi};
use crate::status::{
    MatchResolver, RankedStanding, Summary, TrackedPlayer, render_status,
};

/// Outcome of the live game lookup.
#[derive(Debug)]
pub enum LiveGame {
    InGame(CurrentGameInfoDto),
    NotInGame,
}

impl LiveGame {
    /// Fails open: every error, not only Riot's 404, reads as "not in game".
    pub fn from_lookup(lookup: Result<CurrentGameInfoDto, AppError>) -> Self {
        match lookup {
            Ok(game) => Self::InGame(game),
            Err(e) if e.is_not_found() => {
                debug!("🎮 No active game");
                Self::NotInGame
            }
            Err(e) => {
                warn!(error = ?e, "🎮 ⚠️ Live game lookup failed, assuming out of game");
                Self::NotInGame
            }
        }
    }
}

/// Runs poll cycles for the tracked player. Cycles may overlap (timer and
/// HTTP requests), each one only appends rows so no coordination is needed.
pub struct StatusPoller<A> {
    api: Arc<A>,
    db: Repository,
    resolver: MatchResolver<A, Repository>,
    player: TrackedPlayer,
}

impl<A: RiotApi> StatusPoller<A> {
    pub fn new(api: Arc<A>, db: Repository, player: TrackedPlayer) -> Self {
        let resolver = MatchResolver::new(api.clone(), db.clone(), player.clone());
        Self {
            api,
            db,
            resolver,
            player,
        }
    }

    pub async fn poll_once(&self) -> Result<String, AppError> {
        self.poll_once_at(Local::now()).await
    }

    /// One cycle as of `now`, whose timezone defines "today" and the rendered
    /// times. Returns the status line.
    #[instrument(skip_all, fields(puuid = %self.player.puuid))]
    pub async fn poll_once_at<Tz>(&self, now: DateTime<Tz>) -> Result<String, AppError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let lookup = self
            .api
            .get_active_game(self.player.platform, &self.player.puuid)
            .await;

        let summary = match LiveGame::from_lookup(lookup) {
            LiveGame::InGame(game) => {
                debug!(game_id = game.game_id, mode = %game.game_mode, "🎮 Player is in game");
                Summary::in_game(game)
            }
            LiveGame::NotInGame => self.summarize_offline(&now).await?,
        };

        let ingame = summary.is_in_game();
        let since = self.db.latest_summary_at(!ingame).await?;
        let status = render_status(ingame, &now, since);
        info!("🔄 {status}");

        let created_at = now.with_timezone(&Utc);
        self.db
            .insert_summary(ingame, &summary.to_json()?, created_at)
            .await?;
        self.db.insert_status(&status, created_at).await?;

        Ok(status)
    }

    async fn summarize_offline<Tz>(&self, now: &DateTime<Tz>) -> Result<Summary, AppError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let entries = self
            .api
            .get_league_entries_by_puuid(self.player.platform, &self.player.puuid)
            .await?;
        let standing = RankedStanding::from_entries(&entries);
        if standing.is_none() {
            debug!("🏆 No solo/duo ranking for the tracked player");
        }

        let matches = self.resolver.list_today(now).await?;
        debug!(count = matches.len(), "🏆 Matches played today");

        Summary::out_of_game(standing, &matches, &self.player.puuid, &now.timezone())
    }
}

/// Ticks every `interval_secs`. A cycle outlasting the period pushes the next
/// tick back instead of firing the missed ones back to back.
fn poll_interval(interval_secs: u64) -> Interval {
    let mut interval = interval(Duration::from_secs(interval_secs));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

pub async fn start_polling<A: RiotApi>(poller: Arc<StatusPoller<A>>, interval_secs: u64) {
    // The first tick completes immediately, so a poll runs at startup.
    let mut interval = poll_interval(interval_secs);

    info!(interval_secs, "🔄 Status poller started");

    loop {
        interval.tick().await;

        if let Err(e) = poller.poll_once().await {
            error!(error = ?e, "🔄 ❌ Polling cycle failed");
        }
    }
}
