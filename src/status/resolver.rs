use std::sync::Arc;

use chrono::{DateTime, TimeZone, Timelike};
use futures::future::try_join_all;
use tracing::{debug, instrument};

use super::TrackedPlayer;
use crate::db::{MatchRecord, MatchStore};
use crate::error::AppError;
use crate::riot::{MatchIdsQuery, RiotApi, types::RANKED_SOLO_QUEUE_ID};

/// Upper bound of match ids requested for a single day.
const MAX_MATCHES_PER_DAY: u8 = 100;

/// Fetch-or-load access to match records.
///
/// Records are immutable once Riot publishes them, so the store is consulted
/// first and Riot only on a miss. Two concurrent resolves of the same miss may
/// both fetch and both write, which is harmless since the store keeps the
/// first write and the content is identical.
pub struct MatchResolver<A, S> {
    api: Arc<A>,
    store: S,
    player: TrackedPlayer,
}

impl<A: RiotApi, S: MatchStore> MatchResolver<A, S> {
    pub fn new(api: Arc<A>, store: S, player: TrackedPlayer) -> Self {
        Self { api, store, player }
    }

    #[instrument(skip(self))]
    pub async fn resolve(&self, match_id: &str) -> Result<MatchRecord, AppError> {
        if let Some(cached) = self.store.get_match(match_id).await? {
            debug!("📦 Match loaded from cache");
            return Ok(cached);
        }

        let data = self.api.get_match(self.player.region(), match_id).await?;

        let won = data
            .info
            .participant(&self.player.puuid)
            .map(|p| p.win)
            .ok_or_else(|| AppError::PlayerNotFoundInMatch {
                puuid: self.player.puuid.clone(),
                match_id: match_id.to_string(),
            })?;

        let record = MatchRecord {
            id: match_id.to_string(),
            info: data.info,
            participants: data.metadata.participants,
            won,
        };

        self.store.put_match(&record).await?;
        debug!(won, "📦 Match fetched and cached");

        Ok(record)
    }

    /// Ranked solo/duo matches played since local midnight of `now`, oldest
    /// first.
    pub async fn list_today<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
    ) -> Result<Vec<MatchRecord>, AppError> {
        let query = MatchIdsQuery {
            start_time: start_of_day(now),
            count: MAX_MATCHES_PER_DAY,
            queue: RANKED_SOLO_QUEUE_ID,
        };

        let ids = self
            .api
            .get_match_ids(self.player.region(), &self.player.puuid, query)
            .await?;
        debug!(count = ids.len(), start_time = query.start_time, "📦 Today's match ids");

        // Riot lists newest first, try_join_all keeps that order.
        let mut matches = try_join_all(ids.iter().map(|id| self.resolve(id))).await?;
        matches.reverse();

        Ok(matches)
    }
}

/// Epoch seconds of the start of `now`'s local day. When midnight does not
/// exist locally (DST gap), the first whole hour that does is used.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> i64 {
    let tz = now.timezone();
    let date = now.date_naive();

    (0..=3)
        .filter_map(|hour| date.and_hms_opt(hour, 0, 0))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .map(|midnight| midnight.timestamp())
        .unwrap_or_else(|| now.timestamp() - i64::from(now.num_seconds_from_midnight()))
}
