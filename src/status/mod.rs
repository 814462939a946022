//! Daily match summary and status line of the tracked player.

use tracing::info;

use crate::config::PlayerIdentity;
use crate::error::AppError;
use crate::riot::{Platform, Region, RiotApi};

mod resolver;
mod summary;

pub use resolver::{MatchResolver, start_of_day};
pub use summary::{
    RankedStanding, Summary, TodaySummary, render_match_line, render_status, win_ratio,
};

/// The single player this instance follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedPlayer {
    pub puuid: String,
    pub platform: Platform,
}

impl TrackedPlayer {
    pub fn new(puuid: impl Into<String>, platform: Platform) -> Self {
        Self {
            puuid: puuid.into(),
            platform,
        }
    }

    /// Looks the puuid up through Account-v1 when only a Riot ID is configured.
    pub async fn from_identity<A: RiotApi + ?Sized>(
        api: &A,
        identity: &PlayerIdentity,
        platform: Platform,
    ) -> Result<Self, AppError> {
        match identity {
            PlayerIdentity::Puuid(puuid) => Ok(Self::new(puuid.clone(), platform)),
            PlayerIdentity::RiotId {
                game_name,
                tag_line,
            } => {
                let account = api
                    .get_account_by_riot_id(platform.to_region(), game_name, tag_line)
                    .await?;
                info!(riot_id = %format!("{game_name}#{tag_line}"), "🎯 Tracked player resolved");
                Ok(Self::new(account.puuid, platform))
            }
        }
    }

    pub fn region(&self) -> Region {
        self.platform.to_region()
    }
}
