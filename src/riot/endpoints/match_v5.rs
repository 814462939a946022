use crate::error::AppError;
use crate::riot::client::RiotClient;
use crate::riot::region::Region;
use crate::riot::types::{MatchDto, MatchIdsQuery};

impl RiotClient {
    /// Get list of match IDs by PUUID, newest first
    /// Uses regional routing (americas, europe, asia, sea)
    pub async fn get_match_ids(
        &self,
        region: Region,
        puuid: &str,
        query: MatchIdsQuery,
    ) -> Result<Vec<String>, AppError> {
        let url = format!(
            "{}/lol/match/v5/matches/by-puuid/{}/ids",
            self.region_url(region),
            urlencoding::encode(puuid)
        );
        let params = [
            ("startTime", query.start_time.to_string()),
            ("count", query.count.to_string()),
            ("queue", query.queue.to_string()),
        ];

        self.get(&url, &params).await
    }

    /// Get match details by match ID
    /// Uses regional routing (americas, europe, asia, sea)
    pub async fn get_match(&self, region: Region, match_id: &str) -> Result<MatchDto, AppError> {
        let url = format!(
            "{}/lol/match/v5/matches/{}",
            self.region_url(region),
            urlencoding::encode(match_id)
        );

        self.get(&url, &[]).await
    }
}
