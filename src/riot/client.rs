use std::num::NonZeroU32;

use async_trait::async_trait;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::trace;

use super::{
    Platform, Region,
    types::{AccountDto, CurrentGameInfoDto, LeagueEntryDto, MatchDto, MatchIdsQuery},
};
use crate::error::AppError;

/// The Riot endpoints the tracker consumes.
#[async_trait]
pub trait RiotApi: Send + Sync {
    /// Spectator-v5. Answers 404 when the player is not in a game.
    async fn get_active_game(
        &self,
        platform: Platform,
        puuid: &str,
    ) -> Result<CurrentGameInfoDto, AppError>;

    async fn get_league_entries_by_puuid(
        &self,
        platform: Platform,
        puuid: &str,
    ) -> Result<Vec<LeagueEntryDto>, AppError>;

    /// Match ids, newest first.
    async fn get_match_ids(
        &self,
        region: Region,
        puuid: &str,
        query: MatchIdsQuery,
    ) -> Result<Vec<String>, AppError>;

    async fn get_match(&self, region: Region, match_id: &str) -> Result<MatchDto, AppError>;

    async fn get_account_by_riot_id(
        &self,
        region: Region,
        game_name: &str,
        tag_line: &str,
    ) -> Result<AccountDto, AppError>;
}

pub struct RiotClient {
    client: reqwest::Client,
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    /// Riot API Key
    key: String,
    /// Replaces every routing host, used to point the client at a mock server.
    base_url: Option<String>,
}

impl RiotClient {
    pub fn new(key: String, rate_limit_per_second: NonZeroU32) -> Self {
        let quota = Quota::per_second(rate_limit_per_second).allow_burst(rate_limit_per_second);

        Self {
            client: reqwest::Client::new(),
            limiter: RateLimiter::direct(quota),
            key,
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub(super) fn platform_url(&self, platform: Platform) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| platform.base_url())
    }

    pub(super) fn region_url(&self, region: Region) -> String {
        self.base_url.clone().unwrap_or_else(|| region.base_url())
    }

    /// Rate limited GET returning the decoded body of a 200 response.
    pub(super) async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        self.limiter.until_ready().await;
        trace!(url, "🛰️ Riot API request");

        let res = self
            .client
            .get(url)
            .query(query)
            .header("X-Riot-Token", &self.key)
            .send()
            .await?;

        match res.status() {
            StatusCode::OK => Ok(res.json().await?),
            status => Err(AppError::RiotApi {
                status: status.as_u16(),
                message: res.text().await.unwrap_or_default(),
            }),
        }
    }
}

#[async_trait]
impl RiotApi for RiotClient {
    async fn get_active_game(
        &self,
        platform: Platform,
        puuid: &str,
    ) -> Result<CurrentGameInfoDto, AppError> {
        RiotClient::get_active_game(self, platform, puuid).await
    }

    async fn get_league_entries_by_puuid(
        &self,
        platform: Platform,
        puuid: &str,
    ) -> Result<Vec<LeagueEntryDto>, AppError> {
        RiotClient::get_league_entries_by_puuid(self, platform, puuid).await
    }

    async fn get_match_ids(
        &self,
        region: Region,
        puuid: &str,
        query: MatchIdsQuery,
    ) -> Result<Vec<String>, AppError> {
        RiotClient::get_match_ids(self, region, puuid, query).await
    }

    async fn get_match(&self, region: Region, match_id: &str) -> Result<MatchDto, AppError> {
        RiotClient::get_match(self, region, match_id).await
    }

    async fn get_account_by_riot_id(
        &self,
        region: Region,
        game_name: &str,
        tag_line: &str,
    ) -> Result<AccountDto, AppError> {
        RiotClient::get_account_by_riot_id(self, region, game_name, tag_line).await
    }
}
