//! In-memory [`RiotApi`] used by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Map;

use super::{
    AccountDto, CurrentGameInfoDto, InfoDto, LeagueEntryDto, MatchDto, MatchIdsQuery,
    ParticipantDto, Platform, RiotApi, Region, types::MetadataDto,
};
use crate::error::AppError;

pub const TRACKED_PUUID: &str = "tracked-puuid";

pub enum LiveGame {
    NotFound,
    Failing,
    Playing(CurrentGameInfoDto),
}

pub struct FakeRiotApi {
    pub live_game: Mutex<LiveGame>,
    pub leagues: Mutex<Option<Vec<LeagueEntryDto>>>,
    pub matches: Mutex<HashMap<String, MatchDto>>,
    /// Overrides the ids derived from `matches` when set.
    pub match_ids: Mutex<Option<Vec<String>>>,
    pub last_ids_query: Mutex<Option<MatchIdsQuery>>,
    pub match_fetches: AtomicUsize,
}

impl Default for FakeRiotApi {
    fn default() -> Self {
        Self {
            live_game: Mutex::new(LiveGame::NotFound),
            leagues: Mutex::new(Some(vec![solo_entry("GOLD", "II", 42)])),
            matches: Mutex::new(HashMap::new()),
            match_ids: Mutex::new(None),
            last_ids_query: Mutex::new(None),
            match_fetches: AtomicUsize::new(0),
        }
    }
}

impl FakeRiotApi {
    pub fn with_matches(matches: impl IntoIterator<Item = MatchDto>) -> Self {
        let api = Self::default();
        for m in matches {
            api.insert_match(m);
        }
        api
    }

    pub fn insert_match(&self, m: MatchDto) {
        self.matches
            .lock()
            .unwrap()
            .insert(m.metadata.match_id.clone(), m);
    }

    pub fn set_live_game(&self, live_game: LiveGame) {
        *self.live_game.lock().unwrap() = live_game;
    }

    pub fn fetches(&self) -> usize {
        self.match_fetches.load(Ordering::SeqCst)
    }
}

fn riot_error(status: u16) -> AppError {
    AppError::RiotApi {
        status,
        message: format!("fake status {status}"),
    }
}

#[async_trait]
impl RiotApi for FakeRiotApi {
    async fn get_active_game(
        &self,
        _platform: Platform,
        _puuid: &str,
    ) -> Result<CurrentGameInfoDto, AppError> {
        match &*self.live_game.lock().unwrap() {
            LiveGame::NotFound => Err(riot_error(404)),
            LiveGame::Failing => Err(riot_error(503)),
            LiveGame::Playing(game) => Ok(game.clone()),
        }
    }

    async fn get_league_entries_by_puuid(
        &self,
        _platform: Platform,
        _puuid: &str,
    ) -> Result<Vec<LeagueEntryDto>, AppError> {
        self.leagues.lock().unwrap().clone().ok_or_else(|| riot_error(500))
    }

    async fn get_match_ids(
        &self,
        _region: Region,
        _puuid: &str,
        query: MatchIdsQuery,
    ) -> Result<Vec<String>, AppError> {
        *self.last_ids_query.lock().unwrap() = Some(query);

        if let Some(ids) = self.match_ids.lock().unwrap().clone() {
            return Ok(ids);
        }

        let matches = self.matches.lock().unwrap();
        let mut selected: Vec<&MatchDto> = matches
            .values()
            .filter(|m| m.info.queue_id == query.queue)
            .filter(|m| m.info.game_creation >= query.start_time * 1000)
            .collect();
        selected.sort_by_key(|m| std::cmp::Reverse(m.info.game_creation));

        Ok(selected
            .into_iter()
            .take(query.count as usize)
            .map(|m| m.metadata.match_id.clone())
            .collect())
    }

    async fn get_match(&self, _region: Region, match_id: &str) -> Result<MatchDto, AppError> {
        self.match_fetches.fetch_add(1, Ordering::SeqCst);
        self.matches
            .lock()
            .unwrap()
            .get(match_id)
            .cloned()
            .ok_or_else(|| riot_error(404))
    }

    async fn get_account_by_riot_id(
        &self,
        _region: Region,
        _game_name: &str,
        _tag_line: &str,
    ) -> Result<AccountDto, AppError> {
        Ok(AccountDto {
            puuid: TRACKED_PUUID.to_string(),
        })
    }
}

pub fn solo_entry(tier: &str, rank: &str, league_points: i32) -> LeagueEntryDto {
    LeagueEntryDto {
        queue_type: "RANKED_SOLO_5x5".into(),
        tier: tier.into(),
        rank: rank.into(),
        league_points,
    }
}

fn participant(puuid: &str, champion_name: &str, win: bool) -> ParticipantDto {
    ParticipantDto {
        puuid: puuid.into(),
        champion_name: champion_name.into(),
        win,
        extra: Map::new(),
    }
}

/// A ranked solo/duo match played by the tracked player and one opponent.
pub fn ranked_match(
    match_id: &str,
    champion_name: &str,
    won: bool,
    game_duration: i64,
    game_creation: i64,
) -> MatchDto {
    MatchDto {
        metadata: MetadataDto {
            match_id: match_id.into(),
            participants: vec![TRACKED_PUUID.into(), "opponent-puuid".into()],
        },
        info: InfoDto {
            game_duration,
            game_creation,
            queue_id: 420,
            participants: vec![
                participant(TRACKED_PUUID, champion_name, won),
                participant("opponent-puuid", "Zed", !won),
            ],
            extra: Map::new(),
        },
    }
}

pub fn live_game(game_id: i64) -> CurrentGameInfoDto {
    CurrentGameInfoDto {
        game_id,
        game_mode: "CLASSIC".into(),
        game_queue_config_id: Some(420),
        extra: Map::new(),
    }
}
