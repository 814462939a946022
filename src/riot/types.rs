use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Queue id of ranked solo/duo on Summoner's Rift.
pub const RANKED_SOLO_QUEUE_ID: u16 = 420;

/// League-v4 queue tag of ranked solo/duo.
pub const RANKED_SOLO_QUEUE_TYPE: &str = "RANKED_SOLO_5x5";

// ============================================================================
// Account-v1
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
}

// ============================================================================
// Spectator-v5
// ============================================================================

/// A game currently in progress. Only the fields we log are typed, the rest
/// is kept as-is so the whole payload ends up in the persisted summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentGameInfoDto {
    pub game_id: i64,
    #[serde(default)]
    pub game_mode: String,
    #[serde(default)]
    pub game_queue_config_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// League-v4
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    pub queue_type: String,
    pub tier: String,
    pub rank: String,
    pub league_points: i32,
}

impl LeagueEntryDto {
    pub fn is_solo_queue(&self) -> bool {
        self.queue_type == RANKED_SOLO_QUEUE_TYPE
    }
}

// ============================================================================
// Match-v5
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    pub metadata: MetadataDto,
    pub info: InfoDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDto {
    pub match_id: String,
    pub participants: Vec<String>,
}

/// Match info as returned by Match-v5. Untyped fields are preserved so the
/// stored blob matches what the API sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoDto {
    /// Seconds.
    pub game_duration: i64,
    /// Unix epoch milliseconds.
    pub game_creation: i64,
    pub queue_id: u16,
    pub participants: Vec<ParticipantDto>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InfoDto {
    pub fn participant(&self, puuid: &str) -> Option<&ParticipantDto> {
        self.participants.iter().find(|p| p.puuid == puuid)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub puuid: String,
    pub champion_name: String,
    pub win: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Filters of the match ids by puuid endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchIdsQuery {
    /// Unix epoch seconds.
    pub start_time: i64,
    pub count: u8,
    pub queue: u16,
}
