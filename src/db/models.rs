use sqlx::FromRow;

use crate::error::AppError;
use crate::riot::InfoDto;

/// A finished match as first fetched from Riot. Never modified once stored.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub id: String,
    pub info: InfoDto,
    /// Puuids from the match metadata.
    pub participants: Vec<String>,
    /// Outcome for the tracked player, computed at fetch time.
    pub won: bool,
}

impl MatchRecord {
    pub fn champion_of(&self, puuid: &str) -> Option<&str> {
        self.info
            .participant(puuid)
            .map(|p| p.champion_name.as_str())
    }
}

#[derive(Debug, Clone, FromRow)]
pub(super) struct MatchRow {
    pub id: String,
    pub info: String,
    pub participants: String,
    pub won: bool,
}

impl TryFrom<MatchRow> for MatchRecord {
    type Error = AppError;

    fn try_from(row: MatchRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            info: serde_json::from_str(&row.info)?,
            participants: serde_json::from_str(&row.participants)?,
            won: row.won,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct StatusRow {
    pub id: i64,
    pub output: String,
    pub created_at: i64,
}
