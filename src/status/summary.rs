use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::db::MatchRecord;
use crate::error::AppError;
use crate::riot::{CurrentGameInfoDto, LeagueEntryDto};

/// Wall-clock time, e.g. `3:04:05 PM`.
const TIME_FORMAT: &str = "%-I:%M:%S %p";
/// Date and wall-clock time, e.g. `1/1/2024, 3:04:05 PM`.
const DATETIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Solo/duo standing of the tracked player at poll time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedStanding {
    pub tier: String,
    pub rank: String,
    pub league_points: i32,
}

impl RankedStanding {
    /// Picks the solo/duo entry, `None` for a player unranked in that queue.
    pub fn from_entries(entries: &[LeagueEntryDto]) -> Option<Self> {
        entries.iter().find(|e| e.is_solo_queue()).map(|e| Self {
            tier: e.tier.clone(),
            rank: e.rank.clone(),
            league_points: e.league_points,
        })
    }
}

impl fmt::Display for RankedStanding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tier, self.rank)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodaySummary {
    pub matches: Vec<String>,
    pub ratio: String,
}

/// Point-in-time status of the tracked player, persisted once per poll.
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    InGame {
        game: CurrentGameInfoDto,
    },
    OutOfGame {
        rank: Option<String>,
        lp: Option<i32>,
        today: TodaySummary,
    },
}

impl Summary {
    pub fn in_game(game: CurrentGameInfoDto) -> Self {
        Self::InGame { game }
    }

    /// `matches` are expected oldest first, the line order is kept.
    pub fn out_of_game<Tz>(
        standing: Option<RankedStanding>,
        matches: &[MatchRecord],
        puuid: &str,
        tz: &Tz,
    ) -> Result<Self, AppError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let lines = matches
            .iter()
            .map(|m| render_match_line(m, puuid, tz))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::OutOfGame {
            rank: standing.as_ref().map(ToString::to_string),
            lp: standing.map(|s| s.league_points),
            today: TodaySummary {
                matches: lines,
                ratio: win_ratio(matches),
            },
        })
    }

    pub fn is_in_game(&self) -> bool {
        matches!(self, Self::InGame { .. })
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for Summary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::InGame { game } => {
                let mut state = serializer.serialize_struct("Summary", 2)?;
                state.serialize_field("ingame", &true)?;
                state.serialize_field("game", game)?;
                state.end()
            }
            Self::OutOfGame { rank, lp, today } => {
                let mut state = serializer.serialize_struct("Summary", 4)?;
                state.serialize_field("ingame", &false)?;
                state.serialize_field("rank", rank)?;
                state.serialize_field("lp", lp)?;
                state.serialize_field("today", today)?;
                state.end()
            }
        }
    }
}

/// `"won as Ahri in 25.5 minutes at 3:04:05 PM"`
pub fn render_match_line<Tz>(record: &MatchRecord, puuid: &str, tz: &Tz) -> Result<String, AppError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let champion = record
        .champion_of(puuid)
        .ok_or_else(|| AppError::PlayerNotFoundInMatch {
            puuid: puuid.to_string(),
            match_id: record.id.clone(),
        })?;

    let outcome = if record.won { "won" } else { "lost" };
    let minutes = tenths_of(record.info.game_duration, 6.0);
    let created_at = DateTime::from_timestamp_millis(record.info.game_creation)
        .ok_or_else(|| AppError::InvalidMatchTimestamp {
            match_id: record.id.clone(),
            millis: record.info.game_creation,
        })?
        .with_timezone(tz);

    Ok(format!(
        "{outcome} as {champion} in {minutes:.1} minutes at {}",
        created_at.format(TIME_FORMAT)
    ))
}

/// `amount / per_tenth` tenths, rounded half away from zero.
fn tenths_of(amount: i64, per_tenth: f64) -> f64 {
    (amount as f64 / per_tenth).round() / 10.0
}

/// Percentage of won matches, rounded to the nearest integer. `"N/A"` when
/// no match was played.
pub fn win_ratio(matches: &[MatchRecord]) -> String {
    if matches.is_empty() {
        return "N/A".to_string();
    }

    let won = matches.iter().filter(|m| m.won).count();
    let ratio = won as f64 / matches.len() as f64 * 100.0;
    format!("{}%", ratio.round() as u32)
}

/// Renders the status line. `since` is the last time the player was seen in
/// the opposite state, i.e. roughly when the current state began.
pub fn render_status<Tz>(ingame: bool, now: &DateTime<Tz>, since: Option<DateTime<Utc>>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let state = if ingame { "in-game" } else { "out-of-game" };
    let at = now.format(DATETIME_FORMAT);

    match since {
        Some(since) => {
            let elapsed = now.with_timezone(&Utc) - since;
            let minutes = tenths_of(elapsed.num_milliseconds(), 6_000.0);
            format!(
                "{state} at {at} since {} ({minutes:.1} minutes)",
                since.with_timezone(&now.timezone()).format(TIME_FORMAT)
            )
        }
        None => format!("{state} at {at} since <unknown> (no previous status change recorded)"),
    }
}
