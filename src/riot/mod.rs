mod client;
mod endpoints;
mod region;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{RiotApi, RiotClient};
pub use region::{Platform, Region};
pub use types::{
    AccountDto, CurrentGameInfoDto, InfoDto, LeagueEntryDto, MatchDto, MatchIdsQuery,
    ParticipantDto,
};
