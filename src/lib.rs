//! Tracks whether a single League of Legends player is in game and, when not,
//! how their ranked solo/duo day is going. Each poll is persisted and the
//! latest status line is served over HTTP.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod logging;
pub mod poller;
pub mod riot;
pub mod status;
