use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Riot API error: {status} - {message}")]
    RiotApi { status: u16, message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Player not found: {game_name}#{tag_line}")]
    PlayerNotFound { game_name: String, tag_line: String },

    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Player {puuid} not found in match {match_id}")]
    PlayerNotFoundInMatch { puuid: String, match_id: String },

    #[error("Match {match_id} has an out of range creation time: {millis}")]
    InvalidMatchTimestamp { match_id: String, millis: i64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Whether this is the Riot API answering 404 for the requested resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::RiotApi { status: 404, .. })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_only_matches_riot_404() {
        let not_found = AppError::RiotApi {
            status: 404,
            message: "Data not found".into(),
        };
        let forbidden = AppError::RiotApi {
            status: 403,
            message: "Forbidden".into(),
        };

        assert!(not_found.is_not_found());
        assert!(!forbidden.is_not_found());
        assert!(!AppError::Config("x".into()).is_not_found());
    }

    #[test]
    fn into_response_is_internal_server_error() {
        let res = AppError::Config("RIOT_API_KEY must be set".into()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
