use std::env;
use std::net::SocketAddr;
use std::num::NonZeroU32;

use crate::error::AppError;
use crate::riot::Platform;

/// How the tracked player is identified before the first poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerIdentity {
    Puuid(String),
    RiotId { game_name: String, tag_line: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub riot_api_key: String,
    pub database_url: String,
    pub polling_interval_secs: u64,
    pub riot_rate_limit_per_second: NonZeroU32,
    pub http_addr: SocketAddr,
    pub platform: Platform,
    pub identity: PlayerIdentity,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        const DEFAULT_POLLING_INTERVAL_SECS: u64 = 60;
        const DEFAULT_RIOT_RATE_LIMIT_PER_SECOND: u32 = 20;
        const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:1313";
        const DEFAULT_PLATFORM: &str = "NA1";

        let riot_api_key = var("RIOT_API_KEY")
            .ok_or_else(|| AppError::Config("RIOT_API_KEY must be set".into()))?;

        let database_url =
            var("DATABASE_URL").unwrap_or_else(|| "sqlite:tentrackule-presence.db".into());

        let polling_interval_secs = var("POLLING_INTERVAL_SECS")
            .and_then(|v| v.parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_POLLING_INTERVAL_SECS);

        let riot_rate_limit_per_second = var("RIOT_RATE_LIMIT_PER_SECOND")
            .and_then(|v| v.parse().ok())
            .and_then(NonZeroU32::new)
            .unwrap_or_else(|| {
                NonZeroU32::new(DEFAULT_RIOT_RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN)
            });

        let http_addr = var("HTTP_ADDR")
            .unwrap_or_else(|| DEFAULT_HTTP_ADDR.into())
            .parse()
            .map_err(|e| AppError::Config(format!("HTTP_ADDR is not a socket address: {e}")))?;

        let platform = var("TRACKED_PLATFORM")
            .unwrap_or_else(|| DEFAULT_PLATFORM.into())
            .parse()?;

        let identity = match (
            var("TRACKED_PUUID"),
            var("TRACKED_GAME_NAME"),
            var("TRACKED_TAG_LINE"),
        ) {
            (Some(puuid), _, _) => PlayerIdentity::Puuid(puuid),
            (None, Some(game_name), Some(tag_line)) => PlayerIdentity::RiotId {
                game_name,
                tag_line,
            },
            _ => {
                return Err(AppError::Config(
                    "TRACKED_PUUID or TRACKED_GAME_NAME and TRACKED_TAG_LINE must be set".into(),
                ));
            }
        };

        Ok(Self {
            riot_api_key,
            database_url,
            polling_interval_secs,
            riot_rate_limit_per_second,
            http_addr,
            platform,
            identity,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_applied() {
        let config =
            Config::from_lookup(lookup(&[("RIOT_API_KEY", "key"), ("TRACKED_PUUID", "abc")]))
                .unwrap();

        assert_eq!(config.database_url, "sqlite:tentrackule-presence.db");
        assert_eq!(config.polling_interval_secs, 60);
        assert_eq!(config.riot_rate_limit_per_second.get(), 20);
        assert_eq!(config.http_addr.port(), 1313);
        assert_eq!(config.platform, Platform::NA1);
        assert_eq!(config.identity, PlayerIdentity::Puuid("abc".into()));
    }

    #[test]
    fn riot_id_is_used_without_puuid() {
        let config = Config::from_lookup(lookup(&[
            ("RIOT_API_KEY", "key"),
            ("TRACKED_GAME_NAME", "Eevee"),
            ("TRACKED_TAG_LINE", "NA1"),
            ("TRACKED_PLATFORM", "euw"),
        ]))
        .unwrap();

        assert_eq!(config.platform, Platform::EUW1);
        assert_eq!(
            config.identity,
            PlayerIdentity::RiotId {
                game_name: "Eevee".into(),
                tag_line: "NA1".into(),
            }
        );
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let res = Config::from_lookup(lookup(&[("TRACKED_PUUID", "abc")]));
        assert!(matches!(res, Err(AppError::Config(_))));
    }

    #[test]
    fn missing_identity_is_a_config_error() {
        let res = Config::from_lookup(lookup(&[
            ("RIOT_API_KEY", "key"),
            ("TRACKED_GAME_NAME", "Eevee"),
        ]));
        assert!(matches!(res, Err(AppError::Config(_))));
    }

    #[test]
    fn unknown_platform_is_rejected() {
        let res = Config::from_lookup(lookup(&[
            ("RIOT_API_KEY", "key"),
            ("TRACKED_PUUID", "abc"),
            ("TRACKED_PLATFORM", "moon"),
        ]));
        assert!(matches!(res, Err(AppError::InvalidRegion(_))));
    }

    #[test]
    fn zero_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("RIOT_API_KEY", "key"),
            ("TRACKED_PUUID", "abc"),
            ("POLLING_INTERVAL_SECS", "0"),
            ("RIOT_RATE_LIMIT_PER_SECOND", "0"),
        ]))
        .unwrap();

        assert_eq!(config.polling_interval_secs, 60);
        assert_eq!(config.riot_rate_limit_per_second.get(), 20);
    }
}
