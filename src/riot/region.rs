use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Platform routing values for Riot API (Spectator-v5, League-v4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    BR1,
    LA1,
    LA2,
    NA1,
    JP1,
    KR,
    EUN1,
    EUW1,
    ME1,
    RU,
    TR1,
    OC1,
    PH2,
    SG2,
    TH2,
    TW2,
    VN2,
}

impl Platform {
    pub const ALL: [Platform; 17] = [
        Self::BR1,
        Self::LA1,
        Self::LA2,
        Self::NA1,
        Self::JP1,
        Self::KR,
        Self::EUN1,
        Self::EUW1,
        Self::ME1,
        Self::RU,
        Self::TR1,
        Self::OC1,
        Self::PH2,
        Self::SG2,
        Self::TH2,
        Self::TW2,
        Self::VN2,
    ];

    /// Routing host label, e.g. `euw1`.
    pub fn host(self) -> &'static str {
        match self {
            Self::BR1 => "br1",
            Self::LA1 => "la1",
            Self::LA2 => "la2",
            Self::NA1 => "na1",
            Self::JP1 => "jp1",
            Self::KR => "kr",
            Self::EUN1 => "eun1",
            Self::EUW1 => "euw1",
            Self::ME1 => "me1",
            Self::RU => "ru",
            Self::TR1 => "tr1",
            Self::OC1 => "oc1",
            Self::PH2 => "ph2",
            Self::SG2 => "sg2",
            Self::TH2 => "th2",
            Self::TW2 => "tw2",
            Self::VN2 => "vn2",
        }
    }

    /// Name players usually give the server, accepted in `TRACKED_PLATFORM`.
    fn shorthand(self) -> Option<&'static str> {
        match self {
            Self::LA1 => Some("lan"),
            Self::LA2 => Some("las"),
            Self::EUN1 => Some("eune"),
            Self::OC1 => Some("oce"),
            Self::KR | Self::RU => None,
            other => other.host().strip_suffix(|c: char| c.is_ascii_digit()),
        }
    }

    pub fn base_url(self) -> String {
        format!("https://{}.api.riotgames.com", self.host())
    }

    pub fn to_region(self) -> Region {
        match self {
            Self::BR1 | Self::LA1 | Self::LA2 | Self::NA1 => Region::Americas,
            Self::JP1 | Self::KR => Region::Asia,
            Self::EUN1 | Self::EUW1 | Self::ME1 | Self::RU | Self::TR1 => Region::Europe,
            Self::OC1 | Self::PH2 | Self::SG2 | Self::TH2 | Self::TW2 | Self::VN2 => Region::Sea,
        }
    }
}

impl FromStr for Platform {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|p| p.host() == wanted || p.shorthand() == Some(wanted.as_str()))
            .ok_or_else(|| AppError::InvalidRegion(s.to_string()))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.host().to_ascii_uppercase())
    }
}

/// Regional routing values for Riot API (Account-v1, Match-v5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Americas,
    Asia,
    Europe,
    Sea,
}

impl Region {
    pub fn base_url(self) -> String {
        let host = match self {
            Self::Americas => "americas",
            Self::Asia => "asia",
            Self::Europe => "europe",
            Self::Sea => "sea",
        };
        format!("https://{host}.api.riotgames.com")
    }
}
