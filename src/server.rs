//! Region lookup and UID shape checks.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

static GAME_UID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[156789]\d{8}$").unwrap());

/// Game server a UID belongs to, identified by its leading digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Server {
    CnGf01,
    CnQd01,
    OsUsa,
    OsEuro,
    OsAsia,
    OsCht,
}

impl Server {
    pub fn from_leading_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(Self::CnGf01),
            '5' => Some(Self::CnQd01),
            '6' => Some(Self::OsUsa),
            '7' => Some(Self::OsEuro),
            '8' => Some(Self::OsAsia),
            '9' => Some(Self::OsCht),
            _ => None,
        }
    }

    /// Identifier the API expects in the `server` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CnGf01 => "cn_gf01",
            Self::CnQd01 => "cn_qd01",
            Self::OsUsa => "os_usa",
            Self::OsEuro => "os_euro",
            Self::OsAsia => "os_asia",
            Self::OsCht => "os_cht",
        }
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognizes which server a UID is from.
///
/// Accepts anything that renders as the UID's decimal form, so both integers
/// and numeric strings work.
pub fn recognize_server(uid: impl fmt::Display) -> Result<Server> {
    let uid = uid.to_string();
    let first = uid.chars().next();
    first
        .and_then(Server::from_leading_digit)
        .ok_or(Error::UnrecognizedUid(uid))
}

/// True for nine-digit game UIDs; community UIDs and anything else are false.
pub fn is_game_uid(uid: impl fmt::Display) -> bool {
    GAME_UID_RE.is_match(&uid.to_string())
}
