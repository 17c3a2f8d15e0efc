//! Player position types.

use crate::error::LeagueError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position flag of a player.
///
/// Scoring only distinguishes goalkeepers from everybody else, so this is a
/// two-way tag rather than a full list of on-pitch roles.
///
/// # Examples
///
/// ```rust
/// use fantasy_league::Position;
///
/// let gk: Position = "por".parse().unwrap();
/// assert_eq!(gk, Position::Goalkeeper);
/// assert_eq!(gk.to_string(), "GK");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Goalkeeper,
    FieldPlayer,
}

impl Position {
    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::Goalkeeper)
    }

    /// Storage code for this position.
    pub fn to_u8(&self) -> u8 {
        match self {
            Position::Goalkeeper => 1,
            Position::FieldPlayer => 0,
        }
    }

    pub fn try_from(code: u8) -> Result<Self, LeagueError> {
        match code {
            1 => Ok(Position::Goalkeeper),
            0 => Ok(Position::FieldPlayer),
            _ => Err(LeagueError::InvalidPosition {
                position: code.to_string(),
            }),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::Goalkeeper => "GK",
            Position::FieldPlayer => "FIELD",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Position {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GK" | "GOALKEEPER" | "POR" => Ok(Position::Goalkeeper),
            "FIELD" | "FP" | "OUTFIELD" => Ok(Position::FieldPlayer),
            other => Err(LeagueError::InvalidPosition {
                position: other.to_string(),
            }),
        }
    }
}
