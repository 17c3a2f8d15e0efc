//! ID types for league entities.

use crate::error::{LeagueError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = LeagueError;

            fn from_str(s: &str) -> Result<Self> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl rusqlite::ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
                self.0.to_sql()
            }
        }

        impl rusqlite::types::FromSql for $name {
            fn column_result(
                value: rusqlite::types::ValueRef<'_>,
            ) -> rusqlite::types::FromSqlResult<Self> {
                i64::column_result(value).map(Self)
            }
        }
    };
}

entity_id!(
    /// Type-safe wrapper for league IDs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fantasy_league::LeagueId;
    ///
    /// let league_id = LeagueId::new(7);
    /// assert_eq!(league_id.as_i64(), 7);
    /// assert_eq!(league_id.to_string(), "7");
    /// ```
    LeagueId
);
entity_id!(
    /// Type-safe wrapper for team IDs
    TeamId
);
entity_id!(
    /// Type-safe wrapper for player IDs
    PlayerId
);
entity_id!(
    /// Type-safe wrapper for manager (user) IDs
    UserId
);
entity_id!(MatchdayId);
entity_id!(FixtureId);
entity_id!(StatId);
entity_id!(LineupId);
