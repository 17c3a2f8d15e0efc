//! Fantasy League Engine Library
//!
//! Runs a season-long fantasy football league: builds the match calendar,
//! turns per-player match statistics into fantasy points, aggregates results
//! into a standings table, and propagates lineup points into each manager's
//! cumulative ranking.
//!
//! ## Components
//!
//! - **Schedule** (`schedule`): round-robin calendar by the circle method
//! - **Scoring** (`scoring`): pure fantasy points calculation
//! - **Standings** (`standings`): competition table from fixture results
//! - **Ranking** (`ranking`): lineup totals and manager rankings
//! - **Storage** (`storage`): SQLite persistence and transactional recompute passes
//!
//! ## Quick Start
//!
//! ```rust
//! use fantasy_league::{scoring::RawCounters, storage::LeagueDatabase, Position};
//!
//! # fn example() -> fantasy_league::Result<()> {
//! let mut db = LeagueDatabase::open_in_memory()?;
//! let league = db.create_league("Liga")?;
//! let home = db.create_team(league, "Rojos", None)?;
//! let away = db.create_team(league, "Azules", None)?;
//! let striker = db.create_player(home, "Raúl", Position::FieldPlayer, 12)?;
//!
//! let calendar = db.generate_schedule(league, &[home, away], false)?;
//! let fixture = calendar[0].fixtures[0].fixture_id;
//! db.record_result(fixture, 1, 0)?;
//!
//! let stat = db.record_stat(
//!     striker,
//!     fixture,
//!     RawCounters { goals: 1, played_minimum: true, ..Default::default() },
//! )?;
//! assert_eq!(stat.points, 5);
//! assert_eq!(db.compute_standings(league)?[0].team_id, home);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export FANTASY_LEAGUE_ID=1
//! export FANTASY_LEAGUE_DB=/path/to/league.db
//! export FANTASY_SCORING_FILE=/path/to/scoring.json
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod ranking;
pub mod schedule;
pub mod scoring;
pub mod standings;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{
    ids::{FixtureId, LeagueId, LineupId, MatchdayId, PlayerId, StatId, TeamId, UserId},
    position::Position,
};
pub use error::{ErrorKind, LeagueError, Result};
pub use scoring::{compute_fantasy_points, RawCounters, ScoringPolicy};

pub const LEAGUE_ID_ENV_VAR: &str = "FANTASY_LEAGUE_ID";
pub const DB_PATH_ENV_VAR: &str = "FANTASY_LEAGUE_DB";
pub const SCORING_FILE_ENV_VAR: &str = "FANTASY_SCORING_FILE";
