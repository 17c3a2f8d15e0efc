//! Database schema and connection management

use crate::{error::LeagueError, scoring::ScoringPolicy, Result};
use dirs::data_dir;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Database connection manager for league data.
///
/// Holds the scoring policy so every write that stores derived points uses
/// the same rules.
pub struct LeagueDatabase {
    pub(crate) conn: Connection,
    pub(crate) policy: ScoringPolicy,
}

impl LeagueDatabase {
    /// Open (or create) the database at `path` and ensure tables exist
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open the database at the default per-user location
    pub fn open_default() -> Result<Self> {
        Self::open(&Self::default_path()?)
    }

    /// In-memory database, mostly for tests and previews
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let mut db = Self {
            conn,
            policy: ScoringPolicy::default(),
        };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Replace the scoring policy used for subsequent writes
    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Get the default path of the database file
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = data_dir().ok_or(LeagueError::NoDataDir)?;
        Ok(data_dir.join("fantasy-league").join("league.db"))
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS leagues (
                league_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS teams (
                team_id INTEGER PRIMARY KEY,
                league_id INTEGER NOT NULL REFERENCES leagues(league_id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                badge TEXT
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS players (
                player_id INTEGER PRIMARY KEY,
                team_id INTEGER NOT NULL REFERENCES teams(team_id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                position INTEGER NOT NULL,
                price INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                user_id INTEGER PRIMARY KEY,
                league_id INTEGER NOT NULL REFERENCES leagues(league_id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                cumulative_points INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS matchdays (
                matchday_id INTEGER PRIMARY KEY,
                league_id INTEGER NOT NULL REFERENCES leagues(league_id) ON DELETE CASCADE,
                ordinal INTEGER NOT NULL,
                UNIQUE (league_id, ordinal)
            )",
            [],
        )?;

        // `played` is explicit so a genuine 0-0 is distinguishable from a
        // fixture with no result yet.
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS fixtures (
                fixture_id INTEGER PRIMARY KEY,
                matchday_id INTEGER NOT NULL REFERENCES matchdays(matchday_id) ON DELETE CASCADE,
                home_team_id INTEGER NOT NULL REFERENCES teams(team_id),
                away_team_id INTEGER NOT NULL REFERENCES teams(team_id),
                home_goals INTEGER NOT NULL DEFAULT 0,
                away_goals INTEGER NOT NULL DEFAULT 0,
                played INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS player_match_stats (
                stat_id INTEGER PRIMARY KEY,
                player_id INTEGER NOT NULL REFERENCES players(player_id) ON DELETE CASCADE,
                fixture_id INTEGER NOT NULL REFERENCES fixtures(fixture_id) ON DELETE CASCADE,
                goals INTEGER NOT NULL DEFAULT 0,
                assists INTEGER NOT NULL DEFAULT 0,
                yellow_cards INTEGER NOT NULL DEFAULT 0,
                red_card INTEGER NOT NULL DEFAULT 0,
                played_minimum INTEGER NOT NULL DEFAULT 0,
                goals_conceded INTEGER NOT NULL DEFAULT 0,
                points INTEGER NOT NULL DEFAULT 0,
                UNIQUE (player_id, fixture_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS lineups (
                lineup_id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
                matchday_id INTEGER NOT NULL REFERENCES matchdays(matchday_id) ON DELETE CASCADE,
                total_points INTEGER NOT NULL DEFAULT 0,
                UNIQUE (user_id, matchday_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS lineup_players (
                lineup_id INTEGER NOT NULL REFERENCES lineups(lineup_id) ON DELETE CASCADE,
                player_id INTEGER NOT NULL REFERENCES players(player_id) ON DELETE CASCADE,
                slot INTEGER NOT NULL,
                PRIMARY KEY (lineup_id, player_id)
            )",
            [],
        )?;

        // Create indexes for the recompute paths
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_fixtures_matchday ON fixtures(matchday_id)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_stats_fixture ON player_match_stats(fixture_id)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_lineups_matchday ON lineups(matchday_id)",
            [],
        )?;

        Ok(())
    }
}
