//! Runtime configuration resolved from flags, environment and defaults.

use crate::{
    error::LeagueError, scoring::ScoringPolicy, storage::LeagueDatabase, LeagueId, Result,
    DB_PATH_ENV_VAR, LEAGUE_ID_ENV_VAR, SCORING_FILE_ENV_VAR,
};
use std::path::PathBuf;

/// Where the engine keeps its data and which rules it scores with.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub database_path: Option<PathBuf>,
    pub scoring_file: Option<PathBuf>,
}

impl Settings {
    /// Flags win over environment variables; unset values stay `None` and
    /// fall back to defaults when used.
    pub fn resolve(database_path: Option<PathBuf>, scoring_file: Option<PathBuf>) -> Self {
        Self {
            database_path: database_path.or_else(|| env_path(DB_PATH_ENV_VAR)),
            scoring_file: scoring_file.or_else(|| env_path(SCORING_FILE_ENV_VAR)),
        }
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(p) => Ok(p.clone()),
            None => LeagueDatabase::default_path(),
        }
    }

    pub fn scoring_policy(&self) -> Result<ScoringPolicy> {
        ScoringPolicy::load_or_default(self.scoring_file.as_deref())
    }

    /// Open the configured database with the configured scoring policy
    pub fn open_database(&self) -> Result<LeagueDatabase> {
        let policy = self.scoring_policy()?;
        let path = self.database_path()?;
        tracing::debug!(path = %path.display(), "opening database");
        Ok(LeagueDatabase::open(&path)?.with_policy(policy))
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Resolve league ID from option or environment variable
pub fn resolve_league_id(league_id: Option<LeagueId>) -> Result<LeagueId> {
    league_id
        .or_else(|| {
            std::env::var(LEAGUE_ID_ENV_VAR)
                .ok()
                .and_then(|s| s.parse::<LeagueId>().ok())
        })
        .ok_or_else(|| LeagueError::MissingLeagueId {
            env_var: LEAGUE_ID_ENV_VAR.to_string(),
        })
}
