//! Error types for the fantasy league engine

use thiserror::Error;


pub type Result<T> = std::result::Result<T, LeagueError>;

/// Broad category of a [`LeagueError`], used by callers to decide how to react
/// (e.g. switch from create to update on a conflict).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    State,
    Storage,
    Config,
}

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Invalid state: {message}")]
    State { message: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse identifier: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("League ID not provided and {env_var} environment variable not set")]
    MissingLeagueId { env_var: String },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Could not determine data directory")]
    NoDataDir,
}

impl LeagueError {
    pub fn validation(message: impl Into<String>) -> Self {
        LeagueError::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        LeagueError::Conflict {
            message: message.into(),
        }
    }

    pub fn state(message: impl Into<String>) -> Self {
        LeagueError::State {
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: i64) -> Self {
        LeagueError::NotFound { entity, id }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LeagueError::Validation { .. }
            | LeagueError::InvalidId(_)
            | LeagueError::InvalidPosition { .. } => ErrorKind::Validation,
            LeagueError::NotFound { .. } => ErrorKind::NotFound,
            LeagueError::Conflict { .. } => ErrorKind::Conflict,
            LeagueError::State { .. } => ErrorKind::State,
            LeagueError::Database(_) => ErrorKind::Storage,
            LeagueError::Json(_)
            | LeagueError::Io(_)
            | LeagueError::MissingLeagueId { .. }
            | LeagueError::NoDataDir => ErrorKind::Config,
        }
    }
}
