//! Common utilities and helper functions shared across commands.

use crate::{config::Settings, storage::LeagueDatabase, Result};
use serde::Serialize;

/// Context containing common resources needed by most commands
pub struct CommandContext {
    pub settings: Settings,
    pub db: LeagueDatabase,
}

impl CommandContext {
    /// Open the configured database with the configured scoring policy
    pub fn new(settings: Settings) -> Result<Self> {
        let db = settings.open_database()?;
        Ok(Self { settings, db })
    }

    /// Context over an already opened database
    pub fn with_database(db: LeagueDatabase) -> Self {
        Self {
            settings: Settings::default(),
            db,
        }
    }
}

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?); // tarpaulin::skip
    Ok(())
}

/// Render a signed total the way the tables show it
pub fn signed(value: i64) -> String {
    if value > 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed() {
        assert_eq!(signed(3), "+3");
        assert_eq!(signed(0), "0");
        assert_eq!(signed(-2), "-2");
    }

    #[test]
    fn test_context_with_database() {
        let db = LeagueDatabase::open_in_memory().unwrap();
        let ctx = CommandContext::with_database(db);
        assert!(ctx.settings.database_path.is_none());
    }
}
