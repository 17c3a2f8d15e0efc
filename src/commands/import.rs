//! Import command implementation

use super::common::CommandContext;
use crate::{storage::LeagueImport, LeagueId, Result};
use std::path::Path;

/// Read a league definition from `file` and create it
pub fn handle_import(ctx: &mut CommandContext, file: &Path) -> Result<LeagueId> {
    let raw = std::fs::read_to_string(file)?;
    let import: LeagueImport = serde_json::from_str(&raw)?;
    let league_id = ctx.db.import_league(&import)?;

    println!("✓ Imported league '{}' with id {}", import.name, league_id);
    Ok(league_id)
}
