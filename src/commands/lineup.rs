//! Lineup and recompute command implementations

use super::common::{print_json, CommandContext};
use crate::{storage::Lineup, MatchdayId, PlayerId, Result, UserId};

/// Handle the lineup command
pub fn handle_lineup(
    ctx: &mut CommandContext,
    user_id: UserId,
    matchday_id: MatchdayId,
    players: &[PlayerId],
    replace: bool,
    as_json: bool,
) -> Result<Lineup> {
    let existing = if replace {
        ctx.db.find_lineup(user_id, matchday_id)?
    } else {
        None
    };

    let lineup = match existing {
        Some(current) => ctx.db.update_lineup(current.lineup_id, players)?,
        None => ctx.db.set_lineup(user_id, matchday_id, players)?,
    };

    if as_json {
        print_json(&lineup)?;
    } else {
        println!(
            "✓ Lineup {} for user {} on matchday {}: {} pts",
            lineup.lineup_id, lineup.user_id, lineup.matchday_id, lineup.total_points
        );
    }
    Ok(lineup)
}

/// Handle the recompute command
pub fn handle_recompute(
    ctx: &mut CommandContext,
    matchday_id: MatchdayId,
    as_json: bool,
) -> Result<()> {
    let summary = ctx.db.recompute_matchday(matchday_id)?;

    if as_json {
        print_json(&summary)?;
    } else {
        println!(
            "✓ Matchday {}: {} statistics rescored, {} lineups and {} managers updated",
            matchday_id, summary.stats_rescored, summary.lineups_updated, summary.users_updated
        );
    }
    Ok(())
}
