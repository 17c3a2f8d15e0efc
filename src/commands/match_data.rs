//! Result and statistic command implementations

use super::common::{print_json, CommandContext};
use crate::{
    error::LeagueError, scoring::RawCounters, storage::PlayerMatchStat, FixtureId, PlayerId,
    Result,
};

/// Handle the result command
pub fn handle_result(
    ctx: &mut CommandContext,
    fixture_id: FixtureId,
    home_goals: u32,
    away_goals: u32,
) -> Result<()> {
    let fixture = ctx.db.record_result(fixture_id, home_goals, away_goals)?;
    println!(
        "✓ Fixture {}: team {} {}-{} team {}",
        fixture.fixture_id,
        fixture.home_team_id,
        fixture.home_goals,
        fixture.away_goals,
        fixture.away_team_id
    );
    Ok(())
}

/// Handle the stat command.
///
/// Without `update` a second row for the same player and fixture is a
/// conflict; with it the existing row is overwritten.
pub fn handle_stat(
    ctx: &mut CommandContext,
    player_id: PlayerId,
    fixture_id: FixtureId,
    counters: RawCounters,
    update: bool,
    as_json: bool,
) -> Result<PlayerMatchStat> {
    let stat = if update {
        let existing = ctx
            .db
            .find_stat(player_id, fixture_id)?
            .ok_or_else(|| LeagueError::not_found("PlayerMatchStat", player_id.as_i64()))?;
        ctx.db.update_stat(existing.stat_id, counters)?
    } else {
        ctx.db.record_stat(player_id, fixture_id, counters)?
    };

    if as_json {
        print_json(&stat)?;
    } else {
        println!(
            "✓ Player {} in fixture {}: {} pts [stat {}]",
            stat.player_id, stat.fixture_id, stat.points, stat.stat_id
        );
    }
    Ok(stat)
}
