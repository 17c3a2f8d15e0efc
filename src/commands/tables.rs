//! Standings and ranking command implementations

use super::common::{print_json, signed, CommandContext};
use crate::{config::resolve_league_id, LeagueId, Result};

/// Handle the standings command
pub fn handle_standings(
    ctx: &CommandContext,
    league_id: Option<LeagueId>,
    as_json: bool,
) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;
    let table = ctx.db.compute_standings(league_id)?;

    if as_json {
        print_json(&table)?;
    } else {
        println!(
            "{:>3} {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
            "#", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"
        );
        for row in &table {
            println!(
                "{:>3} {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
                row.rank,
                row.name,
                row.played,
                row.wins,
                row.draws,
                row.losses,
                row.goals_for,
                row.goals_against,
                signed(row.goal_difference),
                row.points
            );
        }
    }
    Ok(())
}

/// Handle the ranking command
pub fn handle_ranking(
    ctx: &CommandContext,
    league_id: Option<LeagueId>,
    as_json: bool,
) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;
    let ranking = ctx.db.user_ranking(league_id)?;

    if as_json {
        print_json(&ranking)?;
    } else {
        for row in &ranking {
            println!("{:>3} {:<24} {:>6}", row.rank, row.name, row.cumulative_points);
        }
    }
    Ok(())
}
