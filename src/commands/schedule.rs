//! Schedule and calendar command implementations

use super::common::{print_json, CommandContext};
use crate::{config::resolve_league_id, storage::Matchday, LeagueId, Result, TeamId};

/// Handle the schedule command
pub fn handle_schedule(
    ctx: &mut CommandContext,
    league_id: Option<LeagueId>,
    reset: bool,
    as_json: bool,
) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;
    let teams: Vec<TeamId> = ctx
        .db
        .league_teams(league_id)?
        .into_iter()
        .map(|t| t.team_id)
        .collect();

    let calendar = ctx.db.generate_schedule(league_id, &teams, reset)?;

    if as_json {
        print_json(&calendar)?;
    } else {
        if reset {
            println!("✓ Results cleared, calendar kept");
        } else {
            println!("✓ Generated {} matchdays", calendar.len());
        }
        print_calendar(&calendar);
    }
    Ok(())
}

/// Handle the calendar command
pub fn handle_calendar(
    ctx: &CommandContext,
    league_id: Option<LeagueId>,
    as_json: bool,
) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;
    let calendar = ctx.db.calendar(league_id)?;

    if as_json {
        print_json(&calendar)?;
    } else {
        print_calendar(&calendar);
    }
    Ok(())
}

fn print_calendar(calendar: &[Matchday]) {
    for md in calendar {
        println!("Matchday {} [id {}]", md.ordinal, md.matchday_id);
        for f in &md.fixtures {
            let score = if f.played {
                format!("{}-{}", f.home_goals, f.away_goals)
            } else {
                "pending".to_string()
            };
            println!(
                "  [{}] team {} vs team {}: {}",
                f.fixture_id, f.home_team_id, f.away_team_id, score
            );
        }
    }
}
