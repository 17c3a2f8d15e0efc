//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use fantasy_league::{
    cli::{Commands, FantasyLeague},
    commands::{
        common::CommandContext, import::handle_import, lineup, match_data, points::handle_points,
        schedule, tables,
    },
    config::Settings,
    scoring::RawCounters,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Run the CLI.
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fantasy_league=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let app = FantasyLeague::parse();
    let settings = Settings::resolve(app.db, app.scoring);

    // Previews never touch the database
    if let Commands::Points {
        position,
        counters,
        json,
    } = &app.command
    {
        let policy = settings
            .scoring_policy()
            .context("failed to load scoring policy")?;
        handle_points(&policy, *position, RawCounters::from(counters), *json)?;
        return Ok(());
    }

    let mut ctx = CommandContext::new(settings).context("failed to open league database")?;

    match app.command {
        Commands::Import { file } => {
            handle_import(&mut ctx, &file)
                .with_context(|| format!("failed to import {}", file.display()))?;
        }

        Commands::Schedule {
            league_id,
            reset,
            json,
        } => schedule::handle_schedule(&mut ctx, league_id, reset, json)?,

        Commands::Calendar { league_id, json } => {
            schedule::handle_calendar(&ctx, league_id, json)?
        }

        Commands::Result {
            fixture,
            home_goals,
            away_goals,
        } => match_data::handle_result(&mut ctx, fixture, home_goals, away_goals)?,

        Commands::Stat {
            player,
            fixture,
            counters,
            update,
            json,
        } => {
            match_data::handle_stat(
                &mut ctx,
                player,
                fixture,
                RawCounters::from(&counters),
                update,
                json,
            )?;
        }

        Commands::Lineup {
            user,
            matchday,
            players,
            replace,
            json,
        } => {
            lineup::handle_lineup(&mut ctx, user, matchday, &players, replace, json)?;
        }

        Commands::Recompute { matchday, json } => {
            lineup::handle_recompute(&mut ctx, matchday, json)?
        }

        Commands::Standings { league_id, json } => {
            tables::handle_standings(&ctx, league_id, json)?
        }

        Commands::Ranking { league_id, json } => tables::handle_ranking(&ctx, league_id, json)?,

        Commands::Points { .. } => {}
    }

    Ok(())
}
