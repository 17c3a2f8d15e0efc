//! CLI argument definitions and parsing structures.

use super::types::{
    ids::{FixtureId, LeagueId, MatchdayId, PlayerId, UserId},
    position::Position,
};
use crate::scoring::RawCounters;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Raw per-match counters shared by the stat and points commands
#[derive(Debug, Clone, Args)]
pub struct CounterArgs {
    /// Goals scored.
    #[clap(long, short, default_value_t = 0)]
    pub goals: u32,

    /// Assists provided.
    #[clap(long, short, default_value_t = 0)]
    pub assists: u32,

    /// Yellow cards received.
    #[clap(long, short = 'y', default_value_t = 0)]
    pub yellow_cards: u32,

    /// The player was sent off.
    #[clap(long)]
    pub red_card: bool,

    /// The player reached the minutes-played threshold.
    #[clap(long = "played")]
    pub played_minimum: bool,

    /// Goals conceded (goalkeepers only).
    #[clap(long, short = 'c', default_value_t = 0)]
    pub goals_conceded: u32,
}

impl From<&CounterArgs> for RawCounters {
    fn from(args: &CounterArgs) -> Self {
        RawCounters {
            goals: args.goals,
            assists: args.assists,
            yellow_cards: args.yellow_cards,
            red_card: args.red_card,
            played_minimum: args.played_minimum,
            goals_conceded: args.goals_conceded,
        }
    }
}

#[derive(Debug, Parser)]
#[clap(name = "fantasy-league", about = "Fantasy football league engine")]
pub struct FantasyLeague {
    /// Database file (or set `FANTASY_LEAGUE_DB`).
    #[clap(long, global = true)]
    pub db: Option<PathBuf>,

    /// JSON scoring policy (or set `FANTASY_SCORING_FILE`).
    #[clap(long, global = true)]
    pub scoring: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a league with its teams, players and managers from a JSON file
    Import {
        /// Path to the league definition.
        file: PathBuf,
    },

    /// Generate the round-robin calendar for a league.
    ///
    /// Refuses if the league already has a calendar unless `--reset` is
    /// given, which clears every result and statistic but keeps the calendar.
    Schedule {
        /// League ID (or set `FANTASY_LEAGUE_ID` env var).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        /// Clear results of an existing calendar instead of failing.
        #[clap(long)]
        reset: bool,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Show the calendar of a league
    Calendar {
        /// League ID (or set `FANTASY_LEAGUE_ID` env var).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Record the final score of a fixture
    Result {
        fixture: FixtureId,
        home_goals: u32,
        away_goals: u32,
    },

    /// Record (or with `--update`, overwrite) a player's statistics for a fixture
    Stat {
        player: PlayerId,
        fixture: FixtureId,

        #[clap(flatten)]
        counters: CounterArgs,

        /// Overwrite the existing statistic row instead of creating one.
        #[clap(long)]
        update: bool,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Register a manager's lineup for a matchday
    Lineup {
        user: UserId,
        matchday: MatchdayId,

        /// Selected players.
        #[clap(required = true, num_args = 1..)]
        players: Vec<PlayerId>,

        /// Replace the existing lineup instead of failing.
        #[clap(long)]
        replace: bool,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Recompute lineup totals and manager totals for a matchday
    Recompute {
        matchday: MatchdayId,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Show the team standings of a league
    Standings {
        /// League ID (or set `FANTASY_LEAGUE_ID` env var).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Show the managers' ranking of a league
    Ranking {
        /// League ID (or set `FANTASY_LEAGUE_ID` env var).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Preview the fantasy points for a set of counters without storing anything
    Points {
        /// Player position: GK or FIELD.
        #[clap(long, short, default_value = "FIELD")]
        position: Position,

        #[clap(flatten)]
        counters: CounterArgs,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}
