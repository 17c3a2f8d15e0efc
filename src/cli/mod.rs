//! CLI argument definitions and parsing.

pub mod args;
pub mod types;

pub use args::{Commands, CounterArgs, FantasyLeague};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LeagueId, PlayerId, Position};
    use clap::Parser;

    #[test]
    fn test_parse_stat_command() {
        let app = FantasyLeague::parse_from([
            "fantasy-league", "stat", "7", "3", "--goals", "2", "--played", "-y", "1",
        ]);

        match app.command {
            Commands::Stat {
                player,
                fixture,
                counters,
                update,
                ..
            } => {
                assert_eq!(player, PlayerId::new(7));
                assert_eq!(fixture.as_i64(), 3);
                assert_eq!(counters.goals, 2);
                assert_eq!(counters.yellow_cards, 1);
                assert!(counters.played_minimum);
                assert!(!counters.red_card);
                assert!(!update);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_db_and_league() {
        let app = FantasyLeague::parse_from([
            "fantasy-league", "standings", "--db", "/tmp/x.db", "-l", "4", "--json",
        ]);
        assert_eq!(app.db.as_deref(), Some(std::path::Path::new("/tmp/x.db")));
        match app.command {
            Commands::Standings { league_id, json } => {
                assert_eq!(league_id, Some(LeagueId::new(4)));
                assert!(json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_points_position() {
        let app = FantasyLeague::parse_from(["fantasy-league", "points", "-p", "gk", "--played"]);
        match app.command {
            Commands::Points { position, counters, .. } => {
                assert_eq!(position, Position::Goalkeeper);
                assert!(counters.played_minimum);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_lineup_requires_players() {
        let result = FantasyLeague::try_parse_from(["fantasy-league", "lineup", "1", "2"]);
        assert!(result.is_err());
    }
}
