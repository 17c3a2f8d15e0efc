//! Unit tests for storage functionality

use super::*;
use crate::{
    scoring::RawCounters, ErrorKind, FixtureId, LeagueId, MatchdayId, PlayerId, Position,
    StatId, TeamId, UserId,
};

fn create_test_db() -> LeagueDatabase {
    LeagueDatabase::open_in_memory().unwrap()
}

/// League with `n` teams, each with one goalkeeper and four field players.
fn create_test_league(db: &mut LeagueDatabase, n: usize) -> (LeagueId, Vec<TeamId>) {
    let league_id = db.create_league("Test League").unwrap();
    let mut teams = Vec::new();
    for t in 0..n {
        let team_id = db
            .create_team(league_id, &format!("Team {}", t + 1), None)
            .unwrap();
        db.create_player(team_id, &format!("Keeper {}", t + 1), Position::Goalkeeper, 5)
            .unwrap();
        for p in 0..4 {
            db.create_player(
                team_id,
                &format!("Player {}-{}", t + 1, p + 1),
                Position::FieldPlayer,
                10,
            )
            .unwrap();
        }
        teams.push(team_id);
    }
    (league_id, teams)
}

fn squad(db: &LeagueDatabase, team_id: TeamId) -> Vec<PlayerId> {
    db.team_players(team_id)
        .unwrap()
        .into_iter()
        .map(|p| p.player_id)
        .collect()
}

fn played(goals: u32) -> RawCounters {
    RawCounters {
        goals,
        played_minimum: true,
        ..RawCounters::default()
    }
}

#[cfg(test)]
mod schema_tests {
    use super::*;

    #[test]
    fn test_database_creation() {
        let _db = create_test_db();
        // Should not panic - database creation successful
    }

    #[test]
    fn test_open_on_disk_reuses_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("league.db");

        let league_id = {
            let mut db = LeagueDatabase::open(&path).unwrap();
            db.create_league("Persisted").unwrap()
        };

        let db = LeagueDatabase::open(&path).unwrap();
        assert_eq!(db.get_league(league_id).unwrap().name, "Persisted");
    }

    #[test]
    fn test_default_policy() {
        let db = create_test_db();
        assert_eq!(db.policy().lineup.size(), 5);
    }
}

#[cfg(test)]
mod record_tests {
    use super::*;

    #[test]
    fn test_create_team_requires_league() {
        let mut db = create_test_db();
        let err = db.create_team(LeagueId::new(99), "Orphans", None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_empty_league_name_rejected() {
        let mut db = create_test_db();
        let err = db.create_league("  ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_player_round_trip() {
        let mut db = create_test_db();
        let (_, teams) = create_test_league(&mut db, 2);

        let players = db.team_players(teams[0]).unwrap();
        assert_eq!(players.len(), 5);
        assert_eq!(players[0].position, Position::Goalkeeper);
        assert_eq!(players[1].position, Position::FieldPlayer);
        assert_eq!(players[1].price, 10);
    }

    #[test]
    fn test_import_league() {
        let mut db = create_test_db();
        let import: LeagueImport = serde_json::from_str(
            r#"{
                "name": "Liga",
                "teams": [
                    { "name": "Rojos", "badge": "rojos.png",
                      "players": [{ "name": "Casillas", "position": "goalkeeper", "price": 8 }] },
                    { "name": "Azules" }
                ],
                "users": [{ "name": "Ana" }, { "name": "Luis" }]
            }"#,
        )
        .unwrap();

        let league_id = db.import_league(&import).unwrap();
        let teams = db.league_teams(league_id).unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].badge.as_deref(), Some("rojos.png"));
        assert_eq!(db.team_players(teams[0].team_id).unwrap().len(), 1);
        assert_eq!(db.league_users(league_id).unwrap().len(), 2);
    }
}

#[cfg(test)]
mod schedule_tests {
    use super::*;

    #[test]
    fn test_generate_schedule_creates_calendar() {
        let mut db = create_test_db();
        let (league_id, teams) = create_test_league(&mut db, 4);

        let calendar = db.generate_schedule(league_id, &teams, false).unwrap();
        assert_eq!(calendar.len(), 3);
        for (i, md) in calendar.iter().enumerate() {
            assert_eq!(md.ordinal as usize, i + 1);
            assert_eq!(md.fixtures.len(), 2);
            assert!(md
                .fixtures
                .iter()
                .all(|f| !f.played && f.home_goals == 0 && f.away_goals == 0));
        }
    }

    #[test]
    fn test_generate_schedule_odd_teams() {
        let mut db = create_test_db();
        let (league_id, teams) = create_test_league(&mut db, 3);

        let calendar = db.generate_schedule(league_id, &teams, false).unwrap();
        assert_eq!(calendar.len(), 3);
        assert!(calendar.iter().all(|md| md.fixtures.len() == 1));
    }

    #[test]
    fn test_too_few_teams_creates_nothing() {
        let mut db = create_test_db();
        let (league_id, teams) = create_test_league(&mut db, 1);

        let err = db.generate_schedule(league_id, &teams, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(db.calendar(league_id).unwrap().is_empty());
    }

    #[test]
    fn test_second_generation_is_a_conflict() {
        let mut db = create_test_db();
        let (league_id, teams) = create_test_league(&mut db, 4);
        db.generate_schedule(league_id, &teams, false).unwrap();

        let err = db.generate_schedule(league_id, &teams, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(db.calendar(league_id).unwrap().len(), 3);
    }

    #[test]
    fn test_foreign_team_rejected() {
        let mut db = create_test_db();
        let (league_id, mut teams) = create_test_league(&mut db, 2);
        let (_, other) = create_test_league(&mut db, 1);
        teams.push(other[0]);

        let err = db.generate_schedule(league_id, &teams, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(db.calendar(league_id).unwrap().is_empty());
    }

    #[test]
    fn test_reset_keeps_calendar_and_clears_results() {
        let mut db = create_test_db();
        let (league_id, teams) = create_test_league(&mut db, 2);
        let calendar = db.generate_schedule(league_id, &teams, false).unwrap();
        let fixture = &calendar[0].fixtures[0];

        db.record_result(fixture.fixture_id, 2, 1).unwrap();
        let scorer = squad(&db, fixture.home_team_id)[1];
        db.record_stat(scorer, fixture.fixture_id, played(2)).unwrap();

        let again = db.generate_schedule(league_id, &teams, true).unwrap();
        assert_eq!(again.len(), calendar.len());
        assert_eq!(again[0].matchday_id, calendar[0].matchday_id);

        let fx = db.get_fixture(fixture.fixture_id).unwrap();
        assert!(!fx.played);
        assert_eq!((fx.home_goals, fx.away_goals), (0, 0));
        assert!(db.fixture_stats(fixture.fixture_id).unwrap().is_empty());
    }

    #[test]
    fn test_reset_ignores_team_list() {
        let mut db = create_test_db();
        let (league_id, teams) = create_test_league(&mut db, 4);
        let calendar = db.generate_schedule(league_id, &teams, false).unwrap();

        let again = db.generate_schedule(league_id, &[], true).unwrap();
        assert_eq!(again, calendar);
    }

    #[test]
    fn test_reset_without_schedule_is_state_error() {
        let mut db = create_test_db();
        let (league_id, _) = create_test_league(&mut db, 2);
        let err = db.reset_results(league_id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
    }

    #[test]
    fn test_delete_matchday_only_without_stats() {
        let mut db = create_test_db();
        let (league_id, teams) = create_test_league(&mut db, 4);
        let calendar = db.generate_schedule(league_id, &teams, false).unwrap();

        let first = &calendar[0];
        let fixture = &first.fixtures[0];
        let player = squad(&db, fixture.away_team_id)[2];
        db.record_stat(player, fixture.fixture_id, played(0)).unwrap();

        let err = db.delete_matchday(first.matchday_id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);

        db.delete_matchday(calendar[2].matchday_id).unwrap();
        assert_eq!(db.calendar(league_id).unwrap().len(), 2);

        let err = db.get_matchday(calendar[2].matchday_id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}

#[cfg(test)]
mod stat_tests {
    use super::*;

    fn setup() -> (LeagueDatabase, LeagueId, Vec<TeamId>, Vec<Matchday>) {
        let mut db = create_test_db();
        let (league_id, teams) = create_test_league(&mut db, 2);
        let calendar = db.generate_schedule(league_id, &teams, false).unwrap();
        (db, league_id, teams, calendar)
    }

    #[test]
    fn test_record_stat_scores_points() {
        let (mut db, _, teams, calendar) = setup();
        let fixture = calendar[0].fixtures[0].fixture_id;
        let keeper = squad(&db, teams[0])[0];

        let stat = db.record_stat(keeper, fixture, played(0)).unwrap();
        // attendance + clean sheet
        assert_eq!(stat.points, 6);
        assert_eq!(db.get_stat(stat.stat_id).unwrap(), stat);
    }

    #[test]
    fn test_duplicate_stat_is_conflict() {
        let (mut db, _, teams, calendar) = setup();
        let fixture = calendar[0].fixtures[0].fixture_id;
        let player = squad(&db, teams[1])[1];

        db.record_stat(player, fixture, played(1)).unwrap();
        let err = db.record_stat(player, fixture, played(2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(err.to_string().contains("update it instead"));
    }

    #[test]
    fn test_missing_player_or_fixture() {
        let (mut db, _, teams, calendar) = setup();
        let fixture = calendar[0].fixtures[0].fixture_id;
        let player = squad(&db, teams[0])[1];

        let err = db.record_stat(PlayerId::new(999), fixture, played(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = db.record_stat(player, FixtureId::new(999), played(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_too_many_yellow_cards_rejected() {
        let (mut db, _, teams, calendar) = setup();
        let fixture = calendar[0].fixtures[0].fixture_id;
        let player = squad(&db, teams[0])[1];

        let counters = RawCounters {
            yellow_cards: 3,
            ..played(0)
        };
        let err = db.record_stat(player, fixture, counters).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(db.find_stat(player, fixture).unwrap().is_none());
    }

    #[test]
    fn test_implausible_counters_rejected() {
        let (mut db, _, teams, calendar) = setup();
        let fixture = calendar[0].fixtures[0].fixture_id;
        let player = squad(&db, teams[0])[1];

        let err = db
            .record_stat(player, fixture, played(600_000_000))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(db.find_stat(player, fixture).unwrap().is_none());

        let stat = db.record_stat(player, fixture, played(1)).unwrap();
        let err = db
            .update_stat(stat.stat_id, played(3_000_000_000))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(db.get_stat(stat.stat_id).unwrap(), stat);
    }

    #[test]
    fn test_player_outside_fixture_rejected() {
        let mut db = create_test_db();
        let (league_id, teams) = create_test_league(&mut db, 4);
        let calendar = db.generate_schedule(league_id, &teams, false).unwrap();
        let fixture = &calendar[0].fixtures[0];

        let outsider = teams
            .iter()
            .find(|t| **t != fixture.home_team_id && **t != fixture.away_team_id)
            .copied()
            .unwrap();
        let player = squad(&db, outsider)[1];

        let err = db.record_stat(player, fixture.fixture_id, played(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_update_stat_overwrites_points() {
        let (mut db, _, teams, calendar) = setup();
        let fixture = calendar[0].fixtures[0].fixture_id;
        let player = squad(&db, teams[0])[1];

        let stat = db.record_stat(player, fixture, played(2)).unwrap();
        assert_eq!(stat.points, 9);

        let updated = db.update_stat(stat.stat_id, played(1)).unwrap();
        assert_eq!(updated.points, 5);
        assert_eq!(updated.counters.goals, 1);
    }

    #[test]
    fn test_update_missing_stat() {
        let (mut db, ..) = setup();
        let err = db.update_stat(StatId::new(42), played(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_delete_stat() {
        let (mut db, _, teams, calendar) = setup();
        let fixture = calendar[0].fixtures[0].fixture_id;
        let player = squad(&db, teams[0])[1];

        let stat = db.record_stat(player, fixture, played(1)).unwrap();
        db.delete_stat(stat.stat_id).unwrap();
        assert!(db.find_stat(player, fixture).unwrap().is_none());
    }

    #[test]
    fn test_record_result_marks_played() {
        let (mut db, _, _, calendar) = setup();
        let fixture = calendar[0].fixtures[0].fixture_id;

        let fx = db.record_result(fixture, 0, 0).unwrap();
        assert!(fx.played);
        assert_eq!((fx.home_goals, fx.away_goals), (0, 0));

        let err = db.record_result(FixtureId::new(77), 1, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}

#[cfg(test)]
mod lineup_tests {
    use super::*;

    fn setup() -> (LeagueDatabase, LeagueId, Vec<TeamId>, Vec<Matchday>, UserId) {
        let mut db = create_test_db();
        let (league_id, teams) = create_test_league(&mut db, 2);
        let calendar = db.generate_schedule(league_id, &teams, false).unwrap();
        let user = db.create_user(league_id, "Manager").unwrap();
        (db, league_id, teams, calendar, user)
    }

    #[test]
    fn test_set_lineup_and_conflict() {
        let (mut db, _, teams, calendar, user) = setup();
        let md = calendar[0].matchday_id;
        let players = squad(&db, teams[0]);

        let lineup = db.set_lineup(user, md, &players).unwrap();
        assert_eq!(lineup.players, players);
        assert_eq!(lineup.total_points, 0);
        assert_eq!(db.find_lineup(user, md).unwrap(), Some(lineup.clone()));

        let err = db.set_lineup(user, md, &players).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_lineup_shape_enforced() {
        let (mut db, _, teams, calendar, user) = setup();
        let md = calendar[0].matchday_id;
        let players = squad(&db, teams[0]);

        let err = db.set_lineup(user, md, &players[..4]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        // Two keepers, three field players
        let mut two_keepers = players[..4].to_vec();
        two_keepers.push(squad(&db, teams[1])[0]);
        let err = db.set_lineup(user, md, &two_keepers).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_lineup_missing_user_or_matchday() {
        let (mut db, _, teams, calendar, _) = setup();
        let players = squad(&db, teams[0]);

        let err = db
            .set_lineup(UserId::new(500), calendar[0].matchday_id, &players)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let user = db.league_users(calendar[0].league_id).unwrap()[0].user_id;
        let err = db
            .set_lineup(user, MatchdayId::new(500), &players)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_update_lineup_replaces_selection() {
        let (mut db, _, teams, calendar, user) = setup();
        let md = calendar[0].matchday_id;
        let fixture = calendar[0].fixtures[0].fixture_id;
        let home = squad(&db, teams[0]);
        let away = squad(&db, teams[1]);

        db.record_stat(away[1], fixture, played(1)).unwrap();
        let lineup = db.set_lineup(user, md, &home).unwrap();
        assert_eq!(lineup.total_points, 0);

        let mut selection = home.clone();
        selection[1] = away[1];
        let lineup = db.update_lineup(lineup.lineup_id, &selection).unwrap();
        assert_eq!(lineup.players, selection);
        assert_eq!(lineup.total_points, 5);
        assert_eq!(db.get_user(user).unwrap().cumulative_points, 5);
    }

    #[test]
    fn test_delete_user_removes_lineups() {
        let (mut db, league_id, teams, calendar, user) = setup();
        let md = calendar[0].matchday_id;
        let lineup = db.set_lineup(user, md, &squad(&db, teams[0])).unwrap();

        db.delete_user(user).unwrap();
        assert!(db.matchday_lineups(md).unwrap().is_empty());
        assert_eq!(
            db.get_lineup(lineup.lineup_id).unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert!(db.user_ranking(league_id).unwrap().is_empty());
    }
}

#[cfg(test)]
mod recompute_tests {
    use super::*;

    #[test]
    fn test_recompute_unknown_matchday() {
        let mut db = create_test_db();
        let err = db.recompute_matchday(MatchdayId::new(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_recompute_matchday_without_fixtures() {
        let mut db = create_test_db();
        let (league_id, teams) = create_test_league(&mut db, 2);
        let calendar = db.generate_schedule(league_id, &teams, false).unwrap();
        let md = calendar[0].matchday_id;

        // Strip the fixtures to simulate a matchday that is not playable yet.
        db.conn
            .execute("DELETE FROM fixtures WHERE matchday_id = ?", [md.as_i64()])
            .unwrap();

        let err = db.recompute_matchday(md).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);

        let user = db.create_user(league_id, "Early bird").unwrap();
        let err = db.set_lineup(user, md, &squad(&db, teams[0])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
    }

    #[test]
    fn test_recompute_repairs_stale_derived_values() {
        let mut db = create_test_db();
        let (league_id, teams) = create_test_league(&mut db, 2);
        let calendar = db.generate_schedule(league_id, &teams, false).unwrap();
        let md = calendar[0].matchday_id;
        let fixture = calendar[0].fixtures[0].fixture_id;
        let players = squad(&db, teams[0]);
        let user = db.create_user(league_id, "Manager").unwrap();

        let stat = db.record_stat(players[1], fixture, played(1)).unwrap();
        db.set_lineup(user, md, &players).unwrap();

        db.conn
            .execute_batch(
                "UPDATE player_match_stats SET points = 100;
                 UPDATE lineups SET total_points = 100;
                 UPDATE users SET cumulative_points = 100;",
            )
            .unwrap();

        let summary = db.recompute_matchday(md).unwrap();
        assert_eq!(summary.stats_rescored, 1);
        assert_eq!(summary.lineups_updated, 1);
        assert_eq!(summary.users_updated, 1);

        assert_eq!(db.get_stat(stat.stat_id).unwrap().points, 5);
        assert_eq!(db.find_lineup(user, md).unwrap().unwrap().total_points, 5);
        assert_eq!(db.get_user(user).unwrap().cumulative_points, 5);
    }
}
