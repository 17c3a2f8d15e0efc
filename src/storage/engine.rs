//! League engine operations.
//!
//! Every mutating operation runs in a single `IMMEDIATE` transaction: inputs
//! are validated and looked up first, then raw data is written, then every
//! derived value it affects (statistic points, lineup totals, manager
//! totals) is recomputed from scratch before the commit.

use super::{models::*, queries::*, schema::LeagueDatabase};
use crate::{
    error::LeagueError,
    ranking::{self, RankingRow},
    schedule,
    scoring::{RawCounters, ScoringPolicy},
    standings::{self, FixtureScore, TeamRow},
    FixtureId, LeagueId, LineupId, MatchdayId, PlayerId, Position, Result, StatId, TeamId,
    UserId,
};
use rusqlite::{params, Connection, Transaction, TransactionBehavior};
use std::collections::HashMap;

impl LeagueDatabase {
    fn begin(&mut self) -> Result<Transaction<'_>> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }

    /// Create the round-robin calendar for a league.
    ///
    /// Refused with a conflict if the league already has matchdays, unless
    /// `reset` is set, in which case results are cleared and the existing
    /// calendar is kept and returned.
    pub fn generate_schedule(
        &mut self,
        league_id: LeagueId,
        team_ids: &[TeamId],
        reset: bool,
    ) -> Result<Vec<Matchday>> {
        let tx = self.begin()?;
        fetch_league(&tx, league_id)?;

        if count_matchdays(&tx, league_id)? > 0 {
            if !reset {
                return Err(LeagueError::conflict(format!(
                    "league {} already has a schedule; reset results instead of regenerating",
                    league_id
                )));
            }
            reset_results_in(&tx, league_id)?;
            let calendar = fetch_calendar(&tx, league_id)?;
            tx.commit()?;
            return Ok(calendar);
        }

        let rounds = schedule::round_robin(team_ids)?;
        for team_id in team_ids {
            let team = fetch_team(&tx, *team_id)?;
            if team.league_id != league_id {
                return Err(LeagueError::validation(format!(
                    "team {} does not belong to league {}",
                    team_id, league_id
                )));
            }
        }

        for round in &rounds {
            tx.execute(
                "INSERT INTO matchdays (league_id, ordinal) VALUES (?, ?)",
                params![league_id, (round.index + 1) as u32],
            )?;
            let matchday_id = tx.last_insert_rowid();
            for pairing in &round.pairings {
                tx.execute(
                    "INSERT INTO fixtures (matchday_id, home_team_id, away_team_id)
                     VALUES (?, ?, ?)",
                    params![matchday_id, pairing.home, pairing.away],
                )?;
            }
        }

        let calendar = fetch_calendar(&tx, league_id)?;
        tx.commit()?;

        tracing::info!(
            league = %league_id,
            teams = team_ids.len(),
            matchdays = calendar.len(),
            "generated schedule"
        );
        Ok(calendar)
    }

    /// Clear every statistic and score of a league, keeping the calendar.
    /// Returns the number of statistic rows removed.
    pub fn reset_results(&mut self, league_id: LeagueId) -> Result<usize> {
        let tx = self.begin()?;
        fetch_league(&tx, league_id)?;
        if count_matchdays(&tx, league_id)? == 0 {
            return Err(LeagueError::state(format!(
                "league {} has no schedule to reset",
                league_id
            )));
        }
        let removed = reset_results_in(&tx, league_id)?;
        tx.commit()?;
        Ok(removed)
    }

    /// Record the final score of a fixture and mark it played
    pub fn record_result(
        &mut self,
        fixture_id: FixtureId,
        home_goals: u32,
        away_goals: u32,
    ) -> Result<Fixture> {
        let tx = self.begin()?;
        fetch_fixture(&tx, fixture_id)?;
        tx.execute(
            "UPDATE fixtures SET home_goals = ?, away_goals = ?, played = 1 WHERE fixture_id = ?",
            params![home_goals, away_goals, fixture_id],
        )?;
        let fixture = fetch_fixture(&tx, fixture_id)?;
        tx.commit()?;

        tracing::info!(fixture = %fixture_id, home_goals, away_goals, "recorded result");
        Ok(fixture)
    }

    /// Store a new statistic row, score it, and refresh the matchday's
    /// lineup and manager totals.
    pub fn record_stat(
        &mut self,
        player_id: PlayerId,
        fixture_id: FixtureId,
        counters: RawCounters,
    ) -> Result<PlayerMatchStat> {
        self.policy.validate(&counters)?;
        let policy = self.policy.clone();

        let tx = self.begin()?;
        let player = fetch_player(&tx, player_id)?;
        let fixture = fetch_fixture(&tx, fixture_id)?;
        ensure_player_in_fixture(&player, &fixture)?;

        if let Some(existing) = find_stat_row(&tx, player_id, fixture_id)? {
            return Err(LeagueError::conflict(format!(
                "statistic {} already recorded for player {} in fixture {}; update it instead",
                existing.stat_id, player_id, fixture_id
            )));
        }

        let points = policy.points(&counters, player.position);
        tx.execute(
            "INSERT INTO player_match_stats
             (player_id, fixture_id, goals, assists, yellow_cards, red_card,
              played_minimum, goals_conceded, points)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                player_id,
                fixture_id,
                counters.goals,
                counters.assists,
                counters.yellow_cards,
                counters.red_card,
                counters.played_minimum,
                counters.goals_conceded,
                points
            ],
        )?;
        let stat_id = StatId::new(tx.last_insert_rowid());
        tracing::debug!(stat = %stat_id, player = %player_id, points, "scored statistic");

        recompute_matchday_in(&tx, &policy, fixture.matchday_id)?;
        let stat = fetch_stat(&tx, stat_id)?;
        tx.commit()?;
        Ok(stat)
    }

    /// Overwrite the raw counters of a statistic row and propagate
    pub fn update_stat(&mut self, stat_id: StatId, counters: RawCounters) -> Result<PlayerMatchStat> {
        self.policy.validate(&counters)?;
        let policy = self.policy.clone();

        let tx = self.begin()?;
        let stat = fetch_stat(&tx, stat_id)?;
        let fixture = fetch_fixture(&tx, stat.fixture_id)?;

        tx.execute(
            "UPDATE player_match_stats
             SET goals = ?, assists = ?, yellow_cards = ?, red_card = ?,
                 played_minimum = ?, goals_conceded = ?
             WHERE stat_id = ?",
            params![
                counters.goals,
                counters.assists,
                counters.yellow_cards,
                counters.red_card,
                counters.played_minimum,
                counters.goals_conceded,
                stat_id
            ],
        )?;

        // Rescoring happens inside the recompute pass.
        recompute_matchday_in(&tx, &policy, fixture.matchday_id)?;
        let stat = fetch_stat(&tx, stat_id)?;
        tx.commit()?;
        Ok(stat)
    }

    /// Remove a statistic row and propagate
    pub fn delete_stat(&mut self, stat_id: StatId) -> Result<()> {
        let policy = self.policy.clone();

        let tx = self.begin()?;
        let stat = fetch_stat(&tx, stat_id)?;
        let fixture = fetch_fixture(&tx, stat.fixture_id)?;
        tx.execute(
            "DELETE FROM player_match_stats WHERE stat_id = ?",
            params![stat_id],
        )?;
        recompute_matchday_in(&tx, &policy, fixture.matchday_id)?;
        tx.commit()?;
        Ok(())
    }

    /// Register a manager's selection for a matchday
    pub fn set_lineup(
        &mut self,
        user_id: UserId,
        matchday_id: MatchdayId,
        players: &[PlayerId],
    ) -> Result<Lineup> {
        let policy = self.policy.clone();

        let tx = self.begin()?;
        let user = fetch_user(&tx, user_id)?;
        check_selection(&tx, &policy, user.league_id, matchday_id, players)?;

        if let Some(lineup_id) = find_lineup_id(&tx, user_id, matchday_id)? {
            return Err(LeagueError::conflict(format!(
                "user {} already has lineup {} for matchday {}; update it instead",
                user_id, lineup_id, matchday_id
            )));
        }

        tx.execute(
            "INSERT INTO lineups (user_id, matchday_id) VALUES (?, ?)",
            params![user_id, matchday_id],
        )?;
        let lineup_id = LineupId::new(tx.last_insert_rowid());
        write_selection(&tx, lineup_id, players)?;

        recompute_matchday_in(&tx, &policy, matchday_id)?;
        let lineup = fetch_lineup(&tx, lineup_id)?;
        tx.commit()?;

        tracing::info!(lineup = %lineup_id, user = %user_id, matchday = %matchday_id, "stored lineup");
        Ok(lineup)
    }

    /// Replace the selection of an existing lineup
    pub fn update_lineup(&mut self, lineup_id: LineupId, players: &[PlayerId]) -> Result<Lineup> {
        let policy = self.policy.clone();

        let tx = self.begin()?;
        let lineup = fetch_lineup(&tx, lineup_id)?;
        let user = fetch_user(&tx, lineup.user_id)?;
        check_selection(&tx, &policy, user.league_id, lineup.matchday_id, players)?;

        tx.execute(
            "DELETE FROM lineup_players WHERE lineup_id = ?",
            params![lineup_id],
        )?;
        write_selection(&tx, lineup_id, players)?;

        recompute_matchday_in(&tx, &policy, lineup.matchday_id)?;
        let lineup = fetch_lineup(&tx, lineup_id)?;
        tx.commit()?;
        Ok(lineup)
    }

    /// Rescore a matchday's statistics, rebuild its lineup totals, and
    /// rebuild the cumulative total of every manager in the league.
    pub fn recompute_matchday(&mut self, matchday_id: MatchdayId) -> Result<RecomputeSummary> {
        let policy = self.policy.clone();

        let tx = self.begin()?;
        let summary = recompute_matchday_in(&tx, &policy, matchday_id)?;
        tx.commit()?;
        Ok(summary)
    }

    /// Standings table of a league. Read-only.
    pub fn compute_standings(&self, league_id: LeagueId) -> Result<Vec<TeamRow>> {
        let teams: Vec<(TeamId, String)> = self
            .league_teams(league_id)?
            .into_iter()
            .map(|t| (t.team_id, t.name))
            .collect();

        let fixtures: Vec<FixtureScore> = fetch_calendar(&self.conn, league_id)?
            .into_iter()
            .flat_map(|md| md.fixtures)
            .map(|f| FixtureScore {
                home: f.home_team_id,
                away: f.away_team_id,
                home_goals: f.home_goals,
                away_goals: f.away_goals,
                played: f.played,
            })
            .collect();

        Ok(standings::compute_table(&teams, &fixtures))
    }

    /// Managers of a league ordered by cumulative points
    pub fn user_ranking(&self, league_id: LeagueId) -> Result<Vec<RankingRow>> {
        let users = self
            .league_users(league_id)?
            .into_iter()
            .map(|u| (u.user_id, u.name, u.cumulative_points))
            .collect();
        Ok(ranking::rank_users(users))
    }

    /// Delete a matchday that has no statistics yet
    pub fn delete_matchday(&mut self, matchday_id: MatchdayId) -> Result<()> {
        let tx = self.begin()?;
        let matchday = fetch_matchday(&tx, matchday_id)?;

        let stats: i64 = tx.query_row(
            "SELECT COUNT(*) FROM player_match_stats s
             JOIN fixtures f ON f.fixture_id = s.fixture_id
             WHERE f.matchday_id = ?",
            params![matchday_id],
            |row| row.get(0),
        )?;
        if stats > 0 {
            return Err(LeagueError::state(format!(
                "matchday {} already has {} statistic row(s)",
                matchday_id, stats
            )));
        }

        tx.execute(
            "DELETE FROM matchdays WHERE matchday_id = ?",
            params![matchday_id],
        )?;
        refresh_user_totals_in(&tx, matchday.league_id)?;
        tx.commit()?;

        tracing::info!(matchday = %matchday_id, "deleted matchday");
        Ok(())
    }

    /// Delete a manager together with their lineups
    pub fn delete_user(&mut self, user_id: UserId) -> Result<()> {
        let tx = self.begin()?;
        fetch_user(&tx, user_id)?;
        tx.execute("DELETE FROM users WHERE user_id = ?", params![user_id])?;
        tx.commit()?;

        tracing::info!(user = %user_id, "deleted user");
        Ok(())
    }
}

fn count_matchdays(conn: &Connection, league_id: LeagueId) -> Result<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM matchdays WHERE league_id = ?",
        params![league_id],
        |row| row.get(0),
    )?)
}

fn find_lineup_id(
    conn: &Connection,
    user_id: UserId,
    matchday_id: MatchdayId,
) -> Result<Option<LineupId>> {
    use rusqlite::OptionalExtension;

    Ok(conn
        .query_row(
            "SELECT lineup_id FROM lineups WHERE user_id = ? AND matchday_id = ?",
            params![user_id, matchday_id],
            |row| row.get(0),
        )
        .optional()?)
}

fn ensure_player_in_fixture(player: &Player, fixture: &Fixture) -> Result<()> {
    if player.team_id != fixture.home_team_id && player.team_id != fixture.away_team_id {
        return Err(LeagueError::validation(format!(
            "player {} plays for team {}, which is not in fixture {}",
            player.player_id, player.team_id, fixture.fixture_id
        )));
    }
    Ok(())
}

/// Lookups and shape checks for a lineup selection, all before any write.
fn check_selection(
    conn: &Connection,
    policy: &ScoringPolicy,
    league_id: LeagueId,
    matchday_id: MatchdayId,
    players: &[PlayerId],
) -> Result<()> {
    let matchday = fetch_matchday(conn, matchday_id)?;
    if matchday.league_id != league_id {
        return Err(LeagueError::validation(format!(
            "matchday {} belongs to another league",
            matchday_id
        )));
    }

    let mut selection: Vec<(PlayerId, Position)> = Vec::with_capacity(players.len());
    for player_id in players {
        let player = fetch_player(conn, *player_id)?;
        let team = fetch_team(conn, player.team_id)?;
        if team.league_id != league_id {
            return Err(LeagueError::validation(format!(
                "player {} is not part of league {}",
                player_id, league_id
            )));
        }
        selection.push((player.player_id, player.position));
    }
    ranking::validate_lineup(&selection, &policy.lineup)?;

    if matchday.fixtures.is_empty() {
        return Err(LeagueError::state(format!(
            "matchday {} is not yet playable: it has no fixtures",
            matchday_id
        )));
    }
    Ok(())
}

fn write_selection(conn: &Connection, lineup_id: LineupId, players: &[PlayerId]) -> Result<()> {
    for (slot, player_id) in players.iter().enumerate() {
        conn.execute(
            "INSERT INTO lineup_players (lineup_id, player_id, slot) VALUES (?, ?, ?)",
            params![lineup_id, player_id, slot as i64],
        )?;
    }
    Ok(())
}

fn reset_results_in(conn: &Connection, league_id: LeagueId) -> Result<usize> {
    let removed = conn.execute(
        "DELETE FROM player_match_stats WHERE fixture_id IN (
             SELECT f.fixture_id FROM fixtures f
             JOIN matchdays m ON m.matchday_id = f.matchday_id
             WHERE m.league_id = ?)",
        params![league_id],
    )?;
    conn.execute(
        "UPDATE fixtures SET home_goals = 0, away_goals = 0, played = 0
         WHERE matchday_id IN (SELECT matchday_id FROM matchdays WHERE league_id = ?)",
        params![league_id],
    )?;
    conn.execute(
        "UPDATE lineups SET total_points = 0
         WHERE matchday_id IN (SELECT matchday_id FROM matchdays WHERE league_id = ?)",
        params![league_id],
    )?;
    refresh_user_totals_in(conn, league_id)?;

    tracing::info!(league = %league_id, stats_removed = removed, "reset results");
    Ok(removed)
}

/// The recompute pass. Callers own the transaction.
fn recompute_matchday_in(
    conn: &Connection,
    policy: &ScoringPolicy,
    matchday_id: MatchdayId,
) -> Result<RecomputeSummary> {
    let matchday = fetch_matchday(conn, matchday_id)?;
    if matchday.fixtures.is_empty() {
        return Err(LeagueError::state(format!(
            "matchday {} has no fixtures yet",
            matchday_id
        )));
    }

    // Rescore every statistic of the matchday from its raw counters.
    let scored: Vec<(StatId, PlayerId, RawCounters, Position)> = {
        let mut stmt = conn.prepare(
            "SELECT s.stat_id, s.player_id, s.goals, s.assists, s.yellow_cards, s.red_card,
                    s.played_minimum, s.goals_conceded, p.position
             FROM player_match_stats s
             JOIN players p ON p.player_id = s.player_id
             JOIN fixtures f ON f.fixture_id = s.fixture_id
             WHERE f.matchday_id = ?
             ORDER BY s.stat_id",
        )?;
        let rows = stmt.query_map(params![matchday_id], |row| {
            Ok((
                row.get::<_, StatId>(0)?,
                row.get::<_, PlayerId>(1)?,
                RawCounters {
                    goals: row.get(2)?,
                    assists: row.get(3)?,
                    yellow_cards: row.get(4)?,
                    red_card: row.get(5)?,
                    played_minimum: row.get(6)?,
                    goals_conceded: row.get(7)?,
                },
                row.get::<_, u8>(8)?,
            ))
        })?;
        collect(rows)?
            .into_iter()
            .map(|(stat, player, counters, code)| {
                Position::try_from(code).map(|pos| (stat, player, counters, pos))
            })
            .collect::<Result<_>>()?
    };

    let mut points_by_player: HashMap<PlayerId, i32> = HashMap::new();
    for (stat_id, player_id, counters, position) in &scored {
        let points = policy.points(counters, *position);
        conn.execute(
            "UPDATE player_match_stats SET points = ? WHERE stat_id = ?",
            params![points, stat_id],
        )?;
        *points_by_player.entry(*player_id).or_insert(0) += points;
    }

    let lineup_ids: Vec<LineupId> = {
        let mut stmt = conn.prepare("SELECT lineup_id FROM lineups WHERE matchday_id = ?")?;
        let rows = stmt.query_map(params![matchday_id], |row| row.get(0))?;
        collect(rows)?
    };

    for lineup_id in &lineup_ids {
        let selection = fetch_lineup_players(conn, *lineup_id)?;
        let result = ranking::lineup_total(&selection, &points_by_player);
        if !result.absent.is_empty() {
            tracing::warn!(
                lineup = %lineup_id,
                matchday = %matchday_id,
                absent = ?result.absent,
                "selected players without statistics count as 0"
            );
        }
        conn.execute(
            "UPDATE lineups SET total_points = ? WHERE lineup_id = ?",
            params![result.total, lineup_id],
        )?;
    }

    let users_updated = refresh_user_totals_in(conn, matchday.league_id)?;

    let summary = RecomputeSummary {
        stats_rescored: scored.len(),
        lineups_updated: lineup_ids.len(),
        users_updated,
    };
    tracing::info!(
        matchday = %matchday_id,
        stats = summary.stats_rescored,
        lineups = summary.lineups_updated,
        users = summary.users_updated,
        "recomputed matchday"
    );
    Ok(summary)
}

/// Rebuild every manager's cumulative total in a league from all of their
/// lineups. Returns the number of managers written.
fn refresh_user_totals_in(conn: &Connection, league_id: LeagueId) -> Result<usize> {
    let users: Vec<UserId> = fetch_league_users(conn, league_id)?
        .into_iter()
        .map(|u| u.user_id)
        .collect();

    let lineups: Vec<(UserId, i64)> = {
        let mut stmt = conn.prepare(
            "SELECT l.user_id, l.total_points FROM lineups l
             JOIN matchdays m ON m.matchday_id = l.matchday_id
             WHERE m.league_id = ?",
        )?;
        let rows = stmt.query_map(params![league_id], |row| Ok((row.get(0)?, row.get(1)?)))?;
        collect(rows)?
    };

    let totals = ranking::cumulative_totals(&users, &lineups);
    for (user_id, total) in &totals {
        conn.execute(
            "UPDATE users SET cumulative_points = ? WHERE user_id = ?",
            params![total, user_id],
        )?;
    }
    Ok(totals.len())
}
