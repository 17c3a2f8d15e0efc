//! Record creation and read queries

use super::{models::*, schema::LeagueDatabase};
use crate::{
    error::LeagueError, scoring::RawCounters, FixtureId, LeagueId, LineupId, MatchdayId,
    PlayerId, Position, Result, StatId, TeamId, UserId,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

impl LeagueDatabase {
    pub fn create_league(&mut self, name: &str) -> Result<LeagueId> {
        insert_league(&self.conn, name)
    }

    pub fn create_team(
        &mut self,
        league_id: LeagueId,
        name: &str,
        badge: Option<&str>,
    ) -> Result<TeamId> {
        insert_team(&self.conn, league_id, name, badge)
    }

    pub fn create_player(
        &mut self,
        team_id: TeamId,
        name: &str,
        position: Position,
        price: u32,
    ) -> Result<PlayerId> {
        insert_player(&self.conn, team_id, name, position, price)
    }

    pub fn create_user(&mut self, league_id: LeagueId, name: &str) -> Result<UserId> {
        insert_user(&self.conn, league_id, name)
    }

    /// Create a league with its teams, players and managers in one transaction
    pub fn import_league(&mut self, import: &LeagueImport) -> Result<LeagueId> {
        let tx = self.conn.transaction()?;

        let league_id = insert_league(&tx, &import.name)?;
        for team in &import.teams {
            let team_id = insert_team(&tx, league_id, &team.name, team.badge.as_deref())?;
            for player in &team.players {
                insert_player(&tx, team_id, &player.name, player.position, player.price)?;
            }
        }
        for user in &import.users {
            insert_user(&tx, league_id, &user.name)?;
        }

        tx.commit()?;
        tracing::info!(
            league = %league_id,
            teams = import.teams.len(),
            users = import.users.len(),
            "imported league"
        );
        Ok(league_id)
    }

    pub fn get_league(&self, league_id: LeagueId) -> Result<League> {
        fetch_league(&self.conn, league_id)
    }

    pub fn get_team(&self, team_id: TeamId) -> Result<Team> {
        fetch_team(&self.conn, team_id)
    }

    pub fn get_player(&self, player_id: PlayerId) -> Result<Player> {
        fetch_player(&self.conn, player_id)
    }

    pub fn get_user(&self, user_id: UserId) -> Result<User> {
        fetch_user(&self.conn, user_id)
    }

    pub fn get_fixture(&self, fixture_id: FixtureId) -> Result<Fixture> {
        fetch_fixture(&self.conn, fixture_id)
    }

    pub fn get_matchday(&self, matchday_id: MatchdayId) -> Result<Matchday> {
        fetch_matchday(&self.conn, matchday_id)
    }

    pub fn get_stat(&self, stat_id: StatId) -> Result<PlayerMatchStat> {
        fetch_stat(&self.conn, stat_id)
    }

    pub fn get_lineup(&self, lineup_id: LineupId) -> Result<Lineup> {
        fetch_lineup(&self.conn, lineup_id)
    }

    /// Teams of a league, ordered by id
    pub fn league_teams(&self, league_id: LeagueId) -> Result<Vec<Team>> {
        fetch_league(&self.conn, league_id)?;
        let mut stmt = self.conn.prepare(
            "SELECT team_id, league_id, name, badge FROM teams
             WHERE league_id = ? ORDER BY team_id",
        )?;
        let rows = stmt.query_map(params![league_id], row_to_team)?;
        collect(rows)
    }

    /// Players of a team, ordered by id
    pub fn team_players(&self, team_id: TeamId) -> Result<Vec<Player>> {
        fetch_team(&self.conn, team_id)?;
        let mut stmt = self.conn.prepare(
            "SELECT player_id, team_id, name, position, price FROM players
             WHERE team_id = ? ORDER BY player_id",
        )?;
        let rows = stmt.query_map(params![team_id], row_to_player)?;
        collect(rows)?.into_iter().collect()
    }

    /// Managers of a league, ordered by id
    pub fn league_users(&self, league_id: LeagueId) -> Result<Vec<User>> {
        fetch_league(&self.conn, league_id)?;
        fetch_league_users(&self.conn, league_id)
    }

    /// Full calendar of a league, matchdays in order
    pub fn calendar(&self, league_id: LeagueId) -> Result<Vec<Matchday>> {
        fetch_league(&self.conn, league_id)?;
        fetch_calendar(&self.conn, league_id)
    }

    pub fn find_stat(
        &self,
        player_id: PlayerId,
        fixture_id: FixtureId,
    ) -> Result<Option<PlayerMatchStat>> {
        find_stat_row(&self.conn, player_id, fixture_id)
    }

    pub fn fixture_stats(&self, fixture_id: FixtureId) -> Result<Vec<PlayerMatchStat>> {
        fetch_fixture(&self.conn, fixture_id)?;
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE fixture_id = ? ORDER BY stat_id",
            STAT_SELECT
        ))?;
        let rows = stmt.query_map(params![fixture_id], row_to_stat)?;
        collect(rows)
    }

    pub fn find_lineup(
        &self,
        user_id: UserId,
        matchday_id: MatchdayId,
    ) -> Result<Option<Lineup>> {
        let lineup_id: Option<LineupId> = self
            .conn
            .query_row(
                "SELECT lineup_id FROM lineups WHERE user_id = ? AND matchday_id = ?",
                params![user_id, matchday_id],
                |row| row.get(0),
            )
            .optional()?;
        lineup_id
            .map(|id| fetch_lineup(&self.conn, id))
            .transpose()
    }

    pub fn matchday_lineups(&self, matchday_id: MatchdayId) -> Result<Vec<Lineup>> {
        fetch_matchday(&self.conn, matchday_id)?;
        let mut stmt = self
            .conn
            .prepare("SELECT lineup_id FROM lineups WHERE matchday_id = ? ORDER BY lineup_id")?;
        let ids = collect(stmt.query_map(params![matchday_id], |row| row.get::<_, LineupId>(0))?)?;
        ids.into_iter()
            .map(|id| fetch_lineup(&self.conn, id))
            .collect()
    }
}

pub(crate) const STAT_SELECT: &str = "SELECT stat_id, player_id, fixture_id, goals, assists,
        yellow_cards, red_card, played_minimum, goals_conceded, points
     FROM player_match_stats";

pub(crate) fn collect<T, F>(rows: rusqlite::MappedRows<'_, F>) -> Result<Vec<T>>
where
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub(crate) fn insert_league(conn: &Connection, name: &str) -> Result<LeagueId> {
    if name.trim().is_empty() {
        return Err(LeagueError::validation("league name must not be empty"));
    }
    conn.execute("INSERT INTO leagues (name) VALUES (?)", params![name])?;
    Ok(LeagueId::new(conn.last_insert_rowid()))
}

pub(crate) fn insert_team(
    conn: &Connection,
    league_id: LeagueId,
    name: &str,
    badge: Option<&str>,
) -> Result<TeamId> {
    fetch_league(conn, league_id)?;
    conn.execute(
        "INSERT INTO teams (league_id, name, badge) VALUES (?, ?, ?)",
        params![league_id, name, badge],
    )?;
    Ok(TeamId::new(conn.last_insert_rowid()))
}

pub(crate) fn insert_player(
    conn: &Connection,
    team_id: TeamId,
    name: &str,
    position: Position,
    price: u32,
) -> Result<PlayerId> {
    fetch_team(conn, team_id)?;
    conn.execute(
        "INSERT INTO players (team_id, name, position, price) VALUES (?, ?, ?, ?)",
        params![team_id, name, position.to_u8(), price],
    )?;
    Ok(PlayerId::new(conn.last_insert_rowid()))
}

pub(crate) fn insert_user(conn: &Connection, league_id: LeagueId, name: &str) -> Result<UserId> {
    fetch_league(conn, league_id)?;
    conn.execute(
        "INSERT INTO users (league_id, name) VALUES (?, ?)",
        params![league_id, name],
    )?;
    Ok(UserId::new(conn.last_insert_rowid()))
}

pub(crate) fn fetch_league(conn: &Connection, league_id: LeagueId) -> Result<League> {
    conn.query_row(
        "SELECT league_id, name FROM leagues WHERE league_id = ?",
        params![league_id],
        |row| {
            Ok(League {
                league_id: row.get(0)?,
                name: row.get(1)?,
            })
        },
    )
    .optional()?
    .ok_or_else(|| LeagueError::not_found("League", league_id.as_i64()))
}

pub(crate) fn fetch_team(conn: &Connection, team_id: TeamId) -> Result<Team> {
    conn.query_row(
        "SELECT team_id, league_id, name, badge FROM teams WHERE team_id = ?",
        params![team_id],
        row_to_team,
    )
    .optional()?
    .ok_or_else(|| LeagueError::not_found("Team", team_id.as_i64()))
}

pub(crate) fn fetch_player(conn: &Connection, player_id: PlayerId) -> Result<Player> {
    conn.query_row(
        "SELECT player_id, team_id, name, position, price FROM players WHERE player_id = ?",
        params![player_id],
        row_to_player,
    )
    .optional()?
    .ok_or_else(|| LeagueError::not_found("Player", player_id.as_i64()))?
}

pub(crate) fn fetch_user(conn: &Connection, user_id: UserId) -> Result<User> {
    conn.query_row(
        "SELECT user_id, league_id, name, cumulative_points FROM users WHERE user_id = ?",
        params![user_id],
        row_to_user,
    )
    .optional()?
    .ok_or_else(|| LeagueError::not_found("User", user_id.as_i64()))
}

pub(crate) fn fetch_league_users(conn: &Connection, league_id: LeagueId) -> Result<Vec<User>> {
    let mut stmt = conn.prepare(
        "SELECT user_id, league_id, name, cumulative_points FROM users
         WHERE league_id = ? ORDER BY user_id",
    )?;
    let rows = stmt.query_map(params![league_id], row_to_user)?;
    collect(rows)
}

pub(crate) fn fetch_fixture(conn: &Connection, fixture_id: FixtureId) -> Result<Fixture> {
    conn.query_row(
        "SELECT fixture_id, matchday_id, home_team_id, away_team_id, home_goals, away_goals, played
         FROM fixtures WHERE fixture_id = ?",
        params![fixture_id],
        row_to_fixture,
    )
    .optional()?
    .ok_or_else(|| LeagueError::not_found("Fixture", fixture_id.as_i64()))
}

pub(crate) fn fetch_matchday_fixtures(
    conn: &Connection,
    matchday_id: MatchdayId,
) -> Result<Vec<Fixture>> {
    let mut stmt = conn.prepare(
        "SELECT fixture_id, matchday_id, home_team_id, away_team_id, home_goals, away_goals, played
         FROM fixtures WHERE matchday_id = ? ORDER BY fixture_id",
    )?;
    let rows = stmt.query_map(params![matchday_id], row_to_fixture)?;
    collect(rows)
}

pub(crate) fn fetch_matchday(conn: &Connection, matchday_id: MatchdayId) -> Result<Matchday> {
    let (league_id, ordinal) = conn
        .query_row(
            "SELECT league_id, ordinal FROM matchdays WHERE matchday_id = ?",
            params![matchday_id],
            |row| Ok((row.get::<_, LeagueId>(0)?, row.get::<_, u32>(1)?)),
        )
        .optional()?
        .ok_or_else(|| LeagueError::not_found("Matchday", matchday_id.as_i64()))?;

    Ok(Matchday {
        matchday_id,
        league_id,
        ordinal,
        fixtures: fetch_matchday_fixtures(conn, matchday_id)?,
    })
}

pub(crate) fn fetch_calendar(conn: &Connection, league_id: LeagueId) -> Result<Vec<Matchday>> {
    let mut stmt = conn.prepare(
        "SELECT matchday_id FROM matchdays WHERE league_id = ? ORDER BY ordinal",
    )?;
    let ids = collect(stmt.query_map(params![league_id], |row| row.get::<_, MatchdayId>(0))?)?;
    ids.into_iter()
        .map(|id| fetch_matchday(conn, id))
        .collect()
}

pub(crate) fn fetch_stat(conn: &Connection, stat_id: StatId) -> Result<PlayerMatchStat> {
    conn.query_row(
        &format!("{} WHERE stat_id = ?", STAT_SELECT),
        params![stat_id],
        row_to_stat,
    )
    .optional()?
    .ok_or_else(|| LeagueError::not_found("PlayerMatchStat", stat_id.as_i64()))
}

pub(crate) fn find_stat_row(
    conn: &Connection,
    player_id: PlayerId,
    fixture_id: FixtureId,
) -> Result<Option<PlayerMatchStat>> {
    Ok(conn
        .query_row(
            &format!("{} WHERE player_id = ? AND fixture_id = ?", STAT_SELECT),
            params![player_id, fixture_id],
            row_to_stat,
        )
        .optional()?)
}

pub(crate) fn fetch_lineup_players(conn: &Connection, lineup_id: LineupId) -> Result<Vec<PlayerId>> {
    let mut stmt = conn.prepare(
        "SELECT player_id FROM lineup_players WHERE lineup_id = ? ORDER BY slot",
    )?;
    let rows = stmt.query_map(params![lineup_id], |row| row.get::<_, PlayerId>(0))?;
    collect(rows)
}

pub(crate) fn fetch_lineup(conn: &Connection, lineup_id: LineupId) -> Result<Lineup> {
    let (user_id, matchday_id, total_points) = conn
        .query_row(
            "SELECT user_id, matchday_id, total_points FROM lineups WHERE lineup_id = ?",
            params![lineup_id],
            |row| {
                Ok((
                    row.get::<_, UserId>(0)?,
                    row.get::<_, MatchdayId>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            },
        )
        .optional()?
        .ok_or_else(|| LeagueError::not_found("Lineup", lineup_id.as_i64()))?;

    Ok(Lineup {
        lineup_id,
        user_id,
        matchday_id,
        players: fetch_lineup_players(conn, lineup_id)?,
        total_points,
    })
}

fn row_to_team(row: &Row) -> rusqlite::Result<Team> {
    Ok(Team {
        team_id: row.get(0)?,
        league_id: row.get(1)?,
        name: row.get(2)?,
        badge: row.get(3)?,
    })
}

/// Positions are validated on the way out so a corrupt code surfaces as a
/// crate error instead of a panic.
fn row_to_player(row: &Row) -> rusqlite::Result<Result<Player>> {
    let code: u8 = row.get(3)?;
    let player_id: PlayerId = row.get(0)?;
    let team_id: TeamId = row.get(1)?;
    let name: String = row.get(2)?;
    let price: u32 = row.get(4)?;
    Ok(Position::try_from(code).map(|position| Player {
        player_id,
        team_id,
        name,
        position,
        price,
    }))
}

fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        user_id: row.get(0)?,
        league_id: row.get(1)?,
        name: row.get(2)?,
        cumulative_points: row.get(3)?,
    })
}

fn row_to_fixture(row: &Row) -> rusqlite::Result<Fixture> {
    Ok(Fixture {
        fixture_id: row.get(0)?,
        matchday_id: row.get(1)?,
        home_team_id: row.get(2)?,
        away_team_id: row.get(3)?,
        home_goals: row.get(4)?,
        away_goals: row.get(5)?,
        played: row.get(6)?,
    })
}

pub(crate) fn row_to_stat(row: &Row) -> rusqlite::Result<PlayerMatchStat> {
    Ok(PlayerMatchStat {
        stat_id: row.get(0)?,
        player_id: row.get(1)?,
        fixture_id: row.get(2)?,
        counters: RawCounters {
            goals: row.get(3)?,
            assists: row.get(4)?,
            yellow_cards: row.get(5)?,
            red_card: row.get(6)?,
            played_minimum: row.get(7)?,
            goals_conceded: row.get(8)?,
        },
        points: row.get(9)?,
    })
}
