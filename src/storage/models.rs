//! Data models for the storage layer

use crate::{
    scoring::RawCounters, FixtureId, LeagueId, LineupId, MatchdayId, PlayerId, Position, StatId,
    TeamId, UserId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub league_id: LeagueId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: TeamId,
    pub league_id: LeagueId,
    pub name: String,
    pub badge: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub name: String,
    pub position: Position,
    pub price: u32,
}

/// A manager taking part in the fantasy competition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub league_id: LeagueId,
    pub name: String,
    /// Derived: sum of this user's lineup totals.
    pub cumulative_points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub fixture_id: FixtureId,
    pub matchday_id: MatchdayId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub home_goals: u32,
    pub away_goals: u32,
    /// Set once a result is recorded; a real 0-0 is `played` with no goals.
    pub played: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchday {
    pub matchday_id: MatchdayId,
    pub league_id: LeagueId,
    /// 1-based position in the calendar.
    pub ordinal: u32,
    pub fixtures: Vec<Fixture>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMatchStat {
    pub stat_id: StatId,
    pub player_id: PlayerId,
    pub fixture_id: FixtureId,
    pub counters: RawCounters,
    /// Derived from `counters` by the scoring policy.
    pub points: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup {
    pub lineup_id: LineupId,
    pub user_id: UserId,
    pub matchday_id: MatchdayId,
    /// Selection in slot order.
    pub players: Vec<PlayerId>,
    /// Derived: sum of the selected players' points for the matchday.
    pub total_points: i64,
}

/// What a recompute pass touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecomputeSummary {
    pub stats_rescored: usize,
    pub lineups_updated: usize,
    pub users_updated: usize,
}

/// Bulk league definition, used to seed a league from a JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct LeagueImport {
    pub name: String,
    #[serde(default)]
    pub teams: Vec<TeamImport>,
    #[serde(default)]
    pub users: Vec<UserImport>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamImport {
    pub name: String,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub players: Vec<PlayerImport>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerImport {
    pub name: String,
    pub position: Position,
    #[serde(default)]
    pub price: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserImport {
    pub name: String,
}
