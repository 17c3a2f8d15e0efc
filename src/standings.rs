//! Competition table derived from fixture results.
//!
//! Independent of the fantasy layer: only goals and the played flag of each
//! fixture matter here.

use crate::TeamId;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;


pub const POINTS_FOR_WIN: u32 = 3;
pub const POINTS_FOR_DRAW: u32 = 1;

/// Score of one fixture as seen by the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureScore {
    pub home: TeamId,
    pub away: TeamId,
    pub home_goals: u32,
    pub away_goals: u32,
    pub played: bool,
}

/// One line of the standings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamRow {
    /// 1-based rank after sorting.
    pub rank: usize,
    pub team_id: TeamId,
    pub name: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
}

impl TeamRow {
    fn empty(team_id: TeamId, name: String) -> Self {
        Self {
            rank: 0,
            team_id,
            name,
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }

    fn record(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        self.goal_difference = self.goals_for as i64 - self.goals_against as i64;

        match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.wins += 1;
                self.points += POINTS_FOR_WIN;
            }
            Ordering::Equal => {
                self.draws += 1;
                self.points += POINTS_FOR_DRAW;
            }
            Ordering::Less => self.losses += 1,
        }
    }
}

/// Table ordering: points, goal difference, goals scored (all descending),
/// then team id ascending so ties always sort the same way.
pub fn table_order(a: &TeamRow, b: &TeamRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.team_id.cmp(&b.team_id))
}

/// Build the standings for `teams` from `fixtures`.
///
/// Every team gets a row even without a played match. Fixtures not marked as
/// played are ignored, as are fixtures naming a team outside `teams`.
pub fn compute_table(teams: &[(TeamId, String)], fixtures: &[FixtureScore]) -> Vec<TeamRow> {
    let mut rows: HashMap<TeamId, TeamRow> = teams
        .iter()
        .map(|(id, name)| (*id, TeamRow::empty(*id, name.clone())))
        .collect();

    for fx in fixtures.iter().filter(|f| f.played) {
        if !rows.contains_key(&fx.home) || !rows.contains_key(&fx.away) {
            tracing::warn!(
                home = %fx.home,
                away = %fx.away,
                "skipping fixture with a team outside the league"
            );
            continue;
        }
        if let Some(row) = rows.get_mut(&fx.home) {
            row.record(fx.home_goals, fx.away_goals);
        }
        if let Some(row) = rows.get_mut(&fx.away) {
            row.record(fx.away_goals, fx.home_goals);
        }
    }

    let mut table: Vec<TeamRow> = rows.into_values().collect();
    table.sort_by(table_order);
    for (i, row) in table.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    table
}
