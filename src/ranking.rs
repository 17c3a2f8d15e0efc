//! Lineup totals and manager rankings.
//!
//! Everything here recomputes from scratch: a lineup total is the sum of its
//! players' current statistic points, a manager's cumulative total is the sum
//! of all their lineup totals. Nothing is ever added onto a stored value.

use crate::{error::LeagueError, scoring::LineupShape, PlayerId, Position, Result, UserId};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};


/// Outcome of totalling one lineup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineupTotal {
    pub total: i64,
    /// Selected players without a statistic row for the matchday.
    pub absent: Vec<PlayerId>,
}

/// Sum the points of `selection` given each player's points for the matchday.
/// Players missing from `points` contribute 0.
pub fn lineup_total(selection: &[PlayerId], points: &HashMap<PlayerId, i32>) -> LineupTotal {
    let mut total = 0i64;
    let mut absent = Vec::new();
    for player in selection {
        match points.get(player) {
            Some(p) => total += *p as i64,
            None => absent.push(*player),
        }
    }
    LineupTotal { total, absent }
}

/// Sum lineup totals per manager. Managers in `users` without lineups get 0.
pub fn cumulative_totals(users: &[UserId], lineups: &[(UserId, i64)]) -> BTreeMap<UserId, i64> {
    let mut totals: BTreeMap<UserId, i64> = users.iter().map(|u| (*u, 0)).collect();
    for (user, total) in lineups {
        *totals.entry(*user).or_insert(0) += total;
    }
    totals
}

/// Check a selection against the lineup shape: no repeats, and exactly the
/// configured number of goalkeepers and field players.
pub fn validate_lineup(selection: &[(PlayerId, Position)], shape: &LineupShape) -> Result<()> {
    if selection.len() != shape.size() {
        return Err(LeagueError::validation(format!(
            "lineup must have {} players, got {}",
            shape.size(),
            selection.len()
        )));
    }

    let mut seen = HashSet::with_capacity(selection.len());
    if let Some((dup, _)) = selection.iter().find(|(p, _)| !seen.insert(*p)) {
        return Err(LeagueError::validation(format!(
            "player {} selected more than once",
            dup
        )));
    }

    // Size is already fixed, so the goalkeeper count also fixes the field count.
    let goalkeepers = selection
        .iter()
        .filter(|(_, pos)| pos.is_goalkeeper())
        .count();
    if goalkeepers != shape.goalkeepers {
        return Err(LeagueError::validation(format!(
            "lineup must have {} goalkeeper(s) and {} field player(s), got {} and {}",
            shape.goalkeepers,
            shape.field_players,
            goalkeepers,
            selection.len() - goalkeepers
        )));
    }

    Ok(())
}

/// One line of the managers' ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingRow {
    pub rank: usize,
    pub user_id: UserId,
    pub name: String,
    pub cumulative_points: i64,
}

/// Order managers by cumulative points (descending), then id.
pub fn rank_users(users: Vec<(UserId, String, i64)>) -> Vec<RankingRow> {
    let mut rows: Vec<RankingRow> = users
        .into_iter()
        .map(|(user_id, name, cumulative_points)| RankingRow {
            rank: 0,
            user_id,
            name,
            cumulative_points,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.cumulative_points
            .cmp(&a.cumulative_points)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows
}
