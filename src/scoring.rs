//! Fantasy points calculation for a single player's match.
//!
//! The calculator is a pure function of the raw counters recorded for one
//! player in one fixture plus the player's [`Position`]. Every constant lives
//! in [`ScoringPolicy`]; [`ScoringPolicy::default`] is the reference policy.

use crate::{error::LeagueError, Position, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;


/// Raw per-match counters for one player. These are the only persisted
/// source of truth; points are always derived from them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCounters {
    pub goals: u32,
    pub assists: u32,
    pub yellow_cards: u32,
    pub red_card: bool,
    /// Set when the player reached the minutes-played threshold.
    pub played_minimum: bool,
    /// Only meaningful for goalkeepers.
    pub goals_conceded: u32,
}

/// Shape every lineup must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineupShape {
    pub goalkeepers: usize,
    pub field_players: usize,
}

impl Default for LineupShape {
    fn default() -> Self {
        Self {
            goalkeepers: 1,
            field_players: 4,
        }
    }
}

impl LineupShape {
    pub fn size(&self) -> usize {
        self.goalkeepers + self.field_players
    }
}

/// Point values of the league's scoring policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub attendance: i32,
    pub goalkeeper_goal: i32,
    pub field_goal: i32,
    pub assist: i32,
    pub clean_sheet: i32,
    /// Applied when a goalkeeper concedes at least one goal but fewer than
    /// `heavy_conceded_from`.
    pub conceded_penalty: i32,
    pub heavy_conceded_penalty: i32,
    pub heavy_conceded_from: u32,
    pub yellow_card: i32,
    /// Flat penalty; the red card is a flag, not a count.
    pub red_card: i32,
    pub max_yellow_cards: u32,
    /// Upper bound for goals, assists and goals conceded in one match.
    pub max_match_count: u32,
    pub lineup: LineupShape,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            attendance: 1,
            goalkeeper_goal: 6,
            field_goal: 4,
            assist: 3,
            clean_sheet: 5,
            conceded_penalty: -1,
            heavy_conceded_penalty: -2,
            heavy_conceded_from: 3,
            yellow_card: -1,
            red_card: -3,
            max_yellow_cards: 2,
            max_match_count: 50,
            lineup: LineupShape::default(),
        }
    }
}

/// Per-rule contributions to a player's points, in policy order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub attendance: i32,
    pub goals: i32,
    pub assists: i32,
    pub goalkeeping: i32,
    pub cards: i32,
    pub total: i32,
}

impl ScoringPolicy {
    /// Load a policy from a JSON file. Missing keys fall back to the
    /// reference values.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let policy: ScoringPolicy = serde_json::from_str(&raw)?;
        policy.check()?;
        Ok(policy)
    }

    /// Load from `path` if given, otherwise the reference policy.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    fn check(&self) -> Result<()> {
        if self.lineup.goalkeepers == 0 && self.lineup.field_players == 0 {
            return Err(LeagueError::validation("lineup shape must select at least one player"));
        }
        if self.heavy_conceded_from < 2 {
            return Err(LeagueError::validation(
                "heavy_conceded_from must be at least 2",
            ));
        }
        Ok(())
    }

    /// Reject counters the policy cannot score.
    pub fn validate(&self, counters: &RawCounters) -> Result<()> {
        if counters.yellow_cards > self.max_yellow_cards {
            return Err(LeagueError::validation(format!(
                "{} yellow cards recorded, at most {} allowed",
                counters.yellow_cards, self.max_yellow_cards
            )));
        }
        for (name, value) in [
            ("goals", counters.goals),
            ("assists", counters.assists),
            ("goals conceded", counters.goals_conceded),
        ] {
            if value > self.max_match_count {
                return Err(LeagueError::validation(format!(
                    "{} {} recorded, at most {} allowed",
                    value, name, self.max_match_count
                )));
            }
        }
        Ok(())
    }

    pub fn breakdown(&self, counters: &RawCounters, position: Position) -> ScoreBreakdown {
        let attendance = if counters.played_minimum {
            self.attendance
        } else {
            0
        };

        let per_goal = match position {
            Position::Goalkeeper => self.goalkeeper_goal,
            Position::FieldPlayer => self.field_goal,
        };
        let goals = times(per_goal, counters.goals);
        let assists = times(self.assist, counters.assists);

        let goalkeeping = match position {
            Position::Goalkeeper => match counters.goals_conceded {
                0 if counters.played_minimum => self.clean_sheet,
                0 => 0,
                n if n < self.heavy_conceded_from => self.conceded_penalty,
                _ => self.heavy_conceded_penalty,
            },
            Position::FieldPlayer => 0,
        };

        let mut cards = times(self.yellow_card, counters.yellow_cards);
        if counters.red_card {
            cards = cards.saturating_add(self.red_card);
        }

        ScoreBreakdown {
            attendance,
            goals,
            assists,
            goalkeeping,
            cards,
            total: [goals, assists, goalkeeping, cards]
                .into_iter()
                .fold(attendance, i32::saturating_add),
        }
    }

    /// Fantasy points for one player's match. May be negative.
    pub fn points(&self, counters: &RawCounters, position: Position) -> i32 {
        self.breakdown(counters, position).total
    }
}

/// Saturating `value * count`; unvalidated counters never overflow.
fn times(value: i32, count: u32) -> i32 {
    value.saturating_mul(i32::try_from(count).unwrap_or(i32::MAX))
}

/// Score counters under the reference policy.
pub fn compute_fantasy_points(counters: &RawCounters, position: Position) -> i32 {
    ScoringPolicy::default().points(counters, position)
}
