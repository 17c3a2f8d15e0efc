//! Points preview command implementation

use super::common::print_json;
use crate::{
    scoring::{RawCounters, ScoreBreakdown, ScoringPolicy},
    Position, Result,
};

/// Score `counters` under `policy` without touching storage
pub fn handle_points(
    policy: &ScoringPolicy,
    position: Position,
    counters: RawCounters,
    as_json: bool,
) -> Result<ScoreBreakdown> {
    policy.validate(&counters)?;
    let breakdown = policy.breakdown(&counters, position);

    if as_json {
        print_json(&breakdown)?;
    } else {
        println!("attendance  {:>4}", breakdown.attendance);
        println!("goals       {:>4}", breakdown.goals);
        println!("assists     {:>4}", breakdown.assists);
        println!("goalkeeping {:>4}", breakdown.goalkeeping);
        println!("cards       {:>4}", breakdown.cards);
        println!("total       {:>4}", breakdown.total);
    }
    Ok(breakdown)
}
