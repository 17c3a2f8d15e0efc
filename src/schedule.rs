//! Round-robin calendar generation (circle method).

use crate::{error::LeagueError, Result, TeamId};
use serde::Serialize;
use std::collections::HashSet;


/// One fixture slot of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pairing {
    pub home: TeamId,
    pub away: TeamId,
}

/// One round of the calendar; becomes one matchday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Round {
    /// Zero-based position in the calendar.
    pub index: usize,
    pub pairings: Vec<Pairing>,
}

/// Build a single round-robin calendar for `teams`.
///
/// An odd field gets a bye slot, so `n` teams produce `n - 1` rounds when
/// `n` is even and `n` rounds when it is odd. Pairings against the bye are
/// dropped. Every unordered pair of teams meets exactly once.
///
/// # Examples
///
/// ```rust
/// use fantasy_league::{schedule::round_robin, TeamId};
///
/// let teams: Vec<TeamId> = (1..=4).map(TeamId::new).collect();
/// let rounds = round_robin(&teams).unwrap();
/// assert_eq!(rounds.len(), 3);
/// assert!(rounds.iter().all(|r| r.pairings.len() == 2));
/// ```
pub fn round_robin(teams: &[TeamId]) -> Result<Vec<Round>> {
    if teams.len() < 2 {
        return Err(LeagueError::validation(format!(
            "a schedule needs at least 2 teams, got {}",
            teams.len()
        )));
    }

    let mut seen = HashSet::with_capacity(teams.len());
    if let Some(dup) = teams.iter().find(|t| !seen.insert(**t)) {
        return Err(LeagueError::validation(format!(
            "team {} listed more than once",
            dup
        )));
    }

    // `None` is the bye placeholder.
    let mut slots: Vec<Option<TeamId>> = teams.iter().copied().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }

    let n = slots.len();
    let mut rounds = Vec::with_capacity(n - 1);

    for index in 0..n - 1 {
        let pairings = (0..n / 2)
            .filter_map(|i| match (slots[i], slots[n - 1 - i]) {
                (Some(home), Some(away)) => Some(Pairing { home, away }),
                _ => None,
            })
            .collect();
        rounds.push(Round { index, pairings });

        // Index 0 is the pivot; the last slot moves to index 1.
        if let Some(last) = slots.pop() {
            slots.insert(1, last);
        }
    }

    Ok(rounds)
}
