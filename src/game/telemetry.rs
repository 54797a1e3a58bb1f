//! Per-game move statistics.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Direction;

/// How many advisor rationales are kept.
pub const MAX_REASONS: usize = 5;

/// Recorded in place of a missing rationale.
pub const NO_REASON: &str = "-- no reason --";

/// Move counters and recent history.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Telemetry {
    /// Every accepted move request, successful or not.
    pub total_moves: u32,
    /// Requests whose shift moved nothing.
    pub total_bad_moves: u32,
    /// Distinct directions that failed since the last successful move,
    /// most recent failure first.
    pub bad_moves: SmallVec<[Direction; 4]>,
    /// Rationales of the latest successful moves, newest first.
    pub reasons: VecDeque<String>,
}

impl Telemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a move that changed the board.
    pub fn record_move(&mut self, reason: Option<&str>) {
        self.total_moves += 1;
        self.bad_moves.clear();
        self.reasons
            .push_front(reason.unwrap_or(NO_REASON).to_string());
        self.reasons.truncate(MAX_REASONS);
    }

    /// Record a move whose shift did nothing.
    ///
    /// A direction that already failed this turn moves to the front
    /// instead of being listed twice; both attempts still count.
    pub fn record_bad_move(&mut self, direction: Direction) {
        self.total_moves += 1;
        self.total_bad_moves += 1;
        self.bad_moves.retain(|d| *d != direction);
        self.bad_moves.insert(0, direction);
    }

    /// Directions an advisor should avoid this turn.
    #[must_use]
    pub fn avoid_list(&self) -> &[Direction] {
        &self.bad_moves
    }

    /// Fraction of requests that moved nothing, 0.0 before any move.
    #[must_use]
    pub fn bad_move_ratio(&self) -> f64 {
        if self.total_moves == 0 {
            0.0
        } else {
            f64::from(self.total_bad_moves) / f64::from(self.total_moves)
        }
    }
}
