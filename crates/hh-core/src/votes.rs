//! # Vote State Machine
//!
//! The reddit-style three-state vote cycle, shared by posts and comments.
//! Clicking the active direction retracts it; clicking the opposite
//! direction jumps past neutral in one step.

use serde::{Deserialize, Serialize};

pub const UP: i8 = 1;
pub const DOWN: i8 = -1;
pub const NEUTRAL: i8 = 0;

/// A vote action issued by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    fn target_state(self) -> i8 {
        match self {
            VoteDirection::Up => UP,
            VoteDirection::Down => DOWN,
        }
    }
}

/// Applies one vote action to the current per-user state.
///
/// Returns `(new_state, score_delta)`:
///
/// | current | action | new state | delta |
/// |---------|--------|-----------|-------|
/// | 0       | up     | 1         | +1    |
/// | 0       | down   | -1        | -1    |
/// | 1       | up     | 0         | -1    |
/// | 1       | down   | -1        | -2    |
/// | -1      | down   | 0         | +1    |
/// | -1      | up     | 1         | +2    |
pub fn apply_vote(current: i8, action: VoteDirection) -> (i8, i64) {
    let target = action.target_state();
    if current == target {
        // Retract the active vote.
        (NEUTRAL, -i64::from(target))
    } else {
        (target, i64::from(target) - i64::from(current))
    }
}
