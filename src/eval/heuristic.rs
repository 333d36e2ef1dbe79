//! Static positional evaluation.
//!
//! Scores a board from the perspective of the color passed in: every own
//! disc adds the square's static weight, every opposing disc subtracts it.
//! Target squares replace their static weight with a fixed bonus. An
//! optional disc-count term adds material balance.

use serde::{Deserialize, Serialize};

use crate::board::{weight, Board, Color, Square, SquareSet, SQUARE_COUNT, WEIGHTS};

/// Default bonus for holding a target square: five times a corner, so target
/// squares dominate ordinary positional play.
pub const DEFAULT_TARGET_BONUS: i32 = 1000;

/// Tunable evaluation terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalWeights {
    /// Value of a disc on a target square, used instead of its static weight.
    pub target_bonus: i32,
    /// Value of each disc of material advantage.
    pub disc_weight: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            target_bonus: DEFAULT_TARGET_BONUS,
            disc_weight: 0,
        }
    }
}

impl EvalWeights {
    /// Upper bound on the absolute value `evaluate` can return.
    pub fn max_magnitude(&self) -> i64 {
        let table = WEIGHTS.iter().map(|w| i64::from(w.abs())).max().unwrap_or(0);
        let per_disc = table.max(i64::from(self.target_bonus).abs());
        let cells = SQUARE_COUNT as i64;
        cells * per_disc + cells * i64::from(self.disc_weight).abs()
    }
}

/// Scores `board` for `color`. Higher is better for `color`.
pub fn evaluate(board: &Board, color: Color, targets: SquareSet, weights: &EvalWeights) -> i32 {
    let mut total = 0i32;
    let mut discs = 0i32;
    for sq in Square::all() {
        let owner = match board.get(sq).color() {
            Some(c) => c,
            None => continue,
        };
        let term = if targets.contains(sq) {
            weights.target_bonus
        } else {
            weight(sq)
        };
        if owner == color {
            total += term;
            discs += 1;
        } else {
            total -= term;
            discs -= 1;
        }
    }
    total + weights.disc_weight * discs
}
