//! Position evaluation.
//!
//! Scores a board from the side-to-move's perspective using the static
//! weight table and the per-decision target squares.

pub(crate) mod heuristic;

pub use heuristic::{evaluate, EvalWeights, DEFAULT_TARGET_BONUS};
