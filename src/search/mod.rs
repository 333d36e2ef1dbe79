//! Adversarial tree search.
//!
//! Both policies walk the same tree over a single mutable `Board`, applying
//! moves in place and restoring them from the `Undo` log before every
//! return. `NegaScout` is the production policy; `Negamax` is the
//! plain alpha-beta baseline it must always agree with on the root score.

pub mod negamax;
pub mod negascout;

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Color, Square, SquareSet};
use crate::eval::{evaluate, EvalWeights};

pub use negamax::negamax;
pub use negascout::negascout;

/// Window bound used for the root search. Far outside any reachable score.
pub const INFINITY: i32 = 1_000_000;

/// Which search algorithm to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPolicy {
    Negamax,
    #[default]
    NegaScout,
}

impl fmt::Display for SearchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchPolicy::Negamax => f.write_str("negamax"),
            SearchPolicy::NegaScout => f.write_str("negascout"),
        }
    }
}

impl FromStr for SearchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "negamax" => Ok(SearchPolicy::Negamax),
            "negascout" | "pvs" => Ok(SearchPolicy::NegaScout),
            other => Err(format!("unknown search policy: '{}'", other)),
        }
    }
}

/// Outcome of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// The chosen move, or None when the mover has no legal move.
    pub best_move: Option<Square>,
    /// Score of the position for the mover.
    pub score: i32,
    /// Number of nodes visited.
    pub nodes: u64,
}

/// Shared state threaded through one search.
pub(crate) struct Searcher<'a> {
    pub board: &'a mut Board,
    pub targets: SquareSet,
    pub weights: &'a EvalWeights,
    pub nodes: u64,
}

impl<'a> Searcher<'a> {
    pub fn new(board: &'a mut Board, targets: SquareSet, weights: &'a EvalWeights) -> Self {
        Searcher {
            board,
            targets,
            weights,
            nodes: 0,
        }
    }

    /// Static score of the current board for `color`.
    #[inline]
    pub fn evaluate(&self, color: Color) -> i32 {
        evaluate(&*self.board, color, self.targets, self.weights)
    }
}

/// Runs the chosen policy to `depth` plies and returns the best move for `color`.
///
/// The board is restored to its original contents before returning.
pub fn search(
    board: &mut Board,
    color: Color,
    depth: u8,
    targets: SquareSet,
    weights: &EvalWeights,
    policy: SearchPolicy,
) -> SearchResult {
    let result = match policy {
        SearchPolicy::Negamax => negamax(board, color, depth, targets, weights),
        SearchPolicy::NegaScout => negascout(board, color, depth, targets, weights),
    };
    debug!(
        "{} depth {} color {} move {} score {} nodes {}",
        policy,
        depth,
        color,
        result
            .best_move
            .map_or_else(|| "none".to_string(), |m| m.to_string()),
        result.score,
        result.nodes
    );
    result
}
