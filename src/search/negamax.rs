//! Negamax with alpha-beta pruning.
//!
//! The reference policy: every child is searched with the full window and
//! the first fail-high returns immediately.

use super::{SearchResult, Searcher, INFINITY};
use crate::board::{Board, Color, Square, SquareSet};
use crate::eval::EvalWeights;

/// Searches `depth` plies with plain alpha-beta and returns the best move for `color`.
pub fn negamax(
    board: &mut Board,
    color: Color,
    depth: u8,
    targets: SquareSet,
    weights: &EvalWeights,
) -> SearchResult {
    let mut searcher = Searcher::new(board, targets, weights);
    let (score, best_move) = searcher.negamax_root(color, depth.max(1));
    SearchResult {
        best_move,
        score,
        nodes: searcher.nodes,
    }
}

impl Searcher<'_> {
    fn negamax_root(&mut self, color: Color, depth: u8) -> (i32, Option<Square>) {
        let moves = self.board.legal_moves(color);
        if moves.is_empty() {
            return (self.negamax_node(color, depth, -INFINITY, INFINITY), None);
        }

        self.nodes += 1;
        let mut alpha = -INFINITY;
        let mut best_move = None;
        for mv in moves {
            let undo = self.board.apply_move(mv, color);
            let val = -self.negamax_node(color.opponent(), depth - 1, -INFINITY, -alpha);
            self.board.undo(&undo);
            if val > alpha || best_move.is_none() {
                alpha = val;
                best_move = Some(mv);
            }
        }
        (alpha, best_move)
    }

    pub(crate) fn negamax_node(&mut self, color: Color, depth: u8, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;
        if depth == 0 {
            return self.evaluate(color);
        }

        let opponent = color.opponent();
        let moves = self.board.legal_moves(color);
        if moves.is_empty() {
            if !self.board.is_playable(opponent) {
                return self.evaluate(color);
            }
            // Pass: the board is untouched and the opponent moves instead.
            return -self.negamax_node(opponent, depth - 1, -beta, -alpha);
        }

        for mv in moves {
            let undo = self.board.apply_move(mv, color);
            let val = -self.negamax_node(opponent, depth - 1, -beta, -alpha);
            self.board.undo(&undo);
            if val >= beta {
                return val;
            }
            if val > alpha {
                alpha = val;
            }
        }
        alpha
    }
}
