//! NegaScout (principal variation search).
//!
//! The first move at each node is searched with the full window. Later
//! moves are probed with a null window just above the best score so far;
//! only a probe that lands strictly inside (bound, beta) is re-searched with
//! the full window. In the final two plies a probe that beats the bound is
//! already exact, so it is accepted without re-search.

use super::{SearchResult, Searcher, INFINITY};
use crate::board::{Board, Color, Square, SquareSet};
use crate::eval::EvalWeights;

/// Searches `depth` plies with NegaScout and returns the best move for `color`.
pub fn negascout(
    board: &mut Board,
    color: Color,
    depth: u8,
    targets: SquareSet,
    weights: &EvalWeights,
) -> SearchResult {
    let mut searcher = Searcher::new(board, targets, weights);
    let (score, best_move) = searcher.pvs(color, depth.max(1), -INFINITY, INFINITY);
    SearchResult {
        best_move,
        score,
        nodes: searcher.nodes,
    }
}

impl Searcher<'_> {
    /// Returns the fail-soft score of the current position for `color` and
    /// the move that produced it (None at leaves and pass nodes).
    pub(crate) fn pvs(&mut self, color: Color, depth: u8, alpha: i32, beta: i32) -> (i32, Option<Square>) {
        self.nodes += 1;
        if depth == 0 {
            return (self.evaluate(color), None);
        }

        let opponent = color.opponent();
        let moves = self.board.legal_moves(color);
        if moves.is_empty() {
            if !self.board.is_playable(opponent) {
                return (self.evaluate(color), None);
            }
            let (score, _) = self.pvs(opponent, depth - 1, -beta, -alpha);
            return (-score, None);
        }

        let mut best_score = -INFINITY;
        let mut best_move = None;
        let mut scout_beta = beta;
        for (i, mv) in moves.into_iter().enumerate() {
            let bound = alpha.max(best_score);
            let undo = self.board.apply_move(mv, color);
            let probe = -self.pvs(opponent, depth - 1, -scout_beta, -bound).0;
            if probe > best_score || best_move.is_none() {
                let exact = i == 0 || depth <= 2 || probe <= bound || probe >= beta;
                best_score = if exact {
                    probe
                } else {
                    -self.pvs(opponent, depth - 1, -beta, -probe).0
                };
                best_move = Some(mv);

                if best_score >= beta {
                    self.board.undo(&undo);
                    return (best_score, best_move);
                }
            }
            self.board.undo(&undo);
            scout_beta = alpha.max(best_score) + 1;
        }
        (best_score, best_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::search::negamax;

    fn sq(token: &str) -> Square {
        token.parse().unwrap()
    }

    #[test]
    fn agrees_with_negamax_on_a_midgame_line() {
        let weights = EvalWeights::default();
        let mut board = Board::initial();
        let line = [
            ("f5", Color::Black),
            ("d6", Color::White),
            ("c3", Color::Black),
            ("d3", Color::White),
            ("c4", Color::Black),
        ];
        for (token, color) in line {
            assert!(board.is_legal(sq(token), color), "{} illegal", token);
            board.apply_move(sq(token), color);
        }
        for depth in 1..=5 {
            let a = negamax(&mut board, Color::White, depth, SquareSet::new(), &weights);
            let b = negascout(&mut board, Color::White, depth, SquareSet::new(), &weights);
            assert_eq!(a.score, b.score, "depth {}", depth);
        }
    }

    #[test]
    fn restores_board_after_deep_search() {
        let weights = EvalWeights::default();
        let mut board = Board::initial();
        let result = negascout(&mut board, Color::Black, 5, SquareSet::new(), &weights);
        assert!(result.best_move.is_some());
        assert!(result.nodes > 5);
        assert_eq!(board, Board::initial());
    }

    #[test]
    fn passes_when_mover_is_stuck() {
        // White cannot capture the corner disc; Black can play c1.
        let mut board = Board::new();
        board.set(sq("a1"), Cell::Black);
        board.set(sq("b1"), Cell::White);
        let before = board;
        let weights = EvalWeights::default();

        let result = negascout(&mut board, Color::White, 2, SquareSet::new(), &weights);
        assert_eq!(result.best_move, None);
        assert_eq!(board, before);
        // Black plays c1 and owns a1, b1, c1: 200 - 25 + 20 from White's side.
        assert_eq!(result.score, -195);

        let reference = negamax(&mut board, Color::White, 2, SquareSet::new(), &weights);
        assert_eq!(reference.best_move, None);
        assert_eq!(reference.score, result.score);
    }

    #[test]
    fn game_over_returns_static_score() {
        let mut board = Board::new();
        board.set(sq("a1"), Cell::Black);
        board.set(sq("h8"), Cell::White);
        board.set(sq("a2"), Cell::Black);
        let weights = EvalWeights::default();
        let result = negascout(&mut board, Color::Black, 4, SquareSet::new(), &weights);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, -25);
    }

    #[test]
    fn dominant_bonus_overrides_the_corner() {
        // Black may take the a1 corner or the e3 target.
        let mut board = Board::new();
        board.set(sq("b2"), Cell::White);
        board.set(sq("c3"), Cell::Black);
        board.set(sq("d3"), Cell::White);
        let targets: SquareSet = [sq("e3")].into_iter().collect();

        let dominant = EvalWeights::default();
        let result = negascout(&mut board, Color::Black, 1, targets, &dominant);
        assert_eq!(result.best_move, Some(sq("e3")));

        let biased = EvalWeights {
            target_bonus: 10,
            disc_weight: 0,
        };
        let result = negascout(&mut board, Color::Black, 1, targets, &biased);
        assert_eq!(result.best_move, Some(sq("a1")));
    }

    /// a1 Black, b1 White and a White eighth rank: c1 is Black's only move.
    fn only_c1_board() -> Board {
        let mut board = Board::new();
        board.set(sq("a1"), Cell::Black);
        board.set(sq("b1"), Cell::White);
        for s in Square::all().filter(|s| s.index() >= 56) {
            board.set(s, Cell::White);
        }
        board
    }

    #[test]
    fn keeps_a_move_when_every_line_is_below_the_window() {
        let weights = EvalWeights {
            target_bonus: 10,
            disc_weight: 1_000_000,
        };
        let mut board = only_c1_board();
        assert_eq!(board.legal_moves(Color::Black), vec![sq("c1")]);
        for depth in 1..=2 {
            let result = negascout(&mut board, Color::Black, depth, SquareSet::new(), &weights);
            assert_eq!(result.best_move, Some(sq("c1")), "depth {}", depth);
        }
    }
}
