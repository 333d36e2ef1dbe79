//! Board state and move rules.
//!
//! Holds the 8x8 cell grid for one decision and implements legal-move
//! detection, flip computation and in-place move application. Search
//! mutates a single `Board` and restores it through the `Undo` log that
//! `apply_move` returns.

use std::cmp::Reverse;
use std::fmt;

use super::cell::{Cell, Color};
use super::square::{Square, EDGE, SQUARE_COUNT};
use crate::protocol::snapshot::{parse_cells, SnapshotError};

/// Static positional value of each square, row-major from a1.
///
/// Corners are worth the most, the cells touching a corner are penalised
/// and the centre is close to neutral. The table is symmetric under the
/// board's reflections.
#[rustfmt::skip]
pub const WEIGHTS: [i32; SQUARE_COUNT] = [
    200, -25, 20, 20, 20, 20, -25, 200,
    -25, -50,  5,  5,  5,  5, -50, -25,
     20,   5,  1,  1,  1,  1,   5,  20,
     20,   5,  1,  1,  1,  1,   5,  20,
     20,   5,  1,  1,  1,  1,   5,  20,
     20,   5,  1,  1,  1,  1,   5,  20,
    -25, -50,  5,  5,  5,  5, -50, -25,
    200, -25, 20, 20, 20, 20, -25, 200,
];

/// Scan directions as (row delta, column delta): N, S, E, W, NE, NW, SE, SW.
///
/// Rows grow with rank, so north points toward rank 1.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, -1),
    (1, 1),
    (1, -1),
];

/// Returns the static weight of a square.
#[inline]
pub fn weight(sq: Square) -> i32 {
    WEIGHTS[sq.index()]
}

/// The prior contents of every cell touched by one `apply_move`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Undo {
    entries: Vec<(Square, Cell)>,
}

impl Undo {
    /// Number of cells the move changed, the placed disc included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The recorded (square, prior value) pairs.
    pub fn entries(&self) -> &[(Square, Cell)] {
        &self.entries
    }
}

/// The 8x8 grid of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; SQUARE_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    /// Creates a board with every cell empty.
    pub const fn new() -> Self {
        Board {
            cells: [Cell::Empty; SQUARE_COUNT],
        }
    }

    /// Creates the standard starting position: d4/e5 white, e4/d5 black.
    pub fn initial() -> Self {
        let mut board = Board::new();
        board.cells[3 * EDGE + 3] = Cell::White;
        board.cells[3 * EDGE + 4] = Cell::Black;
        board.cells[4 * EDGE + 3] = Cell::Black;
        board.cells[4 * EDGE + 4] = Cell::White;
        board
    }

    /// Builds a board from the 8-line snapshot representation.
    pub fn from_snapshot<S: AsRef<str>>(rows: &[S]) -> Result<Self, SnapshotError> {
        let mut board = Board::new();
        board.update(rows)?;
        Ok(board)
    }

    /// Overwrites all 64 cells from the 8-line snapshot representation.
    ///
    /// The whole snapshot is validated first; on error the board is unchanged.
    pub fn update<S: AsRef<str>>(&mut self, rows: &[S]) -> Result<(), SnapshotError> {
        self.cells = parse_cells(rows)?;
        Ok(())
    }

    /// Renders the board in snapshot form: 8 lines of 8 space-separated tokens.
    pub fn to_snapshot(&self) -> String {
        let mut out = String::with_capacity(SQUARE_COUNT * 2);
        for row in 0..EDGE {
            if row > 0 {
                out.push('\n');
            }
            for col in 0..EDGE {
                if col > 0 {
                    out.push(' ');
                }
                out.push(self.cells[row * EDGE + col].snapshot_char());
            }
        }
        out
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Cell {
        self.cells[sq.index()]
    }

    #[inline]
    pub fn set(&mut self, sq: Square, cell: Cell) {
        self.cells[sq.index()] = cell;
    }

    /// Length of the opponent run starting next to `sq` in one direction,
    /// or 0 when the run is not closed by a `color` disc.
    fn run_length(&self, sq: Square, (dr, dc): (i32, i32), color: Color) -> usize {
        let own = Cell::from(color);
        let theirs = Cell::from(color.opponent());
        let mut len = 0;
        let mut cur = sq;
        while let Some(next) = cur.offset(dr, dc) {
            let cell = self.cells[next.index()];
            if cell == theirs {
                len += 1;
                cur = next;
            } else if cell == own {
                return len;
            } else {
                return 0;
            }
        }
        0
    }

    /// Returns true if `color` may place a disc on `sq`.
    pub fn is_legal(&self, sq: Square, color: Color) -> bool {
        self.get(sq).is_empty()
            && DIRECTIONS
                .iter()
                .any(|&dir| self.run_length(sq, dir, color) > 0)
    }

    /// Returns the discs that flip when `color` plays `sq`, direction by
    /// direction in `DIRECTIONS` order, nearest first within a direction.
    pub fn flips(&self, sq: Square, color: Color) -> Vec<Square> {
        let mut out = Vec::new();
        if !self.get(sq).is_empty() {
            return out;
        }
        for &(dr, dc) in DIRECTIONS.iter() {
            let len = self.run_length(sq, (dr, dc), color);
            let mut cur = sq;
            for _ in 0..len {
                // The run was just scanned, so every step stays on the board.
                if let Some(next) = cur.offset(dr, dc) {
                    out.push(next);
                    cur = next;
                }
            }
        }
        out
    }

    /// Returns all legal moves for `color`, highest static weight first.
    /// Equal weights keep scan order (rank 1 first, file a first).
    pub fn legal_moves(&self, color: Color) -> Vec<Square> {
        let mut moves: Vec<Square> = Square::all()
            .filter(|&sq| self.is_legal(sq, color))
            .collect();
        moves.sort_by_key(|&sq| Reverse(weight(sq)));
        moves
    }

    /// Returns true if `color` has at least one legal move.
    pub fn is_playable(&self, color: Color) -> bool {
        Square::all().any(|sq| self.is_legal(sq, color))
    }

    /// Returns true when neither color can move.
    pub fn is_game_over(&self) -> bool {
        !self.is_playable(Color::Black) && !self.is_playable(Color::White)
    }

    /// Places `color` on `sq` and flips the captured discs.
    ///
    /// The returned log must be passed to [`Board::undo`] before any
    /// enclosing search frame continues.
    pub fn apply_move(&mut self, sq: Square, color: Color) -> Undo {
        let flipped = self.flips(sq, color);
        debug_assert!(!flipped.is_empty(), "illegal move {} for {}", sq, color);
        let disc = Cell::from(color);
        let mut entries = Vec::with_capacity(flipped.len() + 1);
        for f in flipped {
            entries.push((f, self.cells[f.index()]));
            self.cells[f.index()] = disc;
        }
        entries.push((sq, self.cells[sq.index()]));
        self.cells[sq.index()] = disc;
        Undo { entries }
    }

    /// Restores every cell recorded in `undo`.
    pub fn undo(&mut self, undo: &Undo) {
        for &(sq, prior) in undo.entries.iter() {
            self.cells[sq.index()] = prior;
        }
    }

    /// Number of cells holding `color`.
    pub fn count(&self, color: Color) -> usize {
        let disc = Cell::from(color);
        self.cells.iter().filter(|&&c| c == disc).count()
    }

    /// Number of empty cells.
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  a b c d e f g h")?;
        for row in 0..EDGE {
            write!(f, "\n{} ", row + 1)?;
            for col in 0..EDGE {
                let c = match self.cells[row * EDGE + col] {
                    Cell::Empty => '.',
                    Cell::Black => 'B',
                    Cell::White => 'W',
                };
                write!(f, "{} ", c)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(token: &str) -> Square {
        token.parse().unwrap()
    }

    fn names(squares: &[Square]) -> Vec<String> {
        squares.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn weights_are_symmetric() {
        for s in Square::all() {
            let (r, c) = (s.row(), s.col());
            let mirrored = [
                Square::new(r, EDGE - 1 - c).unwrap(),
                Square::new(EDGE - 1 - r, c).unwrap(),
                Square::new(c, r).unwrap(),
            ];
            for m in mirrored {
                assert_eq!(weight(s), weight(m), "{} vs {}", s, m);
            }
        }
    }

    #[test]
    fn initial_position_layout() {
        let board = Board::initial();
        assert_eq!(board.get(sq("d4")), Cell::White);
        assert_eq!(board.get(sq("e4")), Cell::Black);
        assert_eq!(board.get(sq("d5")), Cell::Black);
        assert_eq!(board.get(sq("e5")), Cell::White);
        assert_eq!(board.count(Color::Black), 2);
        assert_eq!(board.count(Color::White), 2);
        assert_eq!(board.count_empty(), 60);
    }

    #[test]
    fn initial_legal_moves_black() {
        let board = Board::initial();
        let mut moves = names(&board.legal_moves(Color::Black));
        moves.sort();
        assert_eq!(moves, vec!["c4", "d3", "e6", "f5"]);
    }

    #[test]
    fn initial_legal_moves_white() {
        let board = Board::initial();
        let mut moves = names(&board.legal_moves(Color::White));
        moves.sort();
        assert_eq!(moves, vec!["c5", "d6", "e3", "f4"]);
    }

    #[test]
    fn legal_moves_sorted_by_weight() {
        let mut board = Board::new();
        board.set(sq("b2"), Cell::White);
        board.set(sq("c3"), Cell::Black);
        board.set(sq("b3"), Cell::White);
        board.set(sq("c4"), Cell::Black);
        // a1 (200) captures b2 along the diagonal; a3 (20) captures b3.
        let moves = names(&board.legal_moves(Color::Black));
        assert_eq!(moves.first().map(String::as_str), Some("a1"));
        let weights: Vec<i32> = board
            .legal_moves(Color::Black)
            .iter()
            .map(|&m| weight(m))
            .collect();
        assert!(weights.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn adjacent_own_disc_is_not_a_capture() {
        let mut board = Board::new();
        board.set(sq("d4"), Cell::Black);
        assert!(!board.is_legal(sq("d3"), Color::Black));
        assert!(board.flips(sq("d3"), Color::Black).is_empty());
    }

    #[test]
    fn run_ending_at_edge_or_empty_is_not_a_capture() {
        let mut board = Board::new();
        board.set(sq("b1"), Cell::White);
        board.set(sq("c1"), Cell::White);
        assert!(!board.is_legal(sq("d1"), Color::Black));
        board.set(sq("e1"), Cell::White);
        board.set(sq("g1"), Cell::Black);
        // g1 runs into empty h1 and e1 is white's own disc.
        assert!(!board.is_legal(sq("f1"), Color::White));
    }

    #[test]
    fn occupied_square_is_never_legal() {
        let board = Board::initial();
        for color in [Color::Black, Color::White] {
            assert!(!board.is_legal(sq("d4"), color));
            assert!(board.flips(sq("d4"), color).is_empty());
        }
    }

    #[test]
    fn flips_follow_direction_order() {
        // Black plays d4 capturing north (d3, d2) and east (e4).
        let mut board = Board::new();
        board.set(sq("d3"), Cell::White);
        board.set(sq("d2"), Cell::White);
        board.set(sq("d1"), Cell::Black);
        board.set(sq("e4"), Cell::White);
        board.set(sq("f4"), Cell::Black);
        board.set(sq("c5"), Cell::White);
        board.set(sq("b6"), Cell::Black);
        let flips = names(&board.flips(sq("d4"), Color::Black));
        assert_eq!(flips, vec!["d3", "d2", "e4", "c5"]);
    }

    #[test]
    fn apply_move_flips_and_places() {
        let mut board = Board::initial();
        let undo = board.apply_move(sq("d3"), Color::Black);
        assert_eq!(undo.len(), 2);
        assert_eq!(board.get(sq("d3")), Cell::Black);
        assert_eq!(board.get(sq("d4")), Cell::Black);
        assert_eq!(board.count(Color::Black), 4);
        assert_eq!(board.count(Color::White), 1);
    }

    #[test]
    fn undo_restores_exact_position() {
        let mut board = Board::initial();
        let before = board;
        let first = board.apply_move(sq("d3"), Color::Black);
        let mid = board;
        let second = board.apply_move(sq("c3"), Color::White);
        board.undo(&second);
        assert_eq!(board, mid);
        board.undo(&first);
        assert_eq!(board, before);
    }

    #[test]
    fn undo_log_records_placed_cell_last() {
        let mut board = Board::initial();
        let undo = board.apply_move(sq("f5"), Color::Black);
        let (placed, prior) = *undo.entries().last().unwrap();
        assert_eq!(placed, sq("f5"));
        assert_eq!(prior, Cell::Empty);
        assert_eq!(undo.entries()[0], (sq("e5"), Cell::White));
    }

    #[test]
    fn playable_matches_legal_moves() {
        let mut board = Board::new();
        assert!(!board.is_playable(Color::Black));
        assert!(board.is_game_over());
        board.set(sq("a1"), Cell::Black);
        board.set(sq("b1"), Cell::White);
        assert!(board.is_playable(Color::Black));
        assert!(!board.is_playable(Color::White));
        assert!(board.legal_moves(Color::White).is_empty());
        assert!(!board.is_game_over());
    }

    #[test]
    fn snapshot_roundtrip() {
        let board = Board::initial();
        let text = board.to_snapshot();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[3], "E E E W B E E E");
        assert_eq!(Board::from_snapshot(&rows).unwrap(), board);
    }

    #[test]
    fn update_is_idempotent() {
        let rows: Vec<String> = Board::initial().to_snapshot().lines().map(String::from).collect();
        let mut board = Board::new();
        board.update(&rows).unwrap();
        let once = board;
        board.update(&rows).unwrap();
        assert_eq!(board, once);
    }

    #[test]
    fn rejected_update_leaves_board_untouched() {
        let mut board = Board::initial();
        let rows = vec!["E E E E E E E E"; 7];
        assert!(board.update(&rows).is_err());
        assert_eq!(board, Board::initial());
    }

    #[test]
    fn display_has_labels() {
        let text = Board::initial().to_string();
        assert!(text.starts_with("  a b c d e f g h"));
        assert!(text.contains("\n4 . . . W B . . . "));
    }
}
