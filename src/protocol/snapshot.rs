//! Board snapshot encoding and decoding.
//!
//! A snapshot is 8 lines of 8 whitespace-separated tokens drawn from
//! `E` (empty), `B` (black) and `W` (white). Line `i` is rank `i + 1` and
//! token `j` is file `'a' + j`.
//!
//! Example (the starting position):
//!
//! ```text
//! E E E E E E E E
//! E E E E E E E E
//! E E E E E E E E
//! E E E W B E E E
//! E E E B W E E E
//! E E E E E E E E
//! E E E E E E E E
//! E E E E E E E E
//! ```

use crate::board::{Board, Cell, EDGE, SQUARE_COUNT};

/// Errors that can occur during snapshot parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("expected 8 rows, got {0}")]
    WrongRowCount(usize),

    #[error("row {row}: expected 8 tokens, got {count}")]
    WrongTokenCount { row: usize, count: usize },

    #[error("row {row}: invalid cell token '{token}'")]
    InvalidToken { row: usize, token: String },
}

/// Parses the 8 snapshot rows into a row-major cell array.
///
/// Trailing carriage returns are ignored. Nothing is returned unless every
/// row is valid.
pub fn parse_cells<S: AsRef<str>>(rows: &[S]) -> Result<[Cell; SQUARE_COUNT], SnapshotError> {
    if rows.len() != EDGE {
        return Err(SnapshotError::WrongRowCount(rows.len()));
    }

    let mut cells = [Cell::Empty; SQUARE_COUNT];
    for (row, line) in rows.iter().enumerate() {
        let tokens: Vec<&str> = line.as_ref().trim_end_matches('\r').split_whitespace().collect();
        if tokens.len() != EDGE {
            return Err(SnapshotError::WrongTokenCount {
                row,
                count: tokens.len(),
            });
        }
        for (col, token) in tokens.iter().enumerate() {
            let mut chars = token.chars();
            let cell = match (chars.next(), chars.next()) {
                (Some(c), None) => Cell::from_snapshot_char(c),
                _ => None,
            };
            cells[row * EDGE + col] = cell.ok_or_else(|| SnapshotError::InvalidToken {
                row,
                token: token.to_string(),
            })?;
        }
    }
    Ok(cells)
}

/// Parses a full snapshot from a block of text, one row per line.
///
/// Blank lines around the block are skipped.
pub fn parse_snapshot(text: &str) -> Result<Board, SnapshotError> {
    let rows: Vec<&str> = text
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty())
        .collect();
    Board::from_snapshot(&rows)
}

/// Encodes a board as snapshot text.
pub fn encode_snapshot(board: &Board) -> String {
    board.to_snapshot()
}
