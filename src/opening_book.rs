//! Opening book for the Reversi engine.
//!
//! A book is a plain text file with one known continuation per line, each a
//! concatenation of two-character move tokens from the start of the game
//! ("d3c5f6..."). During a session the working list only shrinks: an entry
//! that is exhausted or has diverged from the game's move history can never
//! match again, so it is dropped for good. Once no entry offers a
//! continuation the book is cleared and every later decision is searched.

use std::fs;
use std::path::Path;

use log::info;
use rand::Rng;

use crate::board::{Board, Square};

/// The four center squares occupied before the first move.
const STARTING_SQUARES: [&str; 4] = ["d4", "e4", "d5", "e5"];

/// Errors that can occur while loading a book file.
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("opening book {0} contains no entries")]
    Empty(String),
}

/// Moves played so far in the current game, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    moves: Vec<Square>,
}

impl MoveHistory {
    pub fn new() -> Self {
        MoveHistory::default()
    }

    /// Records a move.
    pub fn push(&mut self, sq: Square) {
        self.moves.push(sq);
    }

    /// Records every occupied square that is neither a starting square nor
    /// already recorded, in scan order.
    ///
    /// Called with each new snapshot to pick up the opponent's moves, which
    /// the server never reports directly. Squares become occupied exactly
    /// once per game, so a single opponent move between two of our turns is
    /// recovered exactly.
    pub fn observe(&mut self, board: &Board) {
        for sq in Square::all() {
            if board.get(sq).is_empty() || is_starting_square(sq) || self.moves.contains(&sq) {
                continue;
            }
            self.moves.push(sq);
        }
    }

    pub fn moves(&self) -> &[Square] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Concatenated move tokens, the form book entries are matched against.
    pub fn as_string(&self) -> String {
        self.moves.iter().map(|m| m.to_string()).collect()
    }
}

fn is_starting_square(sq: Square) -> bool {
    let token = sq.to_string();
    STARTING_SQUARES.contains(&token.as_str())
}

/// The in-memory working list of book continuations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpeningBook {
    lines: Vec<String>,
}

impl OpeningBook {
    /// Builds a book from raw entries. Entries are trimmed and lowercased;
    /// blank entries are skipped.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = lines
            .into_iter()
            .map(|l| l.as_ref().trim().to_ascii_lowercase())
            .filter(|l| !l.is_empty())
            .collect();
        OpeningBook { lines }
    }

    /// The entries still in play.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True once the book has been exhausted (or was never populated).
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drops every entry that can no longer match `history` and returns the
    /// next move of each remaining entry, duplicates included.
    pub fn candidates(&mut self, history: &str) -> Vec<Square> {
        let mut moves = Vec::new();
        self.lines.retain(|line| match next_token(line, history) {
            Some(sq) => {
                moves.push(sq);
                true
            }
            None => false,
        });
        moves
    }

    /// Picks a continuation for the current history uniformly at random.
    ///
    /// Returns None and clears the book when no entry offers a move, which
    /// disables the book for the rest of the session.
    pub fn next_move<R: Rng>(&mut self, history: &MoveHistory, rng: &mut R) -> Option<Square> {
        if self.lines.is_empty() {
            return None;
        }
        let candidates = self.candidates(&history.as_string());
        if candidates.is_empty() {
            info!("opening book exhausted after {} moves", history.len());
            self.lines.clear();
            return None;
        }
        Some(candidates[rng.gen_range(0..candidates.len())])
    }
}

/// Returns the move following `history` in `line`, or None when the entry
/// is exhausted, diverges from the history, or continues with a bad token.
fn next_token(line: &str, history: &str) -> Option<Square> {
    let rest = line.strip_prefix(history)?;
    rest.get(..2)?.parse().ok()
}

/// Loads an opening book from a text file at the given path.
pub fn load_book(path: &Path) -> Result<OpeningBook, BookError> {
    let data = fs::read_to_string(path).map_err(|source| BookError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let book = load_book_from_str(&data);
    if book.is_empty() {
        return Err(BookError::Empty(path.display().to_string()));
    }
    info!("loaded {} opening book entries from {}", book.len(), path.display());
    Ok(book)
}

/// Loads an opening book from text, one entry per line.
pub fn load_book_from_str(text: &str) -> OpeningBook {
    OpeningBook::new(text.lines())
}
