//! Disc colors and cell contents.
//!
//! A cell is either empty or holds a disc of one of the two colors. The
//! single-character snapshot notation is 'E', 'B', 'W'.

use std::fmt;
use std::ops::Not;

use serde::{Deserialize, Serialize};

/// One of the two players' disc colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Returns the other color.
    #[inline]
    pub const fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Parses the server's color designation ("BLACK" / "WHITE", any case).
    pub fn from_token(token: &str) -> Option<Color> {
        if token.eq_ignore_ascii_case("black") {
            Some(Color::Black)
        } else if token.eq_ignore_ascii_case("white") {
            Some(Color::White)
        } else {
            None
        }
    }

    /// Returns the server's color designation.
    pub const fn token(self) -> &'static str {
        match self {
            Color::Black => "BLACK",
            Color::White => "WHITE",
        }
    }
}

impl Not for Color {
    type Output = Color;

    fn not(self) -> Color {
        self.opponent()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("black"),
            Color::White => f.write_str("white"),
        }
    }
}

/// The content of one board cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    /// Returns the snapshot character for this cell.
    pub const fn snapshot_char(self) -> char {
        match self {
            Cell::Empty => 'E',
            Cell::Black => 'B',
            Cell::White => 'W',
        }
    }

    /// Parses a cell from its snapshot character.
    pub fn from_snapshot_char(c: char) -> Option<Cell> {
        match c {
            'E' => Some(Cell::Empty),
            'B' => Some(Cell::Black),
            'W' => Some(Cell::White),
            _ => None,
        }
    }

    /// Returns the disc color in this cell, if any.
    #[inline]
    pub const fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Color::Black),
            Cell::White => Some(Color::White),
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Cell {
        match color {
            Color::Black => Cell::Black,
            Color::White => Cell::White,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_flips_color() {
        assert_eq!(Color::Black.opponent(), Color::White);
        assert_eq!(!Color::White, Color::Black);
    }

    #[test]
    fn color_token_roundtrip() {
        for c in [Color::Black, Color::White] {
            assert_eq!(Color::from_token(c.token()), Some(c));
        }
        assert_eq!(Color::from_token("black"), Some(Color::Black));
        assert_eq!(Color::from_token("RED"), None);
    }

    #[test]
    fn snapshot_char_roundtrip() {
        for cell in [Cell::Empty, Cell::Black, Cell::White] {
            assert_eq!(Cell::from_snapshot_char(cell.snapshot_char()), Some(cell));
        }
        assert_eq!(Cell::from_snapshot_char('e'), None);
        assert_eq!(Cell::from_snapshot_char('X'), None);
    }

    #[test]
    fn cell_from_color() {
        assert_eq!(Cell::from(Color::Black).color(), Some(Color::Black));
        assert_eq!(Cell::from(Color::White).color(), Some(Color::White));
        assert!(Cell::Empty.is_empty());
    }
}
