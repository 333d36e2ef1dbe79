//! Board coordinates.
//!
//! A `Square` is a single row-major index in `0..64`, with row 0 holding
//! rank 1 and column 0 holding file `a`. Conversion to and from the external
//! letter/digit notation ("d3") happens only through `Display` and `FromStr`.

use std::fmt;
use std::str::FromStr;

/// Number of cells along one edge of the board.
pub const EDGE: usize = 8;

/// Number of cells on the board.
pub const SQUARE_COUNT: usize = EDGE * EDGE;

/// A single cell position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

/// Errors that can occur when parsing a square token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid square token: '{0}'")]
pub struct ParseSquareError(pub String);

impl Square {
    /// Creates a square from row and column, returning None when either is off the board.
    pub const fn new(row: usize, col: usize) -> Option<Square> {
        if row >= EDGE || col >= EDGE {
            None
        } else {
            Some(Square((row * EDGE + col) as u8))
        }
    }

    /// Creates a square from a row-major index.
    ///
    /// Panics if `index` is not below `SQUARE_COUNT`.
    pub fn from_index(index: usize) -> Square {
        assert!(index < SQUARE_COUNT, "square index out of range: {}", index);
        Square(index as u8)
    }

    /// Returns the row-major index of this square.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the zero-based row (rank - 1).
    #[inline]
    pub const fn row(self) -> usize {
        self.0 as usize / EDGE
    }

    /// Returns the zero-based column (file - 'a').
    #[inline]
    pub const fn col(self) -> usize {
        self.0 as usize % EDGE
    }

    /// Steps by a (row, column) delta, returning None when it leaves the board.
    #[inline]
    pub fn offset(self, dr: i32, dc: i32) -> Option<Square> {
        let r = self.row() as i32 + dr;
        let c = self.col() as i32 + dc;
        if (0..EDGE as i32).contains(&r) && (0..EDGE as i32).contains(&c) {
            Some(Square((r * EDGE as i32 + c) as u8))
        } else {
            None
        }
    }

    /// Iterates every square in scan order: ranks 1..8, files a..h within a rank.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..SQUARE_COUNT as u8).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col() as u8) as char;
        let rank = (b'1' + self.row() as u8) as char;
        write!(f, "{}{}", file, rank)
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSquareError(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(err());
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(err());
        }
        Square::new((rank - b'1') as usize, (file - b'a') as usize).ok_or_else(err)
    }
}

/// A set of squares packed into a 64-bit mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SquareSet(u64);

impl SquareSet {
    /// Creates an empty set.
    pub const fn new() -> Self {
        SquareSet(0)
    }

    #[inline]
    pub fn contains(self, sq: Square) -> bool {
        self.0 & (1u64 << sq.index()) != 0
    }

    #[inline]
    pub fn insert(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.index();
    }

    #[inline]
    pub fn remove(&mut self, sq: Square) {
        self.0 &= !(1u64 << sq.index());
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the members in index order.
    pub fn iter(self) -> impl Iterator<Item = Square> {
        Square::all().filter(move |sq| self.contains(*sq))
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::new();
        for sq in iter {
            set.insert(sq);
        }
        set
    }
}

impl fmt::Display for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<String> = self.iter().map(|sq| sq.to_string()).collect();
        write!(f, "[{}]", tokens.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_checks_bounds() {
        assert_eq!(Square::new(0, 0), Some(Square(0)));
        assert_eq!(Square::new(7, 7), Some(Square(63)));
        assert_eq!(Square::new(8, 0), None);
        assert_eq!(Square::new(0, 8), None);
    }

    #[test]
    fn row_and_col_follow_rank_and_file() {
        let sq: Square = "d3".parse().unwrap();
        assert_eq!(sq.row(), 2);
        assert_eq!(sq.col(), 3);
        assert_eq!(sq.index(), 19);
    }

    #[test]
    fn display_uses_lowercase_file() {
        assert_eq!(Square::new(0, 0).unwrap().to_string(), "a1");
        assert_eq!(Square::new(7, 7).unwrap().to_string(), "h8");
        assert_eq!(Square::new(5, 4).unwrap().to_string(), "e6");
    }

    #[test]
    fn parse_accepts_uppercase() {
        assert_eq!("F5".parse::<Square>(), Ok(Square::new(4, 5).unwrap()));
    }

    #[test]
    fn parse_rejects_bad_tokens() {
        for bad in ["", "a", "a9", "i1", "a0", "a12", "11", "NULL"] {
            assert!(bad.parse::<Square>().is_err(), "{} should not parse", bad);
        }
    }

    #[test]
    fn offset_stops_at_edges() {
        let a1 = Square::new(0, 0).unwrap();
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(0, -1), None);
        assert_eq!(a1.offset(1, 1), Square::new(1, 1));
        let h8 = Square::new(7, 7).unwrap();
        assert_eq!(h8.offset(1, 0), None);
        assert_eq!(h8.offset(0, 1), None);
    }

    #[test]
    fn all_is_scan_order() {
        let squares: Vec<String> = Square::all().take(9).map(|s| s.to_string()).collect();
        assert_eq!(
            squares,
            vec!["a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1", "a2"]
        );
        assert_eq!(Square::all().count(), SQUARE_COUNT);
    }

    #[test]
    fn square_set_membership() {
        let mut set: SquareSet = ["a1", "h8"]
            .iter()
            .map(|t| t.parse::<Square>().unwrap())
            .collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains("h8".parse().unwrap()));
        assert!(!set.contains("d4".parse().unwrap()));
        set.remove("a1".parse().unwrap());
        assert_eq!(set.to_string(), "[h8]");
        assert!(!set.is_empty());
    }
}
