//! Board representation.
//!
//! Contains the coordinate type, cell contents, the positional weight table
//! and the mutable board with its move rules.

pub mod cell;
pub mod square;
pub mod state;

pub use cell::{Cell, Color};
pub use square::{ParseSquareError, Square, SquareSet, EDGE, SQUARE_COUNT};
pub use state::{weight, Board, Undo, DIRECTIONS, WEIGHTS};
