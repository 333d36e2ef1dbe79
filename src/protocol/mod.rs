//! Match server protocol handling.
//!
//! This module implements parsing and serialization for the line-based
//! protocol spoken with the match server: the 8-row board snapshot, the
//! 13-line turn message and the bare move reply.

pub mod snapshot;
pub mod turn;

use crate::board::Square;

pub use snapshot::{encode_snapshot, parse_snapshot, SnapshotError};
pub use turn::{format_turn, is_turn_header, parse_turn, parse_turn_lines, Turn, TurnError, TURN_LINES};

/// Reply token sent when we have no legal move.
pub const NO_MOVE: &str = "NULL";

/// Formats a decision as the reply token.
pub fn format_move(mv: Option<Square>) -> String {
    match mv {
        Some(sq) => sq.to_string(),
        None => NO_MOVE.to_string(),
    }
}
