//! Turn message parsing.
//!
//! The match server announces each of our turns with a 13-line message:
//!
//! ```text
//! victory_cell
//! c3 f6
//! board
//! E E E E E E E E
//! ... (8 snapshot rows in total)
//! you
//! BLACK
//! ```
//!
//! Line 1 holds the target squares (possibly none), lines 3..=10 are the
//! board snapshot and line 12 is our color. The header lines 2 and 11 are
//! not checked. Any message whose first line does not start with
//! `victory_cell` means the session is over.

use crate::board::{Board, Color, Square};

use super::snapshot::SnapshotError;

/// Prefix of the first line of every turn message.
pub const TURN_HEADER: &str = "victory_cell";

/// Number of lines in one turn message.
pub const TURN_LINES: usize = 13;

const TARGETS_LINE: usize = 1;
const BOARD_FIRST_LINE: usize = 3;
const COLOR_LINE: usize = 12;

/// Errors that can occur while parsing a turn message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("not a turn message")]
    NotATurn,

    #[error("turn message truncated: expected 13 lines, got {0}")]
    Truncated(usize),

    #[error("invalid target square: '{0}'")]
    InvalidTarget(String),

    #[error("invalid color designation: '{0}'")]
    InvalidColor(String),

    #[error("invalid board snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// One parsed turn request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Target squares as announced, not yet filtered to empty cells.
    pub targets: Vec<Square>,
    pub board: Board,
    /// The color we play.
    pub color: Color,
}

/// Returns true if `line` opens a turn message.
pub fn is_turn_header(line: &str) -> bool {
    line.starts_with(TURN_HEADER)
}

/// Parses a complete turn message.
pub fn parse_turn(message: &str) -> Result<Turn, TurnError> {
    let lines: Vec<&str> = message.lines().map(|l| l.trim_end_matches('\r')).collect();
    parse_turn_lines(&lines)
}

/// Parses a turn message already split into lines.
pub fn parse_turn_lines<S: AsRef<str>>(lines: &[S]) -> Result<Turn, TurnError> {
    match lines.first() {
        Some(first) if is_turn_header(first.as_ref()) => {}
        _ => return Err(TurnError::NotATurn),
    }
    if lines.len() < TURN_LINES {
        return Err(TurnError::Truncated(lines.len()));
    }

    let targets = lines[TARGETS_LINE]
        .as_ref()
        .split_whitespace()
        .map(|t| t.parse().map_err(|_| TurnError::InvalidTarget(t.to_string())))
        .collect::<Result<Vec<Square>, _>>()?;

    let board = Board::from_snapshot(&lines[BOARD_FIRST_LINE..BOARD_FIRST_LINE + 8])?;

    let token = lines[COLOR_LINE].as_ref().trim();
    let color = Color::from_token(token).ok_or_else(|| TurnError::InvalidColor(token.to_string()))?;

    Ok(Turn {
        targets,
        board,
        color,
    })
}

/// Builds the turn message the server would send. Used by tests and tools.
pub fn format_turn(targets: &[Square], board: &Board, color: Color) -> String {
    let targets: Vec<String> = targets.iter().map(|t| t.to_string()).collect();
    format!(
        "{}\n{}\nboard\n{}\nyou\n{}\n",
        TURN_HEADER,
        targets.join(" "),
        board.to_snapshot(),
        color.token()
    )
}
