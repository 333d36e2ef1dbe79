//! Session loop.
//!
//! Reads turn messages from the server line by line, answers each with a
//! bare move token and stops at the first message that is not a turn.
//! Generic over the transport so the same loop serves a `TcpStream` and
//! in-memory buffers in tests.

use std::io::{self, BufRead, Write};

use log::{error, info};
use rand::Rng;

use crate::board::Color;
use crate::engine::Engine;
use crate::protocol::{format_move, is_turn_header, parse_turn_lines, TurnError, TURN_LINES};

/// Errors that end a session early.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed turn: {0}")]
    Turn(#[from] TurnError),
}

/// Reads one line without its terminator. Returns None at end of input.
fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let len = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(len);
    Ok(Some(line))
}

/// Reads the last line of a turn. The server may send the color token
/// without a newline and then wait for our reply, so a buffered chunk that
/// ends in a complete color token finishes the line without waiting for
/// more input.
fn read_color_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut bytes = Vec::new();
    let mut seen_input = false;
    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            break;
        }
        seen_input = true;
        if let Some(end) = available.iter().position(|&b| b == b'\n') {
            bytes.extend_from_slice(&available[..end]);
            reader.consume(end + 1);
            break;
        }
        let len = available.len();
        bytes.extend_from_slice(available);
        reader.consume(len);
        if Color::from_token(String::from_utf8_lossy(&bytes).trim()).is_some() {
            break;
        }
    }
    if !seen_input {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&bytes);
    Ok(Some(line.trim_end_matches('\r').to_string()))
}

/// Plays turns until the server ends the session. Returns the number of
/// turns answered.
pub fn run_session<R, W, G>(mut reader: R, mut writer: W, engine: &mut Engine<G>) -> Result<usize, DriverError>
where
    R: BufRead,
    W: Write,
    G: Rng,
{
    let mut turns = 0;
    loop {
        let header = loop {
            match read_line(&mut reader)? {
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => break Some(line),
                None => break None,
            }
        };
        let header = match header {
            Some(h) => h,
            None => {
                info!("connection closed after {} turns", turns);
                return Ok(turns);
            }
        };
        if !is_turn_header(&header) {
            info!("session over after {} turns: {}", turns, header.trim());
            return Ok(turns);
        }

        let mut lines = vec![header];
        while lines.len() < TURN_LINES {
            let next = if lines.len() == TURN_LINES - 1 {
                read_color_line(&mut reader)?
            } else {
                read_line(&mut reader)?
            };
            match next {
                Some(line) => lines.push(line),
                None => break,
            }
        }
        let turn = parse_turn_lines(&lines).map_err(|e| {
            error!("aborting session: {}", e);
            e
        })?;

        let reply = format_move(engine.decide(turn));
        writer.write_all(reply.as_bytes())?;
        writer.flush()?;
        turns += 1;
    }
}
