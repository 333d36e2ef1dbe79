//! Engine state management.
//!
//! One `Engine` is the session context for one server connection: it holds
//! the current board, the opening book working list, the move history and
//! the random source, and turns each incoming turn message into a move.
//! Book moves are played while the book lasts; every other decision runs
//! the configured search.

use std::path::Path;

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Color, Square, SquareSet};
use crate::config::EngineConfig;
use crate::eval::EvalWeights;
use crate::opening_book::{load_book, MoveHistory, OpeningBook};
use crate::protocol::{format_move, parse_turn, Turn, TurnError};
use crate::search::search;

/// Holds the mutable state of the engine between turns.
pub struct Engine<R = SmallRng> {
    config: EngineConfig,
    weights: EvalWeights,
    board: Board,
    book: Option<OpeningBook>,
    history: MoveHistory,
    rng: R,
}

impl Engine<SmallRng> {
    /// Creates an engine from `config`, seeding the random source from
    /// `config.seed` and loading the configured opening book, if any.
    pub fn new(config: EngineConfig) -> Self {
        let rng = if config.seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(config.seed)
        };
        let book_path = config.book_path.clone();
        let mut engine = Engine::with_rng(config, rng);
        if let Some(path) = book_path {
            engine.load_book(&path);
        }
        engine
    }
}

impl<R: Rng> Engine<R> {
    /// Creates an engine with an explicit random source and no opening book.
    pub fn with_rng(config: EngineConfig, rng: R) -> Self {
        Engine {
            weights: config.eval_weights(),
            config,
            board: Board::initial(),
            book: None,
            history: MoveHistory::new(),
            rng,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The board from the most recent turn.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// The opening book, while it still has entries.
    pub fn book(&self) -> Option<&OpeningBook> {
        self.book.as_ref()
    }

    /// Installs an opening book. An empty book leaves the feature disabled.
    pub fn set_book(&mut self, book: OpeningBook) {
        self.book = if book.is_empty() { None } else { Some(book) };
    }

    /// Loads an opening book from `path`. Failure is not fatal: it is
    /// logged and the engine keeps searching every move.
    pub fn load_book(&mut self, path: &Path) -> bool {
        match load_book(path) {
            Ok(book) => {
                self.set_book(book);
                true
            }
            Err(e) => {
                warn!("opening book disabled: {}", e);
                self.book = None;
                false
            }
        }
    }

    /// Chooses our move for one turn. Returns None when we have no legal move.
    pub fn decide(&mut self, turn: Turn) -> Option<Square> {
        let Turn {
            targets,
            board,
            color,
        } = turn;
        self.board = board;
        let targets: SquareSet = targets
            .into_iter()
            .filter(|&sq| self.board.get(sq).is_empty())
            .collect();
        self.history.observe(&self.board);

        let mv = match self.book_move(color) {
            Some(mv) => {
                info!("{} plays {} from the opening book", color, mv);
                Some(mv)
            }
            None => {
                let result = search(
                    &mut self.board,
                    color,
                    self.config.depth,
                    targets,
                    &self.weights,
                    self.config.policy,
                );
                match result.best_move {
                    Some(mv) => info!(
                        "{} plays {} (score {}, {} nodes)",
                        color, mv, result.score, result.nodes
                    ),
                    None => info!("{} has no legal move", color),
                }
                result.best_move
            }
        };

        if let Some(mv) = mv {
            self.history.push(mv);
        }
        mv
    }

    /// Asks the opening book for a move that is legal on the current board.
    fn book_move(&mut self, color: Color) -> Option<Square> {
        let book = self.book.as_mut()?;
        let mv = book.next_move(&self.history, &mut self.rng);
        if book.is_empty() {
            self.book = None;
        }
        let mv = mv?;
        if self.board.is_legal(mv, color) {
            Some(mv)
        } else {
            warn!("opening book move {} is illegal for {}, searching instead", mv, color);
            None
        }
    }

    /// Parses a turn message and returns the reply token.
    pub fn handle_turn(&mut self, message: &str) -> Result<String, TurnError> {
        let turn = parse_turn(message)?;
        Ok(format_move(self.decide(turn)))
    }
}
