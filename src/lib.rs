//! Reverso engine library.
//!
//! Exposes the board representation, evaluation, search, opening book and
//! protocol modules for use by integration tests, benchmarks and the
//! binary entry points.

pub mod board;
pub mod config;
pub mod driver;
pub mod engine;
pub mod eval;
pub mod opening_book;
pub mod protocol;
pub mod search;
pub mod selfplay;
