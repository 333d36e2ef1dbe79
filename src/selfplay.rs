//! Self-play game generation.
//!
//! Plays complete games between two configurable search players from the
//! starting position, with a random set of target squares fixed at game
//! start. Records every move (or pass) with its search score and node count
//! and writes games as JSONL for offline comparison of depths, policies and
//! evaluation weights.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Color, Square, SquareSet};
use crate::eval::EvalWeights;
use crate::search::{search, SearchPolicy};

/// Search settings for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub depth: u8,
    pub policy: SearchPolicy,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            depth: 4,
            policy: SearchPolicy::NegaScout,
        }
    }
}

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    pub black: PlayerConfig,
    pub white: PlayerConfig,
    /// Number of target squares drawn at the start of each game.
    pub target_count: usize,
    /// Evaluation terms shared by both sides.
    pub weights: EvalWeights,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            black: PlayerConfig::default(),
            white: PlayerConfig::default(),
            target_count: 3,
            weights: EvalWeights::default(),
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

impl SelfPlayConfig {
    fn player(&self, color: Color) -> PlayerConfig {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }
}

/// A single move (or pass) from a self-play game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub color: Color,
    /// The square played, or None for a pass.
    #[serde(rename = "move")]
    pub mv: Option<String>,
    /// Search score from the mover's perspective.
    pub score: i32,
    pub nodes: u64,
}

/// A complete self-play game record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    /// Target squares drawn at game start.
    pub targets: Vec<String>,
    pub moves: Vec<MoveRecord>,
    pub black_discs: usize,
    pub white_discs: usize,
    /// None for a drawn game.
    pub winner: Option<Color>,
    /// Final position in snapshot form.
    pub final_board: String,
}

impl GameRecord {
    /// Number of discs actually placed (passes excluded).
    pub fn placed(&self) -> usize {
        self.moves.iter().filter(|m| m.mv.is_some()).count()
    }
}

/// Draws `count` distinct empty squares.
fn draw_targets(board: &Board, count: usize, rng: &mut SmallRng) -> Vec<Square> {
    let empty: Vec<Square> = Square::all().filter(|&sq| board.get(sq).is_empty()).collect();
    let mut targets: Vec<Square> = empty.choose_multiple(rng, count).copied().collect();
    targets.sort();
    targets
}

/// Plays a single self-play game and returns the game record.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, rng: &mut SmallRng) -> GameRecord {
    let mut board = Board::initial();
    let targets = draw_targets(&board, config.target_count, rng);
    let mut moves = Vec::new();
    let mut color = Color::Black;

    while !board.is_game_over() {
        let live: SquareSet = targets
            .iter()
            .copied()
            .filter(|&sq| board.get(sq).is_empty())
            .collect();
        let player = config.player(color);
        let result = search(
            &mut board,
            color,
            player.depth,
            live,
            &config.weights,
            player.policy,
        );
        if let Some(mv) = result.best_move {
            board.apply_move(mv, color);
        }
        moves.push(MoveRecord {
            color,
            mv: result.best_move.map(|m| m.to_string()),
            score: result.score,
            nodes: result.nodes,
        });
        color = color.opponent();
    }

    let black_discs = board.count(Color::Black);
    let white_discs = board.count(Color::White);
    let winner = match black_discs.cmp(&white_discs) {
        std::cmp::Ordering::Greater => Some(Color::Black),
        std::cmp::Ordering::Less => Some(Color::White),
        std::cmp::Ordering::Equal => None,
    };

    GameRecord {
        game_id,
        targets: targets.iter().map(|t| t.to_string()).collect(),
        moves,
        black_discs,
        white_discs,
        winner,
        final_board: board.to_snapshot(),
    }
}

fn seeded_rng(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn log_game(game: &GameRecord, done: usize, total: usize, elapsed: f64) {
    let outcome = match game.winner {
        Some(w) => format!("{} wins", w),
        None => "draw".to_string(),
    };
    info!(
        "Game {}/{}: {} {}-{} after {} moves ({:.1}s)",
        done,
        total,
        outcome,
        game.black_discs,
        game.white_discs,
        game.placed(),
        elapsed,
    );
}

/// Runs self-play generation, producing multiple game records.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Vec<GameRecord> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    });
    games.sort_by_key(|g| g.game_id);
    games
}

/// Runs self-play generation, calling `on_game` with each completed game record.
///
/// Games are delivered in completion order, which differs from ID order
/// when running in parallel.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()
        {
            Ok(pool) => run_self_play_parallel(config, &pool, on_game),
            Err(e) => {
                warn!("falling back to sequential self-play: {}", e);
                run_self_play_sequential(config, on_game);
            }
        }
    } else {
        run_self_play_sequential(config, on_game);
    }
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let mut rng = seeded_rng(config.seed, i);
        let game_start = Instant::now();
        let game = play_game(config, i, &mut rng);
        if !config.quiet {
            log_game(&game, i + 1, config.num_games, game_start.elapsed().as_secs_f64());
        }
        on_game(game);
    }
}

/// Parallel self-play: plays games concurrently on `pool`.
/// Uses a channel to deliver completed games to the callback from worker threads.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, pool: &rayon::ThreadPool, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    std::thread::scope(|s| {
        let completed = &completed;
        s.spawn(move || {
            pool.install(|| {
                (0..config.num_games)
                    .into_par_iter()
                    .for_each_with(tx, |tx, i| {
                        let mut rng = seeded_rng(config.seed, i);
                        let game_start = Instant::now();
                        let game = play_game(config, i, &mut rng);
                        if !config.quiet {
                            let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                            log_game(&game, n, config.num_games, game_start.elapsed().as_secs_f64());
                        }
                        if let Err(e) = tx.send(game) {
                            warn!("dropping game {}: results receiver closed", e.0.game_id);
                        }
                    });
            });
        });

        // Receive completed games on this thread and pass to callback.
        for game in rx {
            on_game(game);
        }
    });
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Prints a summary of self-play results to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let total = games.len();
    let mut black_wins = 0usize;
    let mut white_wins = 0usize;
    let mut draws = 0usize;
    let mut total_moves = 0usize;
    let mut total_margin = 0i64;
    let mut total_nodes = 0u64;

    for game in games {
        match game.winner {
            Some(Color::Black) => black_wins += 1,
            Some(Color::White) => white_wins += 1,
            None => draws += 1,
        }
        total_moves += game.placed();
        total_margin += game.black_discs as i64 - game.white_discs as i64;
        total_nodes += game.moves.iter().map(|m| m.nodes).sum::<u64>();
    }

    let per_game = |x: f64| x / total.max(1) as f64;
    eprintln!("=== Self-Play Summary ===");
    eprintln!("Games: {}", total);
    eprintln!("Black wins: {} ({:.1}%)", black_wins, 100.0 * per_game(black_wins as f64));
    eprintln!("White wins: {} ({:.1}%)", white_wins, 100.0 * per_game(white_wins as f64));
    eprintln!("Draws: {}", draws);
    eprintln!("Avg moves/game: {:.1}", per_game(total_moves as f64));
    eprintln!("Avg disc margin (black - white): {:+.1}", per_game(total_margin as f64));
    eprintln!("Avg nodes/game: {:.0}", per_game(total_nodes as f64));
}
