//! Self-play game generation CLI.
//!
//! Plays Reversi games between two search players and outputs the game
//! records as JSONL.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N           Number of games to play (default: 10)
//!   --black-depth N     Search depth for black (default: 4)
//!   --white-depth N     Search depth for white (default: 4)
//!   --black-policy P    negamax or negascout for black (default: negascout)
//!   --white-policy P    negamax or negascout for white (default: negascout)
//!   --targets N         Target squares drawn per game (default: 3)
//!   --threads N         Number of parallel threads (default: 4)
//!   --seed N            Random seed, 0 for entropy (default: 0)
//!   --output FILE       Output file path (default: stdout)
//!   --quiet             Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::time::Instant;

use reverso::selfplay::{self, SelfPlayConfig};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut output_path: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = arg_value(&args, i, "--games");
            }
            "--black-depth" => {
                i += 1;
                config.black.depth = arg_value(&args, i, "--black-depth");
            }
            "--white-depth" => {
                i += 1;
                config.white.depth = arg_value(&args, i, "--white-depth");
            }
            "--black-policy" => {
                i += 1;
                config.black.policy = arg_value(&args, i, "--black-policy");
            }
            "--white-policy" => {
                i += 1;
                config.white.policy = arg_value(&args, i, "--white-policy");
            }
            "--targets" => {
                i += 1;
                config.target_count = arg_value(&args, i, "--targets");
            }
            "--threads" => {
                i += 1;
                config.threads = arg_value(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = arg_value(&args, i, "--seed");
            }
            "--output" => {
                i += 1;
                output_path = Some(arg_value(&args, i, "--output"));
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    config.quiet = quiet;

    if !quiet {
        eprintln!(
            "Self-play: {} games, black {} depth {}, white {} depth {}, {} targets, {} threads",
            config.num_games,
            config.black.policy,
            config.black.depth,
            config.white.policy,
            config.white.depth,
            config.target_count,
            config.threads
        );
    }

    let start = Instant::now();
    let games = selfplay::run_self_play(&config);
    let elapsed = start.elapsed();

    if !quiet {
        eprintln!(
            "Completed {} games in {:.1}s ({:.1} games/hour)",
            games.len(),
            elapsed.as_secs_f64(),
            games.len() as f64 / elapsed.as_secs_f64().max(1e-9) * 3600.0
        );
        selfplay::print_summary(&games);
    }

    // Write output.
    let result = match &output_path {
        Some(path) => File::create(path)
            .and_then(|file| selfplay::write_jsonl(&games, &mut BufWriter::new(file))),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)
        }
    };
    match (result, output_path) {
        (Err(e), _) => {
            eprintln!("failed to write output: {}", e);
            std::process::exit(1);
        }
        (Ok(()), Some(path)) if !quiet => eprintln!("Wrote {} games to {}", games.len(), path),
        _ => {}
    }
}

/// Parses the value following a flag, exiting with usage on error.
fn arg_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|v| v.parse()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("invalid {} value", flag);
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N         Number of games to play (default: 10)");
    eprintln!("  --black-depth N   Search depth for black (default: 4)");
    eprintln!("  --white-depth N   Search depth for white (default: 4)");
    eprintln!("  --black-policy P  negamax or negascout for black (default: negascout)");
    eprintln!("  --white-policy P  negamax or negascout for white (default: negascout)");
    eprintln!("  --targets N       Target squares drawn per game (default: 3)");
    eprintln!("  --threads N       Number of parallel threads (default: 4)");
    eprintln!("  --seed N          Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE     Output file path (default: stdout)");
    eprintln!("  --quiet           Suppress progress and summary output");
    eprintln!("  --help            Show this help");
}
