//! Reverso -- a Reversi bot for the match server.
//!
//! Connects to the server over TCP, answers every turn message with a move
//! and exits when the server ends the session.
//!
//! Usage:
//!   reverso [OPTIONS]
//!
//! Options:
//!   --host ADDR      Server address (default: 127.0.0.1)
//!   --port N         Server port (default: 14003)
//!   --config FILE    JSON engine configuration
//!   --depth N        Search depth, overrides the config file
//!   --policy P       negamax or negascout, overrides the config file
//!   --book FILE      Opening book, overrides the config file (default: opening.txt)
//!   --no-book        Play without an opening book
//!   --seed N         Random seed for book choices, 0 for entropy
//!
//! Turn messages are read line by line. The final color line may arrive
//! without a trailing newline.

use std::env;
use std::io::BufReader;
use std::net::{TcpStream, ToSocketAddrs};
use std::path::PathBuf;
use std::time::Duration;

use log::{error, info};

use reverso::config::{load_config, EngineConfig};
use reverso::driver::run_session;
use reverso::engine::Engine;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 14003;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let mut host = DEFAULT_HOST.to_string();
    let mut port = DEFAULT_PORT;
    let mut config_path: Option<PathBuf> = None;
    let mut depth: Option<u8> = None;
    let mut policy = None;
    let mut book: Option<PathBuf> = None;
    let mut no_book = false;
    let mut seed: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--host" => {
                i += 1;
                host = arg_value(&args, i, "--host");
            }
            "--port" => {
                i += 1;
                port = arg_value(&args, i, "--port");
            }
            "--config" => {
                i += 1;
                config_path = Some(arg_value(&args, i, "--config"));
            }
            "--depth" => {
                i += 1;
                depth = Some(arg_value(&args, i, "--depth"));
            }
            "--policy" => {
                i += 1;
                policy = Some(arg_value(&args, i, "--policy"));
            }
            "--book" => {
                i += 1;
                book = Some(arg_value(&args, i, "--book"));
            }
            "--no-book" => no_book = true,
            "--seed" => {
                i += 1;
                seed = Some(arg_value(&args, i, "--seed"));
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

    let mut config = match config_path {
        Some(path) => match load_config(&path) {
            Ok(c) => c,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };
    if let Some(d) = depth {
        config.depth = d;
    }
    if let Some(p) = policy {
        config.policy = p;
    }
    if book.is_some() {
        config.book_path = book;
    }
    if no_book {
        config.book_path = None;
    }
    if let Some(s) = seed {
        config.seed = s;
    }

    let stream = match connect(&host, port) {
        Ok(s) => s,
        Err(e) => {
            error!("cannot connect to {}:{}: {}", host, port, e);
            std::process::exit(1);
        }
    };
    info!(
        "connected to {}:{} ({} depth {})",
        host, port, config.policy, config.depth
    );

    let mut engine = Engine::new(config);
    let reader = match stream.try_clone() {
        Ok(s) => BufReader::new(s),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    match run_session(reader, &stream, &mut engine) {
        Ok(turns) => info!("played {} turns", turns),
        Err(e) => {
            error!("session failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Makes a single connection attempt with a timeout.
fn connect(host: &str, port: u16) -> std::io::Result<TcpStream> {
    let mut last_err = None;
    for addr in (host, port).to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_err = Some(e),
        }
    }
    Err(last_err.unwrap_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "no address resolved")
    }))
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
    eprintln!("Usage: reverso [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --host ADDR     Server address (default: 127.0.0.1)");
    eprintln!("  --port N        Server port (default: 14003)");
    eprintln!("  --config FILE   JSON engine configuration");
    eprintln!("  --depth N       Search depth, overrides the config file");
    eprintln!("  --policy P      negamax or negascout, overrides the config file");
    eprintln!("  --book FILE     Opening book, overrides the config file (default: opening.txt)");
    eprintln!("  --no-book       Play without an opening book");
    eprintln!("  --seed N        Random seed for book choices, 0 for entropy");
    eprintln!("  --help          Show this help");
    eprintln!();
    eprintln!("Turn messages are read line by line; the final color line may");
    eprintln!("arrive without a trailing newline.");
}
