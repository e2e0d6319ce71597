use std::fmt::Display;
use std::str::FromStr;

use catlife::{patterns, RuleSet, Session, SessionConfig, SessionHandle, Topology};

const USAGE: &str =
    "Usage: catlife [rows] [cols] [bounded|toroidal] [conway|seeds] [generations] [pattern]";

/// Positional argument `index`, or `default` when absent.
fn parse_arg<T>(args: &[String], index: usize, name: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    match args.get(index) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|e| format!("invalid {name} '{raw}': {e}")),
    }
}

/// Like [`parse_arg`], but exits with the usage line on a parse error.
fn arg<T>(args: &[String], index: usize, name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    parse_arg(args, index, name, default).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        eprintln!("{USAGE}");
        std::process::exit(2);
    })
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let defaults = SessionConfig::default();

    let rows: usize = arg(&args, 1, "rows", defaults.rows);
    let cols: usize = arg(&args, 2, "cols", defaults.cols);
    let topology: Topology = arg(&args, 3, "topology", defaults.topology);
    let rule_set: RuleSet = arg(&args, 4, "rule set", defaults.rule_set);
    let generations: u64 = arg(&args, 5, "generation count", 50);
    let pattern = match args.get(6) {
        None => None,
        Some(name) => match patterns::by_name(name) {
            Some(pattern) => Some(pattern),
            None => {
                eprintln!("error: unknown pattern '{name}' (known: {})", patterns::NAMES.join(", "));
                std::process::exit(2);
            }
        },
    };

    log::info!("catlife - Conway's Game of Life / Seeds");
    log::info!("{USAGE}");
    log::info!("Patterns: {}", patterns::NAMES.join(", "));

    let config = SessionConfig {
        rows,
        cols,
        topology,
        rule_set,
        ..defaults
    };

    let mut session = match Session::new(&config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };
    if let Some(pattern) = pattern {
        if let Err(e) = session.load_pattern(&pattern, None) {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    }

    let handle = SessionHandle::spawn(session, config.tick_interval);
    let updates = handle.subscribe();
    handle.start();

    // Edits are refused while the ticker owns the board.
    if let Err(e) = handle.randomize_live_cells() {
        eprintln!("{e}");
    }

    let timeout = handle.interval() * 20;
    while let Ok(snap) = updates.recv_timeout(timeout) {
        print!("\x1b[2J\x1b[H{}", snap.board);
        println!(
            "gen {:>5} | live {:>5} | {} | {}",
            snap.generation, snap.live_cells, snap.topology, snap.rule_set
        );
        if snap.generation >= generations {
            break;
        }
    }

    handle.stop();
    let session = handle.shutdown();
    log::info!(
        "Stopped at generation {}, peak population {}",
        session.generation(),
        session.stats().peak_population()
    );
}
