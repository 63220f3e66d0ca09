//! ym: terminal front end for Yahtzee Mini.
//!
//! Subcommands:
//! - play
//! - sim
//! - top

mod play;
mod render;

use std::env;
use std::io;
use std::path::PathBuf;
use std::process;

use ym_core::autoplay;
use ym_core::config::ChanceKind;
use ym_core::leaderboard::{JsonFileStore, ScoreStore};
use ym_core::{Config, GameSession, HoldPolicy};
use ym_logging::NdjsonWriter;

fn print_help() {
    eprintln!(
        r#"ym - Yahtzee Mini

USAGE:
    ym <COMMAND> [OPTIONS]

COMMANDS:
    play        Play a game in the terminal
    sim         Autoplay games with the hint heuristics and summarize scores
    top         Print the leaderboard

OPTIONS:
    -h, --help          Print this help message
    -V, --version       Print version

Run `ym <COMMAND> --help` for command options.
"#
    );
}

fn print_version() {
    println!("ym {}", env!("CARGO_PKG_VERSION"));
}

fn value_of<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i + 1) {
        Some(v) => v,
        None => {
            eprintln!("Missing value for {}", flag);
            process::exit(1);
        }
    }
}

fn parse_or_exit<T: std::str::FromStr>(raw: &str, flag: &str) -> T {
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Invalid {} value: {}", flag, raw);
        process::exit(1);
    })
}

fn load_config(path: Option<&str>) -> Config {
    match path {
        None => Config::default(),
        Some(p) => Config::load(p).unwrap_or_else(|e| {
            eprintln!("Failed to load config {}: {}", p, e);
            process::exit(1);
        }),
    }
}

fn parse_hold_policy(raw: &str) -> HoldPolicy {
    match raw {
        "while_rolls_remain" => HoldPolicy::WhileRollsRemain,
        "until_game_over" => HoldPolicy::UntilGameOver,
        other => {
            eprintln!(
                "Invalid --hold-policy value: {} (expected while_rolls_remain|until_game_over)",
                other
            );
            process::exit(1);
        }
    }
}

fn cmd_play(args: &[String]) {
    let mut config_path: Option<String> = None;
    let mut seed: Option<u64> = None;
    let mut deterministic = false;
    let mut name: Option<String> = None;
    let mut events: Option<PathBuf> = None;
    let mut leaderboard: Option<PathBuf> = None;
    let mut hold_policy: Option<HoldPolicy> = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"ym play

USAGE:
    ym play [--config PATH] [--seed S] [--deterministic] [--name NAME]
            [--events PATH] [--leaderboard PATH] [--hold-policy POLICY]

OPTIONS:
    --config PATH         YAML config (default: built-in defaults)
    --seed S              Dice seed (default: config, else OS randomness)
    --deterministic       Event-keyed dice: same seed, same game
    --name NAME           Leaderboard name (default: $USER or "player")
    --events PATH         Append NDJSON session events to PATH
    --leaderboard PATH    Leaderboard JSON file
    --hold-policy POLICY  while_rolls_remain | until_game_over
"#
                );
                return;
            }
            "--config" => {
                config_path = Some(value_of(args, i, "--config").to_string());
                i += 2;
            }
            "--seed" => {
                seed = Some(parse_or_exit(value_of(args, i, "--seed"), "--seed"));
                i += 2;
            }
            "--deterministic" => {
                deterministic = true;
                i += 1;
            }
            "--name" => {
                name = Some(value_of(args, i, "--name").to_string());
                i += 2;
            }
            "--events" => {
                events = Some(PathBuf::from(value_of(args, i, "--events")));
                i += 2;
            }
            "--leaderboard" => {
                leaderboard = Some(PathBuf::from(value_of(args, i, "--leaderboard")));
                i += 2;
            }
            "--hold-policy" => {
                hold_policy = Some(parse_hold_policy(value_of(args, i, "--hold-policy")));
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `ym play`: {}", other);
                eprintln!("Run `ym play --help` for usage.");
                process::exit(1);
            }
        }
    }

    let mut cfg = load_config(config_path.as_deref());
    if seed.is_some() {
        cfg.chance.seed = seed;
    }
    if deterministic {
        cfg.chance.mode = ChanceKind::Deterministic;
    }
    if let Some(p) = hold_policy {
        cfg.rules.hold_policy = p;
    }
    if let Some(p) = leaderboard {
        cfg.leaderboard.path = p;
    }
    if events.is_some() {
        cfg.logging.events_path = events;
    }

    let writer = cfg.logging.events_path.as_ref().and_then(|p| {
        match NdjsonWriter::open_append_with_flush(p, cfg.logging.flush_every_lines) {
            Ok(w) => Some(w),
            Err(e) => {
                eprintln!("warning: event log disabled ({}): {}", p.display(), e);
                None
            }
        }
    });

    let player = name
        .or_else(|| env::var("USER").ok())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| "player".to_string());

    let session = GameSession::new(cfg.rules.hold_policy, cfg.chance.build());
    let opts = play::PlayOptions {
        player,
        store: Box::new(JsonFileStore::with_capacity(
            &cfg.leaderboard.path,
            cfg.leaderboard.capacity,
        )),
        capacity: cfg.leaderboard.capacity,
        events: writer,
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    if let Err(e) = play::run(stdin.lock(), &mut stdout, session, opts) {
        eprintln!("play failed: {}", e);
        process::exit(1);
    }
}

fn cmd_sim(args: &[String]) {
    let mut games: usize = 1_000;
    let mut seed: u64 = 0;
    let mut no_hist = false;
    let mut hold_policy = HoldPolicy::default();

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"ym sim

USAGE:
    ym sim [--games N] [--seed S] [--no-hist] [--hold-policy POLICY]

OPTIONS:
    --games N             Number of games to autoplay (default: 1000)
    --seed S              Base episode seed; game i uses S+i (default: 0)
    --no-hist             Skip printing histogram
    --hold-policy POLICY  while_rolls_remain | until_game_over
"#
                );
                return;
            }
            "--games" => {
                games = parse_or_exit(value_of(args, i, "--games"), "--games");
                i += 2;
            }
            "--seed" => {
                seed = parse_or_exit(value_of(args, i, "--seed"), "--seed");
                i += 2;
            }
            "--no-hist" => {
                no_hist = true;
                i += 1;
            }
            "--hold-policy" => {
                hold_policy = parse_hold_policy(value_of(args, i, "--hold-policy"));
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `ym sim`: {}", other);
                eprintln!("Run `ym sim --help` for usage.");
                process::exit(1);
            }
        }
    }

    let report = autoplay::simulate(games, seed, hold_policy);
    let s = &report.summary;

    println!("Autoplay:");
    println!("  - Games: {}", games);
    println!(
        "  - Score: mean={:.2}, median={}, std={:.2}, min={}, max={}",
        s.mean, s.median, s.std_dev, s.min, s.max
    );
    println!("  - Upper bonus rate: {:.1}%", report.upper_bonus_rate() * 100.0);
    println!(
        "  - Yahtzee bonus rate: {:.1}%",
        report.yahtzee_bonus_rate() * 100.0
    );

    if !no_hist && !report.scores.is_empty() {
        println!();
        print!("{}", autoplay::format_histogram(&report.scores, 20, 40));
    }
}

fn cmd_top(args: &[String]) {
    let mut config_path: Option<String> = None;
    let mut leaderboard: Option<PathBuf> = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"ym top

USAGE:
    ym top [--config PATH] [--leaderboard PATH]
"#
                );
                return;
            }
            "--config" => {
                config_path = Some(value_of(args, i, "--config").to_string());
                i += 2;
            }
            "--leaderboard" => {
                leaderboard = Some(PathBuf::from(value_of(args, i, "--leaderboard")));
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `ym top`: {}", other);
                eprintln!("Run `ym top --help` for usage.");
                process::exit(1);
            }
        }
    }

    let cfg = load_config(config_path.as_deref());
    let path = leaderboard.unwrap_or(cfg.leaderboard.path);
    let store = JsonFileStore::with_capacity(path, cfg.leaderboard.capacity);
    match store.load_top_scores() {
        Ok(entries) => print!("{}", render::leaderboard(&entries)),
        Err(e) => {
            eprintln!("Failed to read leaderboard {}: {}", store.path().display(), e);
            process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        process::exit(1);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => print_help(),
        "-V" | "--version" => print_version(),
        "play" => cmd_play(&args[2..]),
        "sim" => cmd_sim(&args[2..]),
        "top" => cmd_top(&args[2..]),
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Run `ym --help` for usage.");
            process::exit(1);
        }
    }
}
