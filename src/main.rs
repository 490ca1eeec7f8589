mod config;
mod display;
mod error;
mod game;
mod model;
mod session;
mod store;
mod strategy;

use anyhow::Context;
use clap::Parser;
use config::Config;
use display::output::{
    display_error, display_info, display_invalid_move, display_report, display_round, display_warning,
};
use error::AppError;
use game::moves::Move;
use rand::rngs::StdRng;
use rand::SeedableRng;
use session::{BotSession, BotState};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use store::BotStore;
use strategy::ChainPolicy;

#[derive(Parser, Debug)]
#[command(name = "RPS Markov")]
#[command(about = "Play rock-paper-scissors against bots that learn your habits", long_about = None)]
struct Args {
    /// Bots to play against (default: all of them)
    #[arg(short, long, value_delimiter = ',')]
    bots: Vec<String>,

    /// Directory holding saved histories (default: ~/.rps_markov)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Use saved chain snapshots as-is instead of rebuilding from history
    #[arg(long)]
    snapshot: bool,

    /// Ignore saved state and start every bot from scratch
    #[arg(long)]
    reset: bool,

    /// Seed for the bots' random choices
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if args.snapshot {
        config.chain_policy = ChainPolicy::Snapshot;
    }

    let store = BotStore::new(&config.data_dir);
    let names = bot_names(args.bots)?;

    let mut sessions = Vec::with_capacity(names.len());
    for (idx, name) in names.iter().enumerate() {
        sessions.push(open_session(&store, &config, name, args.reset, args.seed, idx)?);
    }

    let legend: Vec<String> = Move::ALL
        .iter()
        .map(|m| format!("{} = {}", m.token(), m))
        .collect();
    display_info(&format!(
        "Playing against {} ({}, quit to stop)",
        names.join(", "),
        legend.join(", ")
    ));

    // Whatever ends the loop, the rounds already played are saved
    let played = play_loop(io::stdin().lock(), &mut sessions, &store, &config);
    finish(&mut sessions, &store, &config);
    display_report(&sessions);
    played
}

/// Registered bots in request order, without repeats. Unknown names are
/// rejected before any file is touched.
fn bot_names(requested: Vec<String>) -> Result<Vec<String>, AppError> {
    if requested.is_empty() {
        return Ok(strategy::available().into_iter().map(String::from).collect());
    }

    let mut names: Vec<String> = Vec::with_capacity(requested.len());
    for name in requested {
        strategy::find(&name)?;
        if !names.contains(&name) {
            names.push(name);
        }
    }
    Ok(names)
}

fn open_session(
    store: &BotStore,
    config: &Config,
    name: &str,
    reset: bool,
    seed: Option<u64>,
    idx: usize,
) -> Result<BotSession, AppError> {
    let state = if reset {
        log::warn!("--reset: ignoring saved state for {}", name);
        BotState::default()
    } else {
        store.load_or_recover(name, config.on_corrupt)?
    };

    let snapshot = match config.chain_policy {
        ChainPolicy::Snapshot if !reset => store.load_snapshot_or_recover(name, config.on_corrupt)?,
        _ => None,
    };

    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(idx as u64)),
        None => StdRng::from_os_rng(),
    };

    let bot = strategy::create(name, snapshot)?;
    Ok(BotSession::new(bot, state, rng))
}

/// Reads one move per line until `quit` or end of input. Lines that are not
/// valid UTF-8 are rejected like any other bad token.
fn play_loop<R: BufRead>(
    mut input: R,
    sessions: &mut [BotSession],
    store: &BotStore,
    config: &Config,
) -> anyhow::Result<()> {
    let mut buf = Vec::new();
    loop {
        print!("> ");
        io::stdout().flush().context("failed to flush prompt")?;

        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .context("failed to read move from stdin")?;
        if read == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        let token = line.trim();
        if token == "quit" {
            break;
        }

        if let Err(e) = play_round(sessions, store, config, token) {
            match e {
                AppError::InvalidMove(_) => display_invalid_move(token),
                other => return Err(other.into()),
            }
        }
    }
    Ok(())
}

/// Feeds one move to every bot. Validation happens in the first session,
/// so an invalid token leaves every bot untouched.
fn play_round(
    sessions: &mut [BotSession],
    store: &BotStore,
    config: &Config,
    token: &str,
) -> Result<(), AppError> {
    for session in sessions.iter_mut() {
        let report = session.play_round(token)?;
        if config.save_every_round {
            save_session(store, session);
        }
        display_round(session.name(), &report);
    }
    Ok(())
}

fn finish(sessions: &mut [BotSession], store: &BotStore, config: &Config) {
    for session in sessions.iter_mut() {
        save_session(store, session);
        if config.chain_policy == ChainPolicy::Snapshot {
            if let Some(chain) = session.strategy().chain() {
                if let Err(e) = store.save_snapshot(session.name(), chain) {
                    display_warning(&e.to_string());
                }
            }
        }
    }
}

fn save_session(store: &BotStore, session: &mut BotSession) {
    if let Err(e) = session.save(store) {
        display_warning(&format!("{} history not saved: {}", session.name(), e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CorruptPolicy;

    fn scratch_config(name: &str, save_every_round: bool) -> Config {
        let dir = std::env::temp_dir().join(format!("rps_markov_main_{}_{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        Config {
            data_dir: dir,
            chain_policy: ChainPolicy::Rebuild,
            save_every_round,
            on_corrupt: CorruptPolicy::Fail,
        }
    }

    fn sessions(names: &[&str]) -> Vec<BotSession> {
        names
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let bot = strategy::create(name, None).unwrap();
                BotSession::new(bot, BotState::default(), StdRng::seed_from_u64(idx as u64))
            })
            .collect()
    }

    #[test]
    fn undecodable_line_is_skipped_and_rounds_are_kept() {
        let config = scratch_config("utf8", false);
        let store = BotStore::new(&config.data_dir);
        let mut sessions = sessions(&["RandomBot", "MarkovThreeBot"]);

        let input: &[u8] = b"r\nr\n\xff\np\nquit\n";
        play_loop(input, &mut sessions, &store, &config).unwrap();
        finish(&mut sessions, &store, &config);

        for session in &sessions {
            assert_eq!(session.tally().total_rounds, 3);
            assert_eq!(session.history().as_slice(), &[Move::Rock, Move::Rock, Move::Paper]);
            assert_eq!(store.load(session.name()).unwrap(), session.state());
        }

        let _ = std::fs::remove_dir_all(&config.data_dir);
    }

    #[test]
    fn end_of_input_without_quit_still_saves() {
        let config = scratch_config("eof", false);
        let store = BotStore::new(&config.data_dir);
        let mut sessions = sessions(&["MarkovThreeBot"]);

        let input: &[u8] = b"s\nbogus\np";
        play_loop(input, &mut sessions, &store, &config).unwrap();
        finish(&mut sessions, &store, &config);

        let saved = store.load("MarkovThreeBot").unwrap();
        assert_eq!(saved.history.as_slice(), &[Move::Scissors, Move::Paper]);
        assert_eq!(saved.tally.total_rounds, 2);

        let _ = std::fs::remove_dir_all(&config.data_dir);
    }

    #[test]
    fn bot_names_are_checked_and_deduplicated() {
        let names = bot_names(vec![
            "MarkovThreeBot".to_string(),
            "RandomBot".to_string(),
            "MarkovThreeBot".to_string(),
        ])
        .unwrap();
        assert_eq!(names, vec!["MarkovThreeBot", "RandomBot"]);

        let err = bot_names(vec!["NoSuchBot".to_string()]).unwrap_err();
        assert!(matches!(err, AppError::UnimplementedStrategy(ref n) if n == "NoSuchBot"));

        assert_eq!(bot_names(Vec::new()).unwrap(), strategy::available());
    }
}
