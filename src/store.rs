use crate::error::AppError;
use crate::model::history::MoveHistory;
use crate::model::markov::MarkovChain;
use crate::session::{BotState, RoundTally};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
pub struct StoredBot {
    pub bot: String,
    pub moves: MoveHistory,
    pub total_rounds: u64,
    pub wins: u64,
    pub updated_at: DateTime<Utc>,
}

/// What to do when a saved file exists but cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorruptPolicy {
    Fail,
    Empty,
}

const RECOVERY_HINT: &str = "rerun with --reset or set RPS_ON_CORRUPT=empty";

/// Per-bot JSON files under one data directory.
#[derive(Debug, Clone)]
pub struct BotStore {
    dir: PathBuf,
}

impl BotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        BotStore { dir: dir.into() }
    }

    pub fn history_path(&self, bot: &str) -> PathBuf {
        self.dir.join(format!("{}.json", bot))
    }

    pub fn snapshot_path(&self, bot: &str) -> PathBuf {
        self.dir.join(format!("{}_markov.json", bot))
    }

    /// A bot that has never been saved starts empty. A file that exists but
    /// cannot be read or parsed is an error.
    pub fn load(&self, bot: &str) -> Result<BotState, AppError> {
        let path = self.history_path(bot);
        let stored: Option<StoredBot> = read_json(&path)?;

        match stored {
            Some(stored) => {
                log::info!("loaded {} moves for {} from {}", stored.moves.len(), bot, path.display());
                Ok(BotState {
                    history: stored.moves,
                    tally: RoundTally {
                        total_rounds: stored.total_rounds,
                        wins: stored.wins,
                    },
                })
            }
            None => {
                log::info!("no saved state for {}, starting empty", bot);
                Ok(BotState::default())
            }
        }
    }

    /// Like `load`, but an unreadable file either fails with a recovery hint
    /// or is replaced by empty state with a warning.
    pub fn load_or_recover(&self, bot: &str, policy: CorruptPolicy) -> Result<BotState, AppError> {
        recover(self.load(bot), bot, policy)
    }

    pub fn save(&self, bot: &str, state: &BotState) -> Result<(), AppError> {
        let stored = StoredBot {
            bot: bot.to_string(),
            moves: state.history.clone(),
            total_rounds: state.tally.total_rounds,
            wins: state.tally.wins,
            updated_at: Utc::now(),
        };
        self.write_json(&self.history_path(bot), &stored)
    }

    pub fn load_snapshot(&self, bot: &str) -> Result<Option<MarkovChain>, AppError> {
        let chain: Option<MarkovChain> = read_json(&self.snapshot_path(bot))?;
        if let Some(ref chain) = chain {
            log::info!(
                "using chain snapshot for {} ({} contexts, {} observations)",
                bot,
                chain.len(),
                chain.observations()
            );
        }
        Ok(chain)
    }

    pub fn load_snapshot_or_recover(
        &self,
        bot: &str,
        policy: CorruptPolicy,
    ) -> Result<Option<MarkovChain>, AppError> {
        recover(self.load_snapshot(bot), bot, policy)
    }

    pub fn save_snapshot(&self, bot: &str, chain: &MarkovChain) -> Result<(), AppError> {
        self.write_json(&self.snapshot_path(bot), chain)
    }

    /// Writes to a sibling temp file and renames it over `path`, so readers
    /// see either the old file or the new one.
    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            AppError::Persistence(format!("Failed to create {}: {}", self.dir.display(), e))
        })?;

        let json = serde_json::to_string_pretty(value)
            .map_err(|e| AppError::JsonError(format!("Failed to serialize {}: {}", path.display(), e)))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .map_err(|e| AppError::Persistence(format!("Failed to write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, path)
            .map_err(|e| AppError::Persistence(format!("Failed to replace {}: {}", path.display(), e)))?;

        log::info!("saved {}", path.display());
        Ok(())
    }
}

fn recover<T: Default>(loaded: Result<T, AppError>, bot: &str, policy: CorruptPolicy) -> Result<T, AppError> {
    match (loaded, policy) {
        (Ok(value), _) => Ok(value),
        (Err(AppError::Persistence(msg)), CorruptPolicy::Empty) => {
            log::warn!("{}; starting {} from scratch", msg, bot);
            Ok(T::default())
        }
        (Err(AppError::Persistence(msg)), CorruptPolicy::Fail) => {
            Err(AppError::Persistence(format!("{} ({})", msg, RECOVERY_HINT)))
        }
        (Err(other), _) => Err(other),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, AppError> {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| AppError::Persistence(format!("Failed to parse {}: {}", path.display(), e))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AppError::Persistence(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}
