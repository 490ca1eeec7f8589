use crate::error::AppError;
use crate::store::CorruptPolicy;
use crate::strategy::ChainPolicy;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub chain_policy: ChainPolicy,
    pub save_every_round: bool,
    pub on_corrupt: CorruptPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let data_dir = match env::var("RPS_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => default_data_dir(),
        };

        let chain_policy = match env::var("RPS_CHAIN_POLICY") {
            Ok(value) => parse_chain_policy(&value)?,
            Err(_) => ChainPolicy::Rebuild,
        };

        let save_every_round = match env::var("RPS_SAVE_EVERY_ROUND") {
            Ok(value) => parse_bool("RPS_SAVE_EVERY_ROUND", &value)?,
            Err(_) => true,
        };

        let on_corrupt = match env::var("RPS_ON_CORRUPT") {
            Ok(value) => parse_corrupt_policy(&value)?,
            Err(_) => CorruptPolicy::Fail,
        };

        Ok(Config {
            data_dir,
            chain_policy,
            save_every_round,
            on_corrupt,
        })
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rps_markov")
}

fn parse_chain_policy(value: &str) -> Result<ChainPolicy, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "rebuild" => Ok(ChainPolicy::Rebuild),
        "snapshot" => Ok(ChainPolicy::Snapshot),
        other => Err(AppError::ConfigError(format!(
            "RPS_CHAIN_POLICY must be 'rebuild' or 'snapshot', got '{}'",
            other
        ))),
    }
}

fn parse_corrupt_policy(value: &str) -> Result<CorruptPolicy, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "fail" => Ok(CorruptPolicy::Fail),
        "empty" => Ok(CorruptPolicy::Empty),
        other => Err(AppError::ConfigError(format!(
            "RPS_ON_CORRUPT must be 'fail' or 'empty', got '{}'",
            other
        ))),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(AppError::ConfigError(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}
