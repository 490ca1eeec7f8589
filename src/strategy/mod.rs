pub mod markov_three;
pub mod random;

use crate::error::AppError;
use crate::game::moves::Move;
use crate::model::history::MoveHistory;
use crate::model::markov::MarkovChain;
use rand::RngCore;

pub use markov_three::MarkovThreeBot;
pub use random::RandomBot;

/// Whether a persisted chain snapshot is used as-is or the chain is always
/// rebuilt from history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainPolicy {
    Rebuild,
    Snapshot,
}

pub trait Strategy {
    fn name(&self) -> &'static str;

    /// Picks the bot's move given the player's moves so far.
    fn select_move(&mut self, history: &MoveHistory, rng: &mut dyn RngCore) -> Move;

    /// The chain this strategy last predicted from, if it learns one.
    fn chain(&self) -> Option<&MarkovChain> {
        None
    }
}

pub struct StrategyEntry {
    pub name: &'static str,
    pub build: fn(Option<MarkovChain>) -> Box<dyn Strategy>,
}

/// Every bot the host can put in front of a player.
pub const REGISTRY: &[StrategyEntry] = &[
    StrategyEntry {
        name: RandomBot::NAME,
        build: build_random,
    },
    StrategyEntry {
        name: MarkovThreeBot::NAME,
        build: build_markov_three,
    },
];

fn build_random(_snapshot: Option<MarkovChain>) -> Box<dyn Strategy> {
    Box::new(RandomBot)
}

fn build_markov_three(snapshot: Option<MarkovChain>) -> Box<dyn Strategy> {
    Box::new(MarkovThreeBot::new(snapshot))
}

pub fn available() -> Vec<&'static str> {
    REGISTRY.iter().map(|e| e.name).collect()
}

pub fn find(name: &str) -> Result<&'static StrategyEntry, AppError> {
    REGISTRY
        .iter()
        .find(|e| e.name == name)
        .ok_or_else(|| AppError::UnimplementedStrategy(name.to_string()))
}

pub fn create(name: &str, snapshot: Option<MarkovChain>) -> Result<Box<dyn Strategy>, AppError> {
    find(name).map(|e| (e.build)(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_builds_every_entry() {
        for name in available() {
            let bot = create(name, None).unwrap();
            assert_eq!(bot.name(), name);
        }
    }

    #[test]
    fn unknown_bot_is_unimplemented() {
        let err = create("MarkovFiveBot", None).err().unwrap();
        assert!(matches!(err, AppError::UnimplementedStrategy(ref n) if n == "MarkovFiveBot"));
    }
}
