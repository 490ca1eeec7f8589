use crate::game::moves::Move;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Three consecutive player moves, used as the chain lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Context(pub [Move; 3]);

/// How often each move followed a given context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCounts {
    pub rock: u32,
    pub paper: u32,
    pub scissors: u32,
    /// The move that followed the context most recently in the history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest: Option<Move>,
}

impl MoveCounts {
    pub fn get(&self, mv: Move) -> u32 {
        match mv {
            Move::Rock => self.rock,
            Move::Paper => self.paper,
            Move::Scissors => self.scissors,
        }
    }

    pub fn record(&mut self, mv: Move) {
        match mv {
            Move::Rock => self.rock += 1,
            Move::Paper => self.paper += 1,
            Move::Scissors => self.scissors += 1,
        }
        self.latest = Some(mv);
    }

    pub fn total(&self) -> u32 {
        self.rock + self.paper + self.scissors
    }
}

/// On-disk form of one chain entry.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChainEntry {
    pub context: Context,
    pub counts: MoveCounts,
}

/// Frequency table from every observed context to the moves that followed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ChainEntry>", into = "Vec<ChainEntry>")]
pub struct MarkovChain {
    table: HashMap<Context, MoveCounts>,
}

impl MarkovChain {
    /// Scans every 4-move window of `moves`: the first three form the
    /// context and the fourth is counted as its follower.
    pub fn build(moves: &[Move]) -> Self {
        let mut table: HashMap<Context, MoveCounts> = HashMap::new();

        for window in moves.windows(4) {
            let context = Context([window[0], window[1], window[2]]);
            table.entry(context).or_default().record(window[3]);
        }

        MarkovChain { table }
    }

    pub fn get(&self, context: &Context) -> Option<&MoveCounts> {
        self.table.get(context)
    }

    /// Number of distinct contexts.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Total follower observations across all contexts.
    pub fn observations(&self) -> u32 {
        self.table.values().map(MoveCounts::total).sum()
    }
}

impl From<Vec<ChainEntry>> for MarkovChain {
    fn from(entries: Vec<ChainEntry>) -> Self {
        MarkovChain {
            table: entries.into_iter().map(|e| (e.context, e.counts)).collect(),
        }
    }
}

impl From<MarkovChain> for Vec<ChainEntry> {
    fn from(chain: MarkovChain) -> Self {
        let mut entries: Vec<ChainEntry> = chain
            .table
            .into_iter()
            .map(|(context, counts)| ChainEntry { context, counts })
            .collect();
        // Stable on-disk order
        entries.sort_by(|a, b| a.context.cmp(&b.context));
        entries
    }
}
