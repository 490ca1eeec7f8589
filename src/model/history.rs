use crate::game::moves::Move;
use crate::model::markov::Context;
use serde::{Deserialize, Serialize};

/// Append-only record of a player's moves, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveHistory {
    moves: Vec<Move>,
}

impl MoveHistory {
    #[allow(dead_code)]
    pub fn new() -> Self {
        MoveHistory { moves: Vec::new() }
    }

    #[allow(dead_code)]
    pub fn from_moves(moves: Vec<Move>) -> Self {
        MoveHistory { moves }
    }

    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// The three most recent moves, in play order.
    pub fn last_context(&self) -> Option<Context> {
        let n = self.moves.len();
        if n < 3 {
            return None;
        }
        Some(Context([self.moves[n - 3], self.moves[n - 2], self.moves[n - 1]]))
    }
}
