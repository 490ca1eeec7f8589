use super::Strategy;
use crate::game::moves::Move;
use crate::model::history::MoveHistory;
use rand::RngCore;

/// Baseline opponent that ignores the player entirely.
pub struct RandomBot;

impl RandomBot {
    pub const NAME: &'static str = "RandomBot";
}

impl Strategy for RandomBot {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn select_move(&mut self, _history: &MoveHistory, rng: &mut dyn RngCore) -> Move {
        Move::random(rng)
    }
}
