use super::Strategy;
use crate::game::moves::Move;
use crate::model::history::MoveHistory;
use crate::model::markov::MarkovChain;
use crate::model::predictor::{predict, Prediction, MIN_HISTORY};
use rand::RngCore;

/// Predicts the player's next move from their last three and plays the
/// move that beats it.
pub struct MarkovThreeBot {
    snapshot: Option<MarkovChain>,
    chain: Option<MarkovChain>,
}

impl MarkovThreeBot {
    pub const NAME: &'static str = "MarkovThreeBot";

    /// With a snapshot the chain is never rebuilt from history.
    pub fn new(snapshot: Option<MarkovChain>) -> Self {
        MarkovThreeBot {
            snapshot,
            chain: None,
        }
    }
}

impl Strategy for MarkovThreeBot {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn select_move(&mut self, history: &MoveHistory, rng: &mut dyn RngCore) -> Move {
        if self.snapshot.is_none() && history.len() >= MIN_HISTORY {
            self.chain = Some(MarkovChain::build(history.as_slice()));
        }

        let empty = MarkovChain::default();
        let chain = self
            .snapshot
            .as_ref()
            .or(self.chain.as_ref())
            .unwrap_or(&empty);
        let context = history.last_context();
        let prediction = predict(chain, context.as_ref(), history.len(), rng);

        match prediction {
            Prediction::Learned { expected, counter } => {
                log::debug!("{}: expecting {}, playing {}", Self::NAME, expected, counter)
            }
            Prediction::Fallback(mv) => log::debug!("{}: no signal, playing {}", Self::NAME, mv),
        }

        prediction.bot_move()
    }

    fn chain(&self) -> Option<&MarkovChain> {
        self.snapshot.as_ref().or(self.chain.as_ref())
    }
}
