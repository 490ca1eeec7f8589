use crate::error::AppError;
use crate::game::moves::Move;
use crate::game::outcome::{evaluate, Outcome};
use crate::model::history::MoveHistory;
use crate::store::BotStore;
use crate::strategy::Strategy;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTally {
    pub total_rounds: u64,
    pub wins: u64,
}

impl RoundTally {
    pub fn record(&mut self, outcome: Outcome) {
        self.total_rounds += 1;
        if outcome == Outcome::BotWins {
            self.wins += 1;
        }
    }

    /// `None` until at least one round has been scored.
    pub fn win_rate(&self) -> Option<f64> {
        if self.total_rounds == 0 {
            None
        } else {
            Some(self.wins as f64 / self.total_rounds as f64)
        }
    }
}

/// Everything a bot remembers between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BotState {
    pub history: MoveHistory,
    pub tally: RoundTally,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundReport {
    pub bot_move: Move,
    pub player_move: Move,
    pub outcome: Outcome,
}

/// One bot playing against the human: its strategy plus the state it
/// learns from.
pub struct BotSession {
    strategy: Box<dyn Strategy>,
    history: MoveHistory,
    tally: RoundTally,
    rng: StdRng,
    persistence_degraded: bool,
}

impl BotSession {
    pub fn new(strategy: Box<dyn Strategy>, state: BotState, rng: StdRng) -> Self {
        BotSession {
            strategy,
            history: state.history,
            tally: state.tally,
            rng,
            persistence_degraded: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Plays one round. Invalid input is rejected before anything changes.
    ///
    /// The bot decides from the moves played so far; the player's current
    /// move is only appended after the bot has committed.
    pub fn play_round(&mut self, raw: &str) -> Result<RoundReport, AppError> {
        let player_move: Move = raw.parse()?;

        let bot_move = self.strategy.select_move(&self.history, &mut self.rng);
        self.history.push(player_move);

        let outcome = evaluate(bot_move, player_move);
        self.tally.record(outcome);

        log::debug!(
            "{} round {}: bot {} vs player {} -> {:?} ({})",
            self.name(),
            self.tally.total_rounds,
            bot_move,
            player_move,
            outcome,
            outcome.score()
        );

        Ok(RoundReport {
            bot_move,
            player_move,
            outcome,
        })
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn tally(&self) -> RoundTally {
        self.tally
    }

    pub fn strategy(&self) -> &dyn Strategy {
        self.strategy.as_ref()
    }

    pub fn state(&self) -> BotState {
        BotState {
            history: self.history.clone(),
            tally: self.tally,
        }
    }

    /// Writes the current state. A failure flags the session as degraded
    /// and leaves in-memory state alone.
    pub fn save(&mut self, store: &BotStore) -> Result<(), AppError> {
        let result = store.save(self.name(), &self.state());
        if result.is_err() {
            self.persistence_degraded = true;
        }
        result
    }

    pub fn persistence_degraded(&self) -> bool {
        self.persistence_degraded
    }
}
