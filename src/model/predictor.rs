use crate::game::moves::Move;
use crate::model::markov::{Context, MarkovChain, MoveCounts};
use rand::Rng;

/// Minimum number of recorded moves before the chain is consulted.
pub const MIN_HISTORY: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    /// The chain knew the context: `expected` is the player's most likely
    /// next move and `counter` the move that beats it.
    Learned { expected: Move, counter: Move },
    /// Not enough signal, a uniformly random move.
    Fallback(Move),
}

impl Prediction {
    pub fn bot_move(&self) -> Move {
        match *self {
            Prediction::Learned { counter, .. } => counter,
            Prediction::Fallback(mv) => mv,
        }
    }

    #[cfg(test)]
    pub fn is_learned(&self) -> bool {
        matches!(self, Prediction::Learned { .. })
    }
}

pub fn predict<R: Rng + ?Sized>(
    chain: &MarkovChain,
    context: Option<&Context>,
    history_len: usize,
    rng: &mut R,
) -> Prediction {
    if history_len < MIN_HISTORY {
        return Prediction::Fallback(Move::random(rng));
    }

    match context.and_then(|c| chain.get(c)) {
        Some(counts) => {
            let expected = most_likely(counts);
            Prediction::Learned {
                expected,
                counter: expected.counter(),
            }
        }
        None => Prediction::Fallback(Move::random(rng)),
    }
}

/// Arg-max over the three counts. Ties go to the move that followed the
/// context most recently, or to the earliest of Rock, Paper, Scissors when
/// that is unknown.
pub fn most_likely(counts: &MoveCounts) -> Move {
    let best = Move::ALL.iter().map(|&m| counts.get(m)).max().unwrap_or(0);

    if let Some(latest) = counts.latest {
        if counts.get(latest) == best {
            return latest;
        }
    }

    Move::ALL
        .into_iter()
        .find(|&m| counts.get(m) == best)
        .unwrap_or(Move::Rock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use Move::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn short_history_falls_back() {
        let chain = MarkovChain::build(&[Rock, Rock, Rock, Rock]);
        let ctx = Context([Rock, Rock, Rock]);
        let prediction = predict(&chain, Some(&ctx), 3, &mut rng());
        assert!(!prediction.is_learned());
    }

    #[test]
    fn unseen_context_falls_back() {
        let chain = MarkovChain::build(&[Rock, Rock, Rock, Rock]);
        let ctx = Context([Paper, Paper, Paper]);
        assert!(!predict(&chain, Some(&ctx), 10, &mut rng()).is_learned());
        assert!(!predict(&chain, None, 10, &mut rng()).is_learned());
    }

    #[test]
    fn counters_the_dominant_follower() {
        let history = [Rock, Paper, Scissors, Rock, Paper, Scissors, Rock];
        let chain = MarkovChain::build(&history);
        let ctx = Context([Rock, Paper, Scissors]);

        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            let prediction = predict(&chain, Some(&ctx), history.len(), &mut rng);
            assert_eq!(
                prediction,
                Prediction::Learned {
                    expected: Rock,
                    counter: Paper
                }
            );
        }
    }

    #[test]
    fn strict_max_wins() {
        let counts = MoveCounts {
            rock: 1,
            paper: 0,
            scissors: 3,
            latest: Some(Rock),
        };
        assert_eq!(most_likely(&counts), Scissors);
    }

    #[test]
    fn tie_goes_to_latest_follower() {
        let counts = MoveCounts {
            rock: 2,
            paper: 2,
            scissors: 0,
            latest: Some(Paper),
        };
        assert_eq!(most_likely(&counts), Paper);
    }

    #[test]
    fn tie_without_latest_uses_enumeration_order() {
        let counts = MoveCounts {
            rock: 0,
            paper: 2,
            scissors: 2,
            latest: None,
        };
        assert_eq!(most_likely(&counts), Paper);
    }
}
