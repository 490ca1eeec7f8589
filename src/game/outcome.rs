use super::moves::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    BotWins,
    Draw,
    PlayerWins,
}

impl Outcome {
    /// -1 if the bot won, 0 on a draw, 1 if the player won.
    pub fn score(self) -> i8 {
        match self {
            Outcome::BotWins => -1,
            Outcome::Draw => 0,
            Outcome::PlayerWins => 1,
        }
    }
}

pub fn evaluate(bot_move: Move, player_move: Move) -> Outcome {
    if bot_move == player_move {
        Outcome::Draw
    } else if bot_move.beats(player_move) {
        Outcome::BotWins
    } else {
        Outcome::PlayerWins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_moves_draw() {
        for m in Move::ALL {
            assert_eq!(evaluate(m, m), Outcome::Draw);
        }
    }

    #[test]
    fn follows_the_cycle() {
        assert_eq!(evaluate(Move::Rock, Move::Scissors), Outcome::BotWins);
        assert_eq!(evaluate(Move::Scissors, Move::Paper), Outcome::BotWins);
        assert_eq!(evaluate(Move::Paper, Move::Rock), Outcome::BotWins);
        assert_eq!(evaluate(Move::Scissors, Move::Rock), Outcome::PlayerWins);
        assert_eq!(evaluate(Move::Paper, Move::Scissors), Outcome::PlayerWins);
        assert_eq!(evaluate(Move::Rock, Move::Paper), Outcome::PlayerWins);
    }

    #[test]
    fn swapping_sides_flips_the_result() {
        for m in Move::ALL {
            let c = m.counter();
            assert_eq!(evaluate(c, m), Outcome::BotWins);
            assert_eq!(evaluate(m, c), Outcome::PlayerWins);
        }
    }

    #[test]
    fn score_convention() {
        assert_eq!(Outcome::BotWins.score(), -1);
        assert_eq!(Outcome::Draw.score(), 0);
        assert_eq!(Outcome::PlayerWins.score(), 1);
    }
}
