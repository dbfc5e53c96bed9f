use rand::Rng;
use serde::{Deserialize, Serialize};

use super::*;

/// Extra effect granted by some correct answers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusAction {
    /// Flag one unflagged mine of the player's board.
    MineGift,
    /// Open the safe cells of a 3×3 area of the player's board.
    RevealArea3x3,
}

/// Raw point and life change before the lives cap.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Reward {
    pub points: i32,
    pub lives: i32,
}

const fn reward(points: i32, lives: i32) -> Reward {
    Reward { points, lives }
}

const NOTHING: Reward = reward(0, 0);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Penalty {
    Fixed(Reward),
    /// Either outcome with equal chance.
    CoinFlip(Reward, Reward),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QuestionRule {
    pub correct: Reward,
    pub bonus: Option<BonusAction>,
    pub incorrect: Penalty,
}

/// Outcome table keyed by game difficulty and question level.
///
/// Only the hard game / expert question reward (+40 points, +3 lives) is a fixed product value. Every other entry
/// is tuned so correct rewards grow along both axes, and may be rebalanced as long as that holds.
pub const fn question_rule(difficulty: Difficulty, level: QuestionLevel) -> QuestionRule {
    use BonusAction::*;
    use crate::Difficulty as G;
    use Penalty::*;
    use crate::QuestionLevel as Q;

    let (correct, bonus, incorrect) = match (difficulty, level) {
        (G::Easy, Q::Easy) => (reward(3, 1), None, CoinFlip(reward(-3, 0), NOTHING)),
        (G::Easy, Q::Intermediate) => (reward(6, 0), Some(MineGift), CoinFlip(reward(-6, 0), NOTHING)),
        (G::Easy, Q::Hard) => (reward(10, 0), Some(RevealArea3x3), Fixed(reward(-10, 0))),
        (G::Easy, Q::Expert) => (reward(15, 2), None, Fixed(reward(-15, -1))),
        (G::Medium, Q::Easy) => (reward(8, 1), None, Fixed(reward(-8, 0))),
        (G::Medium, Q::Intermediate) => (reward(10, 1), None, CoinFlip(reward(-10, -1), NOTHING)),
        (G::Medium, Q::Hard) => (reward(15, 1), None, Fixed(reward(-15, -1))),
        (G::Medium, Q::Expert) => (reward(20, 2), None, CoinFlip(reward(-20, -1), reward(-20, -2))),
        (G::Hard, Q::Easy) => (reward(10, 1), None, Fixed(reward(-10, -1))),
        (G::Hard, Q::Intermediate) => (reward(15, 2), None, CoinFlip(reward(-15, -1), NOTHING)),
        (G::Hard, Q::Hard) => (reward(20, 2), None, Fixed(reward(-20, -2))),
        (G::Hard, Q::Expert) => (reward(40, 3), None, Fixed(reward(-40, -3))),
    };
    QuestionRule {
        correct,
        bonus,
        incorrect,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub correct: bool,
    pub score_delta: i32,
    pub lives_delta: i32,
    pub converted_lives: i32,
    /// Granted only on correct answers, carried out by the session.
    pub bonus: Option<BonusAction>,
    pub message: String,
}

/// Looks up the outcome of an answered question. Some wrong answers roll `rng` for their penalty.
pub fn process_question<R: Rng + ?Sized>(
    rules: &Rules,
    difficulty: Difficulty,
    level: QuestionLevel,
    correct: bool,
    score: i32,
    lives: i32,
    rng: &mut R,
) -> QuestionOutcome {
    let rule = question_rule(difficulty, level);
    let (change, bonus) = if correct {
        (rule.correct, rule.bonus)
    } else {
        let penalty = match rule.incorrect {
            Penalty::Fixed(penalty) => penalty,
            Penalty::CoinFlip(heads, tails) => {
                if rng.random_bool(0.5) {
                    heads
                } else {
                    tails
                }
            }
        };
        (penalty, None)
    };

    let settled = settle(rules, difficulty, score, lives, change.points, change.lives);
    let message = match (correct, change == NOTHING) {
        (true, _) => format!(
            "Correct! {:+} points, {:+} lives",
            change.points, change.lives
        ),
        (false, true) => "Wrong answer, but no penalty this time".into(),
        (false, false) => format!(
            "Wrong answer! {:+} points, {:+} lives",
            change.points, change.lives
        ),
    };
    log::debug!(
        "{} question on {} difficulty answered: {}",
        level,
        difficulty,
        message
    );

    QuestionOutcome {
        correct,
        score_delta: settled.score_delta,
        lives_delta: settled.lives_delta,
        converted_lives: settled.converted_lives,
        bonus,
        message,
    }
}
