use crate::*;
pub use answer::*;
pub use surprise::*;

mod answer;
mod surprise;

/// Net effect of an activation after the lives cap has been applied.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Settlement {
    pub score_delta: i32,
    pub lives_delta: i32,
    pub converted_lives: i32,
}

/// Applies raw point and life changes to the shared pools and settles the overflow above the lives cap.
pub(crate) fn settle(
    rules: &Rules,
    difficulty: Difficulty,
    score: i32,
    lives: i32,
    points: i32,
    life_change: i32,
) -> Settlement {
    let (new_lives, new_score, converted_lives) =
        rules.cap_lives(difficulty, lives + life_change, score + points);
    Settlement {
        score_delta: new_score - score,
        lives_delta: new_lives - lives,
        converted_lives,
    }
}
