use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        })
    }
}

/// Board shape and point tables tied to one difficulty level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
    pub lives: i32,
    pub surprise_cost: i32,
    pub surprise_bonus: i32,
    /// Points granted per life above the cap, and per remaining life when the game ends.
    pub points_per_life: i32,
}

impl DifficultyProfile {
    pub const EASY: Self = Self {
        rows: 9,
        cols: 9,
        mines: 10,
        lives: 10,
        surprise_cost: 5,
        surprise_bonus: 8,
        points_per_life: 5,
    };

    pub const MEDIUM: Self = Self {
        rows: 13,
        cols: 13,
        mines: 26,
        lives: 8,
        surprise_cost: 8,
        surprise_bonus: 12,
        points_per_life: 8,
    };

    pub const HARD: Self = Self {
        rows: 16,
        cols: 16,
        mines: 44,
        lives: 6,
        surprise_cost: 12,
        surprise_bonus: 16,
        points_per_life: 12,
    };

    pub fn board_config(&self) -> Result<BoardConfig> {
        BoardConfig::new((self.rows, self.cols), self.mines)
    }
}

/// Every tunable number of a game. `Rules::default()` is the standard rule set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub easy: DifficultyProfile,
    pub medium: DifficultyProfile,
    pub hard: DifficultyProfile,
    pub max_lives: i32,
    pub flag_mine_reward: i32,
    pub flag_safe_penalty: i32,
    pub reveal_scoring: RevealScoring,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            easy: DifficultyProfile::EASY,
            medium: DifficultyProfile::MEDIUM,
            hard: DifficultyProfile::HARD,
            max_lives: 10,
            flag_mine_reward: 1,
            flag_safe_penalty: 3,
            reveal_scoring: RevealScoring::EveryOpenedCell,
        }
    }
}

impl Rules {
    pub const fn profile(&self, difficulty: Difficulty) -> &DifficultyProfile {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for difficulty in Difficulty::ALL {
            self.profile(difficulty).board_config()?;
        }
        Ok(())
    }

    /// Clamps `lives` to the cap and turns the excess into points.
    ///
    /// Returns the capped lives, the adjusted score and how many lives were converted.
    pub fn cap_lives(&self, difficulty: Difficulty, lives: i32, score: i32) -> (i32, i32, i32) {
        let excess = (lives - self.max_lives).max(0);
        if excess > 0 {
            log::debug!("Converting {} lives above the cap into points", excess);
        }
        let rate = self.profile(difficulty).points_per_life;
        (lives - excess, score + excess * rate, excess)
    }
}
