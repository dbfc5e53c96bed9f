use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Difficulty, RepositoryError};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    #[serde(rename = "WIN")]
    Win,
    #[serde(rename = "LOSE")]
    Lose,
}

/// Summary of a finished game, written once and never changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date_time: DateTime<Utc>,
    pub difficulty: Difficulty,
    pub player1: String,
    pub player2: String,
    pub result: GameResult,
    pub final_score: i32,
    pub game_length_secs: u32,
}

pub trait HistoryRepository {
    fn save(&mut self, entry: &HistoryEntry) -> Result<(), RepositoryError>;
    fn load_all(&self) -> Result<Vec<HistoryEntry>, RepositoryError>;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryHistory {
    entries: Vec<HistoryEntry>,
}

impl HistoryRepository for MemoryHistory {
    fn save(&mut self, entry: &HistoryEntry) -> Result<(), RepositoryError> {
        self.entries.push(entry.clone());
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<HistoryEntry>, RepositoryError> {
        Ok(self.entries.clone())
    }
}
