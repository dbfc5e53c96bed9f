use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Too many mines, at least one safe cell is required")]
    TooManyMines,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Game is still in progress")]
    StillActive,
    #[error("It is not this player's turn")]
    NotYourTurn,
    #[error("Cell is already open")]
    CellNotClosed,
    #[error("Cell is not a surprise or question cell")]
    NotSpecialCell,
    #[error("Special cell has not been discovered yet")]
    NotDiscovered,
    #[error("Special cell was already activated")]
    AlreadyActivated,
    #[error("Special cell is of a different kind")]
    WrongSpecialKind,
}

impl GameError {
    /// Configuration errors are fatal for session creation, all others only reject a single action.
    pub const fn is_configuration(self) -> bool {
        matches!(self, Self::EmptyBoard | Self::TooManyMines)
    }
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failure signal reported by question and history repositories.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("No entry with id {0}")]
    NotFound(u32),
    #[error("Entry with id {0} already exists")]
    DuplicateId(u32),
    #[error("Invalid question: {0}")]
    InvalidQuestion(&'static str),
    #[error("Storage failure: {0}")]
    Storage(String),
}
