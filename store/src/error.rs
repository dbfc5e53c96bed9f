use duosweep_core::{GameError, RepositoryError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Malformed rules file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid rules: {0}")]
    Rules(#[from] GameError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl From<StoreError> for RepositoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Repository(err) => err,
            other => RepositoryError::Storage(other.to_string()),
        }
    }
}
