use duosweep_core::{HistoryEntry, HistoryRepository, RepositoryError};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::*;

/// Game history kept as one JSON object per line, appended as games finish.
#[derive(Clone, Debug)]
pub struct JsonHistoryLog {
    path: PathBuf,
}

impl JsonHistoryLog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, entry: &HistoryEntry) -> Result<()> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Reads every entry, oldest first. Unreadable lines are skipped.
    pub fn read_all(&self) -> Result<Vec<HistoryEntry>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let entries = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(number, line)| match serde_json::from_str(line) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    log::warn!(
                        "Skipping line {} of {}: {}",
                        number + 1,
                        self.path.display(),
                        err
                    );
                    None
                }
            })
            .collect();
        Ok(entries)
    }
}

impl HistoryRepository for JsonHistoryLog {
    fn save(&mut self, entry: &HistoryEntry) -> std::result::Result<(), RepositoryError> {
        self.append(entry).map_err(RepositoryError::from)
    }

    fn load_all(&self) -> std::result::Result<Vec<HistoryEntry>, RepositoryError> {
        self.read_all().map_err(RepositoryError::from)
    }
}
