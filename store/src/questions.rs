use duosweep_core::{MemoryQuestionBank, Question, QuestionRepository, RepositoryError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::*;

/// Question bank persisted as a pretty-printed JSON array, rewritten after every edit.
#[derive(Debug)]
pub struct JsonQuestionBank {
    path: PathBuf,
    bank: MemoryQuestionBank,
}

impl JsonQuestionBank {
    /// Opens the bank at `path`. A missing file is an empty bank.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let questions: Vec<Question> = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("No question bank at {}, starting empty", path.display());
                Vec::new()
            }
            Err(err) => return Err(err.into()),
        };

        let mut bank = MemoryQuestionBank::default();
        for question in questions {
            let id = question.id;
            if let Err(err) = bank.add_question(question) {
                log::warn!("Skipping question {} from {}: {}", id, path.display(), err);
            }
        }
        Ok(Self { path, bank })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let questions = self.bank.load_questions()?;
        let text = serde_json::to_string_pretty(&questions)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Applies an edit in memory and writes the bank, undoing the edit if the write fails.
    fn edit(
        &mut self,
        apply: impl FnOnce(&mut MemoryQuestionBank) -> std::result::Result<(), RepositoryError>,
    ) -> std::result::Result<(), RepositoryError> {
        let before = self.bank.clone();
        apply(&mut self.bank)?;
        self.persist().map_err(|err| {
            log::warn!("Failed to write question bank {}: {}", self.path.display(), err);
            self.bank = before;
            RepositoryError::from(err)
        })
    }
}

impl QuestionRepository for JsonQuestionBank {
    fn load_questions(&self) -> std::result::Result<Vec<Question>, RepositoryError> {
        self.bank.load_questions()
    }

    fn add_question(&mut self, question: Question) -> std::result::Result<(), RepositoryError> {
        self.edit(|bank| bank.add_question(question))
    }

    fn update_question(&mut self, question: Question) -> std::result::Result<(), RepositoryError> {
        self.edit(|bank| bank.update_question(question))
    }

    fn delete_question(&mut self, id: u32) -> std::result::Result<(), RepositoryError> {
        self.edit(|bank| bank.delete_question(id))
    }
}
