use core::fmt;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::RepositoryError;

/// Trivia difficulty, independent of the game difficulty.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionLevel {
    Easy,
    Intermediate,
    Hard,
    Expert,
}

impl fmt::Display for QuestionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Easy => "Easy",
            Self::Intermediate => "Intermediate",
            Self::Hard => "Hard",
            Self::Expert => "Expert",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub options: [String; 4],
    pub correct_index: u8,
    pub level: QuestionLevel,
}

impl Question {
    pub fn validate(&self) -> Result<(), RepositoryError> {
        if self.text.trim().is_empty() {
            return Err(RepositoryError::InvalidQuestion("empty question text"));
        }
        if self.options.iter().any(|option| option.trim().is_empty()) {
            return Err(RepositoryError::InvalidQuestion("empty answer option"));
        }
        if usize::from(self.correct_index) >= self.options.len() {
            return Err(RepositoryError::InvalidQuestion("correct index out of range"));
        }
        Ok(())
    }

    pub fn is_correct(&self, answer: u8) -> bool {
        answer == self.correct_index
    }
}

/// Source of trivia questions. The engine only reads, editing is for the question management screens.
pub trait QuestionRepository {
    fn load_questions(&self) -> Result<Vec<Question>, RepositoryError>;
    fn add_question(&mut self, question: Question) -> Result<(), RepositoryError>;
    fn update_question(&mut self, question: Question) -> Result<(), RepositoryError>;
    fn delete_question(&mut self, id: u32) -> Result<(), RepositoryError>;
}

pub fn pick_random<'a, R: Rng + ?Sized>(questions: &'a [Question], rng: &mut R) -> Option<&'a Question> {
    let picked = questions.choose(rng);
    if picked.is_none() {
        log::warn!("Question bank is empty");
    }
    picked
}

/// Question bank kept in memory, ordered by insertion.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryQuestionBank {
    questions: Vec<Question>,
}

impl MemoryQuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn into_inner(self) -> Vec<Question> {
        self.questions
    }

    fn position(&self, id: u32) -> Result<usize, RepositoryError> {
        self.questions
            .iter()
            .position(|question| question.id == id)
            .ok_or(RepositoryError::NotFound(id))
    }
}

impl QuestionRepository for MemoryQuestionBank {
    fn load_questions(&self) -> Result<Vec<Question>, RepositoryError> {
        Ok(self.questions.clone())
    }

    fn add_question(&mut self, question: Question) -> Result<(), RepositoryError> {
        question.validate()?;
        if self.position(question.id).is_ok() {
            return Err(RepositoryError::DuplicateId(question.id));
        }
        self.questions.push(question);
        Ok(())
    }

    fn update_question(&mut self, question: Question) -> Result<(), RepositoryError> {
        question.validate()?;
        let index = self.position(question.id)?;
        self.questions[index] = question;
        Ok(())
    }

    fn delete_question(&mut self, id: u32) -> Result<(), RepositoryError> {
        let index = self.position(id)?;
        self.questions.remove(index);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample_question(id: u32, level: QuestionLevel) -> Question {
    Question {
        id,
        text: format!("Question {id}?"),
        options: ["a".into(), "b".into(), "c".into(), "d".into()],
        correct_index: 2,
        level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn validation_rejects_bad_questions() {
        let mut question = sample_question(1, QuestionLevel::Easy);
        question.correct_index = 4;
        assert!(question.validate().is_err());

        let mut question = sample_question(1, QuestionLevel::Easy);
        question.options[3] = " ".into();
        assert!(question.validate().is_err());

        assert!(sample_question(1, QuestionLevel::Easy).validate().is_ok());
    }

    #[test]
    fn bank_supports_crud() {
        let mut bank = MemoryQuestionBank::default();
        bank.add_question(sample_question(1, QuestionLevel::Easy)).unwrap();
        bank.add_question(sample_question(2, QuestionLevel::Hard)).unwrap();

        assert_eq!(
            bank.add_question(sample_question(2, QuestionLevel::Hard)),
            Err(RepositoryError::DuplicateId(2))
        );

        let mut updated = sample_question(2, QuestionLevel::Expert);
        updated.text = "Changed?".into();
        bank.update_question(updated.clone()).unwrap();
        bank.delete_question(1).unwrap();

        assert_eq!(bank.load_questions().unwrap(), vec![updated]);
        assert_eq!(bank.delete_question(1), Err(RepositoryError::NotFound(1)));
    }

    #[test]
    fn pick_random_handles_empty_bank() {
        let mut rng = SmallRng::seed_from_u64(5);
        assert!(pick_random(&[], &mut rng).is_none());

        let questions = vec![sample_question(1, QuestionLevel::Easy)];
        assert_eq!(pick_random(&questions, &mut rng).map(|q| q.id), Some(1));
    }
}
