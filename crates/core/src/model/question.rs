use serde::Serialize;
use thiserror::Error;

use crate::model::ids::{CategoryId, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question answer cannot be empty")]
    EmptyAnswer,

    #[error("difficulty must be between {min} and {max}, got {value}", min = Difficulty::MIN, max = Difficulty::MAX)]
    InvalidDifficulty { value: i64 },
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Ordinal difficulty rating from 1 (easiest) to 5 (hardest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// # Errors
    ///
    /// Returns `QuestionError::InvalidDifficulty` when `value` is outside `1..=5`.
    pub fn new(value: i64) -> Result<Self, QuestionError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(QuestionError::InvalidDifficulty { value })
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<Difficulty> for u8 {
    fn from(value: Difficulty) -> Self {
        value.0
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A trivia question with its canonical answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    answer: String,
    difficulty: Difficulty,
    category: CategoryId,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or answer is blank.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        answer: impl Into<String>,
        difficulty: Difficulty,
        category: CategoryId,
    ) -> Result<Self, QuestionError> {
        let draft = NewQuestion::new(prompt, answer, difficulty, category)?;
        Ok(draft.with_id(id))
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The canonical answer string guesses are matched against.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn category(&self) -> CategoryId {
        self.category
    }
}

/// Validated input for creating a question; the provider assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewQuestion {
    prompt: String,
    answer: String,
    difficulty: Difficulty,
    category: CategoryId,
}

impl NewQuestion {
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` or `QuestionError::EmptyAnswer`
    /// for blank text.
    pub fn new(
        prompt: impl Into<String>,
        answer: impl Into<String>,
        difficulty: Difficulty,
        category: CategoryId,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        let answer = answer.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if answer.trim().is_empty() {
            return Err(QuestionError::EmptyAnswer);
        }
        Ok(Self {
            prompt: prompt.trim().to_owned(),
            answer: answer.trim().to_owned(),
            difficulty,
            category,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn category(&self) -> CategoryId {
        self.category
    }

    /// Attach a provider-assigned id.
    #[must_use]
    pub fn with_id(self, id: QuestionId) -> Question {
        Question {
            id,
            prompt: self.prompt,
            answer: self.answer,
            difficulty: self.difficulty,
            category: self.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_accepts_one_through_five() {
        for value in 1..=5 {
            assert_eq!(Difficulty::new(value).unwrap().value(), value as u8);
        }
    }

    #[test]
    fn difficulty_rejects_out_of_range() {
        assert_eq!(
            Difficulty::new(0).unwrap_err(),
            QuestionError::InvalidDifficulty { value: 0 }
        );
        assert!(Difficulty::new(6).is_err());
        assert!(Difficulty::new(-1).is_err());
        assert!(Difficulty::new(300).is_err());
    }

    #[test]
    fn question_requires_prompt_and_answer() {
        let difficulty = Difficulty::new(2).unwrap();
        let err = Question::new(QuestionId::new(1), " ", "Paris", difficulty, CategoryId::new(3))
            .unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt);

        let err = NewQuestion::new("Capital of France?", "", difficulty, CategoryId::new(3))
            .unwrap_err();
        assert_eq!(err, QuestionError::EmptyAnswer);
    }

    #[test]
    fn draft_with_id_keeps_fields() {
        let draft = NewQuestion::new(
            "Capital of France? ",
            " Paris",
            Difficulty::new(1).unwrap(),
            CategoryId::new(3),
        )
        .unwrap();
        let question = draft.with_id(QuestionId::new(7));
        assert_eq!(question.id(), QuestionId::new(7));
        assert_eq!(question.prompt(), "Capital of France?");
        assert_eq!(question.answer(), "Paris");
        assert_eq!(question.category(), CategoryId::new(3));
    }

    #[test]
    fn difficulty_serializes_as_number() {
        let json = serde_json::to_string(&Difficulty::new(4).unwrap()).unwrap();
        assert_eq!(json, "4");
    }
}
