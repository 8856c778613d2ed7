use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::category::QuizCategory;
use crate::model::difficulty::Difficulty;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id cannot be empty")]
    EmptyId,

    #[error("question text cannot be empty")]
    EmptyPrompt,

    #[error("question {id} needs at least two options, got {len}")]
    TooFewOptions { id: String, len: usize },

    #[error("correct answer for {id} is not one of its options")]
    AnswerNotInOptions { id: String },
}

//
// ─── IDS ───────────────────────────────────────────────────────────────────────
//

/// Identifier of a question in the bank (e.g. `gc-001`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question as stored in the question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    id: QuestionId,
    #[serde(rename = "question")]
    prompt: String,
    options: Vec<String>,
    correct_answer: String,
    explanation: String,
    difficulty: Difficulty,
    category: QuizCategory,
}

impl QuizQuestion {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the id or prompt is blank, fewer than two
    /// options are given, or the correct answer is not among the options.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
        explanation: impl Into<String>,
        difficulty: Difficulty,
        category: QuizCategory,
    ) -> Result<Self, QuestionError> {
        Self {
            id,
            prompt: prompt.into(),
            options,
            correct_answer: correct_answer.into(),
            explanation: explanation.into(),
            difficulty,
            category,
        }
        .validated()
    }

    /// Re-check invariants on a record that came from deserialization.
    ///
    /// # Errors
    ///
    /// Same conditions as [`QuizQuestion::new`].
    pub fn validated(self) -> Result<Self, QuestionError> {
        if self.id.as_str().trim().is_empty() {
            return Err(QuestionError::EmptyId);
        }
        if self.prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if self.options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                id: self.id.to_string(),
                len: self.options.len(),
            });
        }
        if !self.options.contains(&self.correct_answer) {
            return Err(QuestionError::AnswerNotInOptions {
                id: self.id.to_string(),
            });
        }
        Ok(self)
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn category(&self) -> QuizCategory {
        self.category
    }

    /// Exact text comparison against the stored correct answer.
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct_answer
    }

    #[must_use]
    pub fn has_option(&self, answer: &str) -> bool {
        self.options.iter().any(|option| option == answer)
    }
}
