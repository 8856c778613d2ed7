use std::collections::{BTreeMap, HashSet};

use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Difficulty, QuizCategory, QuizQuestion};

use crate::error::QuestionBankError;

const BUNDLED_QUESTIONS: &str = include_str!("../data/questions.json");

/// Read access to a pool of quiz questions.
pub trait QuestionSource: Send + Sync {
    /// Up to `count` questions of `category` in random order, without repeats.
    fn random_questions(&self, category: QuizCategory, count: usize) -> Vec<QuizQuestion>;

    /// Every question of `category` at the given difficulty, in bank order.
    fn questions_by_difficulty(
        &self,
        category: QuizCategory,
        difficulty: Difficulty,
    ) -> Vec<QuizQuestion>;

    /// Categories that have at least one question, in display order.
    fn categories(&self) -> Vec<QuizCategory>;
}

/// In-memory question bank grouped by category.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    by_category: BTreeMap<QuizCategory, Vec<QuizQuestion>>,
}

impl QuestionBank {
    /// The question set shipped with the game.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError` if the bundled data is invalid.
    pub fn bundled() -> Result<Self, QuestionBankError> {
        Self::from_json(BUNDLED_QUESTIONS)
    }

    /// Parse a JSON array of questions.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::Parse` for malformed JSON, and the errors of
    /// [`QuestionBank::from_questions`] for invalid content.
    pub fn from_json(raw: &str) -> Result<Self, QuestionBankError> {
        let questions: Vec<QuizQuestion> = serde_json::from_str(raw)?;
        Self::from_questions(questions)
    }

    /// Build a bank from caller-provided questions.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::Question` if a question fails validation and
    /// `QuestionBankError::DuplicateId` if two questions share an id.
    pub fn from_questions(
        questions: impl IntoIterator<Item = QuizQuestion>,
    ) -> Result<Self, QuestionBankError> {
        let mut seen = HashSet::new();
        let mut by_category: BTreeMap<QuizCategory, Vec<QuizQuestion>> = BTreeMap::new();
        for question in questions {
            let question = question.validated()?;
            if !seen.insert(question.id().as_str().to_owned()) {
                return Err(QuestionBankError::DuplicateId(question.id().to_string()));
            }
            by_category
                .entry(question.category())
                .or_default()
                .push(question);
        }
        Ok(Self { by_category })
    }

    #[must_use]
    pub fn count(&self, category: QuizCategory) -> usize {
        self.by_category.get(&category).map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }

    /// Shuffle `category` with `rng` and keep the first `count` questions.
    pub fn draw<R: Rng + ?Sized>(
        &self,
        category: QuizCategory,
        count: usize,
        rng: &mut R,
    ) -> Vec<QuizQuestion> {
        let mut questions = self.by_category.get(&category).cloned().unwrap_or_default();
        questions.shuffle(rng);
        questions.truncate(count);
        questions
    }
}

impl QuestionSource for QuestionBank {
    fn random_questions(&self, category: QuizCategory, count: usize) -> Vec<QuizQuestion> {
        self.draw(category, count, &mut rand::rng())
    }

    fn questions_by_difficulty(
        &self,
        category: QuizCategory,
        difficulty: Difficulty,
    ) -> Vec<QuizQuestion> {
        self.by_category
            .get(&category)
            .map(|questions| {
                questions
                    .iter()
                    .filter(|q| q.difficulty() == difficulty)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn categories(&self) -> Vec<QuizCategory> {
        QuizCategory::ALL
            .into_iter()
            .filter(|category| self.count(*category) > 0)
            .collect()
    }
}
