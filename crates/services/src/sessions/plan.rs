use quiz_core::model::{QuizCategory, QuizQuestion};

use crate::error::SessionError;
use crate::questions::QuestionSource;
use crate::settings::QuizSettings;

/// Questions drawn for one session, in presentation order.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub category: QuizCategory,
    pub questions: Vec<QuizQuestion>,
}

impl SessionPlan {
    /// Draw up to `settings.session_size()` shuffled questions of `category`.
    ///
    /// Categories with fewer questions yield a shorter session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the category has no questions.
    pub fn draw(
        source: &dyn QuestionSource,
        category: QuizCategory,
        settings: &QuizSettings,
    ) -> Result<Self, SessionError> {
        let size = usize::try_from(settings.session_size()).unwrap_or(usize::MAX);
        let mut questions = source.random_questions(category, size);
        questions.truncate(size);
        if questions.is_empty() {
            return Err(SessionError::Empty(category));
        }
        Ok(Self {
            category,
            questions,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
