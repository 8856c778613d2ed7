use std::sync::Arc;

use tracing::debug;

use quiz_core::model::{AnswerOutcome, CategoryScore, QuizCategory};

use super::plan::SessionPlan;
use super::service::{QuizSession, SessionAnswer, SessionPhase};
use crate::Clock;
use crate::error::SessionError;
use crate::progress_tracker::{GameProgressTracker, StatsUpdate};
use crate::questions::QuestionSource;
use crate::score_tracker::ScoreTracker;
use crate::settings::QuizSettings;

/// Everything shown while an answer is revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub answer: SessionAnswer,
    pub correct_answer: String,
    pub explanation: String,
    pub category_score: CategoryScore,
    pub stats: StatsUpdate,
}

/// Orchestrates session start, tracked answering and the reveal dwell.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    settings: QuizSettings,
    questions: Arc<dyn QuestionSource>,
    scores: Arc<ScoreTracker>,
    progress: Arc<GameProgressTracker>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        questions: Arc<dyn QuestionSource>,
        scores: Arc<ScoreTracker>,
        progress: Arc<GameProgressTracker>,
    ) -> Self {
        Self {
            clock,
            settings: QuizSettings::default(),
            questions,
            scores,
            progress,
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    /// Draw a fresh set of questions for `category` and reset the session
    /// counters behind the profile's accuracy.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the category has no questions.
    pub async fn start_session(&self, category: QuizCategory) -> Result<QuizSession, SessionError> {
        let plan = SessionPlan::draw(self.questions.as_ref(), category, &self.settings)?;
        self.progress.reset_session().await;
        debug!(
            category = category.as_str(),
            questions = plan.len(),
            "starting quiz session"
        );
        QuizSession::new(plan, self.clock.now())
    }

    /// Answer the presented question and update both trackers once.
    ///
    /// # Errors
    ///
    /// Returns the `QuizSession::select_answer` errors without touching the
    /// trackers, or `SessionError::Tracker` if persisting fails. Both trackers
    /// are updated in memory before any write error is returned, and the
    /// session is already revealing.
    pub async fn answer(
        &self,
        session: &mut QuizSession,
        option: &str,
    ) -> Result<AnswerFeedback, SessionError> {
        let answer = session.select_answer(option)?;
        let (correct_answer, explanation) = session
            .current_question()
            .map(|q| (q.correct_answer().to_owned(), q.explanation().to_owned()))
            .unwrap_or_default();

        let category_score = self
            .scores
            .record_answer(session.category(), answer.correct)
            .await;
        let stats = self
            .progress
            .update_stats(AnswerOutcome {
                correct: answer.correct,
                streak: answer.streak,
                points: answer.points,
            })
            .await;
        let category_score = category_score?;
        let stats = stats?;

        Ok(AnswerFeedback {
            answer,
            correct_answer,
            explanation,
            category_score,
            stats,
        })
    }

    /// Wait out the reveal dwell, then move to the next question or finish.
    ///
    /// Dropping the returned future before the dwell elapses leaves the
    /// session untouched.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotRevealing` or `SessionError::Completed`
    /// immediately if no answer is being revealed.
    pub async fn finish_reveal(&self, session: &mut QuizSession) -> Result<SessionPhase, SessionError> {
        match session.phase() {
            SessionPhase::Revealing(_) => {}
            SessionPhase::Presenting(_) => return Err(SessionError::NotRevealing),
            SessionPhase::Finished => return Err(SessionError::Completed),
        }
        tokio::time::sleep(self.settings.reveal_dwell()).await;
        session.advance(self.clock.now())
    }
}
