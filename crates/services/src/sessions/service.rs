use chrono::{DateTime, Utc};

use quiz_core::model::{QuestionId, QuizCategory, QuizQuestion};
use quiz_core::scoring::calculate_points;

use super::plan::SessionPlan;
use super::progress::SessionProgress;
use super::report::SessionReport;
use crate::error::SessionError;

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Where a session stands. Indices point into the session's questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for an answer to question `i`.
    Presenting(usize),
    /// Question `i` is answered and its result is on screen.
    Revealing(usize),
    Finished,
}

//
// ─── ANSWER ────────────────────────────────────────────────────────────────────
//

/// One answered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionAnswer {
    pub question_id: QuestionId,
    pub selected: String,
    pub correct: bool,
    /// Consecutive correct answers in this session, including this one.
    pub streak: u32,
    pub points: u32,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz session for one category.
///
/// Pure state machine: persistence and dwell timing live in
/// [`super::QuizLoopService`].
#[derive(Debug, Clone)]
pub struct QuizSession {
    category: QuizCategory,
    questions: Vec<QuizQuestion>,
    phase: SessionPhase,
    answers: Vec<SessionAnswer>,
    streak: u32,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start presenting the first question of `plan`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the plan has no questions.
    pub fn new(plan: SessionPlan, started_at: DateTime<Utc>) -> Result<Self, SessionError> {
        if plan.is_empty() {
            return Err(SessionError::Empty(plan.category));
        }
        Ok(Self {
            category: plan.category,
            questions: plan.questions,
            phase: SessionPhase::Presenting(0),
            answers: Vec::new(),
            streak: 0,
            started_at,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn category(&self) -> QuizCategory {
        self.category
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[SessionAnswer] {
        &self.answers
    }

    /// Current consecutive-correct run inside this session.
    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == SessionPhase::Finished
    }

    /// Question being presented or revealed; `None` once finished.
    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.phase {
            SessionPhase::Presenting(i) | SessionPhase::Revealing(i) => self.questions.get(i),
            SessionPhase::Finished => None,
        }
    }

    /// 1-based position of the current question, for "Question 3 of 10".
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self.phase {
            SessionPhase::Presenting(i) | SessionPhase::Revealing(i) => Some(i + 1),
            SessionPhase::Finished => None,
        }
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.questions.len();
        let answered = self.answers.len();
        SessionProgress {
            total,
            answered,
            remaining: total.saturating_sub(answered),
            is_complete: self.is_finished(),
        }
    }

    /// Lock in an answer for the presented question and move to `Revealing`.
    ///
    /// # Errors
    ///
    /// - `SessionError::AlreadyAnswered` while the previous answer is revealed.
    /// - `SessionError::Completed` once the session has finished.
    /// - `SessionError::UnknownOption` if `option` is not one of the choices;
    ///   the session stays on the same question.
    pub fn select_answer(&mut self, option: &str) -> Result<SessionAnswer, SessionError> {
        let index = match self.phase {
            SessionPhase::Presenting(i) => i,
            SessionPhase::Revealing(_) => return Err(SessionError::AlreadyAnswered),
            SessionPhase::Finished => return Err(SessionError::Completed),
        };
        let question = self.questions.get(index).ok_or(SessionError::Completed)?;
        if !question.has_option(option) {
            return Err(SessionError::UnknownOption(option.to_owned()));
        }

        let correct = question.is_correct(option);
        self.streak = if correct { self.streak.saturating_add(1) } else { 0 };
        let answer = SessionAnswer {
            question_id: question.id().clone(),
            selected: option.to_owned(),
            correct,
            streak: self.streak,
            points: calculate_points(correct, question.difficulty(), self.streak),
        };

        self.answers.push(answer.clone());
        self.phase = SessionPhase::Revealing(index);
        Ok(answer)
    }

    /// Leave `Revealing`: present the next question, or finish after the last.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotRevealing` while a question awaits an answer
    /// and `SessionError::Completed` once finished.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<SessionPhase, SessionError> {
        let index = match self.phase {
            SessionPhase::Revealing(i) => i,
            SessionPhase::Presenting(_) => return Err(SessionError::NotRevealing),
            SessionPhase::Finished => return Err(SessionError::Completed),
        };
        let next = index + 1;
        self.phase = if next < self.questions.len() {
            SessionPhase::Presenting(next)
        } else {
            self.completed_at = Some(now);
            SessionPhase::Finished
        };
        Ok(self.phase)
    }

    /// Summary of the run; `None` until the session has finished.
    #[must_use]
    pub fn report(&self) -> Option<SessionReport> {
        let completed_at = self.completed_at?;
        let answered = u32::try_from(self.answers.len()).unwrap_or(u32::MAX);
        let correct = self.answers.iter().filter(|a| a.correct).count();
        Some(SessionReport {
            category: self.category,
            answered,
            correct: u32::try_from(correct).unwrap_or(u32::MAX),
            points_earned: self.answers.iter().map(|a| a.points).sum(),
            best_streak: self.answers.iter().map(|a| a.streak).max().unwrap_or(0),
            started_at: self.started_at,
            completed_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Difficulty;
    use quiz_core::time::fixed_now;

    fn question(id: &str, difficulty: Difficulty) -> QuizQuestion {
        QuizQuestion::new(
            QuestionId::new(id),
            "Which?",
            vec!["right".into(), "wrong".into()],
            "right",
            "",
            difficulty,
            QuizCategory::GeneralChemistry,
        )
        .unwrap()
    }

    fn session(n: usize) -> QuizSession {
        let plan = SessionPlan {
            category: QuizCategory::GeneralChemistry,
            questions: (0..n)
                .map(|i| question(&format!("gc-{i}"), Difficulty::Medium))
                .collect(),
        };
        QuizSession::new(plan, fixed_now()).unwrap()
    }

    #[test]
    fn empty_plan_is_rejected() {
        let plan = SessionPlan {
            category: QuizCategory::ProcessControl,
            questions: Vec::new(),
        };
        assert!(matches!(
            QuizSession::new(plan, fixed_now()).unwrap_err(),
            SessionError::Empty(QuizCategory::ProcessControl)
        ));
    }

    #[test]
    fn walks_presenting_revealing_finished() {
        let mut session = session(2);
        assert_eq!(session.phase(), SessionPhase::Presenting(0));
        assert_eq!(session.position(), Some(1));

        session.select_answer("right").unwrap();
        assert_eq!(session.phase(), SessionPhase::Revealing(0));
        assert_eq!(session.advance(fixed_now()).unwrap(), SessionPhase::Presenting(1));

        session.select_answer("wrong").unwrap();
        let done = fixed_now() + chrono::Duration::seconds(30);
        assert_eq!(session.advance(done).unwrap(), SessionPhase::Finished);
        assert!(session.current_question().is_none());
        assert_eq!(session.completed_at(), Some(done));
        assert!(session.progress().is_complete);
    }

    #[test]
    fn second_selection_while_revealing_is_ignored() {
        let mut session = session(2);
        let first = session.select_answer("wrong").unwrap();
        assert!(matches!(
            session.select_answer("right").unwrap_err(),
            SessionError::AlreadyAnswered
        ));
        assert_eq!(session.answers(), std::slice::from_ref(&first));
        assert_eq!(session.progress().answered, 1);
    }

    #[test]
    fn unknown_option_leaves_question_open() {
        let mut session = session(1);
        let err = session.select_answer("maybe").unwrap_err();
        assert!(matches!(err, SessionError::UnknownOption(text) if text == "maybe"));
        assert_eq!(session.phase(), SessionPhase::Presenting(0));
        assert!(session.answers().is_empty());
    }

    #[test]
    fn advance_requires_a_revealed_answer() {
        let mut session = session(1);
        assert!(matches!(
            session.advance(fixed_now()).unwrap_err(),
            SessionError::NotRevealing
        ));
        session.select_answer("right").unwrap();
        session.advance(fixed_now()).unwrap();
        assert!(matches!(
            session.advance(fixed_now()).unwrap_err(),
            SessionError::Completed
        ));
        assert!(matches!(
            session.select_answer("right").unwrap_err(),
            SessionError::Completed
        ));
    }

    #[test]
    fn streak_drives_points_and_resets_on_miss() {
        let mut session = session(4);
        let mut points = Vec::new();
        for choice in ["right", "right", "wrong", "right"] {
            let answer = session.select_answer(choice).unwrap();
            points.push((answer.streak, answer.points));
            session.advance(fixed_now()).unwrap();
        }
        assert_eq!(points, [(1, 22), (2, 24), (0, 0), (1, 22)]);

        let report = session.report().unwrap();
        assert_eq!(report.answered, 4);
        assert_eq!(report.correct, 3);
        assert_eq!(report.points_earned, 68);
        assert_eq!(report.best_streak, 2);
        assert_eq!(report.accuracy_percent(), 75);
        assert_eq!(report.started_at, fixed_now());
    }

    #[test]
    fn report_is_absent_until_finished() {
        let mut session = session(1);
        assert!(session.report().is_none());
        session.select_answer("right").unwrap();
        assert!(session.report().is_none());
    }
}
