//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuestionError, QuizCategory};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ScoreTracker` and `GameProgressTracker`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrackerError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while building a `QuestionBank`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error("question bank is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error("duplicate question id: {0}")]
    DuplicateId(String),
}

/// Errors emitted when validating `QuizSettings`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("session size must be > 0")]
    InvalidSessionSize,
    #[error("reveal dwell must be between 1ms and 60s")]
    InvalidRevealDwell,
}

/// Errors emitted by quiz sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for {0}")]
    Empty(QuizCategory),
    #[error("session already finished")]
    Completed,
    #[error("question already answered")]
    AlreadyAnswered,
    #[error("no answer is being revealed")]
    NotRevealing,
    #[error("{0:?} is not an option for the current question")]
    UnknownOption(String),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    QuestionBank(#[from] QuestionBankError),
}
