#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod progress_tracker;
pub mod questions;
pub mod score_tracker;
pub mod sessions;
pub mod settings;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, QuestionBankError, SessionError, SettingsError, TrackerError};
pub use progress_tracker::{GameProgressTracker, StatsUpdate};
pub use questions::{QuestionBank, QuestionSource};
pub use score_tracker::ScoreTracker;
pub use settings::QuizSettings;

pub use sessions::{
    AnswerFeedback, QuizLoopService, QuizSession, SessionAnswer, SessionPhase, SessionPlan,
    SessionProgress, SessionReport,
};
