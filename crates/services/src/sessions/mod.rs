mod plan;
mod progress;
mod report;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use plan::SessionPlan;
pub use progress::SessionProgress;
pub use report::SessionReport;
pub use service::{QuizSession, SessionAnswer, SessionPhase};
pub use workflow::{AnswerFeedback, QuizLoopService};
