use chrono::{DateTime, Utc};
use serde::Serialize;

use quiz_core::model::QuizCategory;
use quiz_core::scoring::accuracy_percent;

/// Summary of a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub category: QuizCategory,
    pub answered: u32,
    pub correct: u32,
    pub points_earned: u32,
    pub best_streak: u32,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl SessionReport {
    #[must_use]
    pub fn accuracy_percent(&self) -> u32 {
        accuracy_percent(self.correct, self.answered)
    }
}
