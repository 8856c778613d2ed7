use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use quiz_core::model::{CategoryScore, QuizCategory, ScoreBoard};
use storage::repository::ScoreRepository;

use crate::error::TrackerError;

/// Per-category accuracy and streaks, persisted after every answer.
///
/// The board lock is held across the write so concurrent answers persist in
/// the order they were applied.
pub struct ScoreTracker {
    repo: Arc<dyn ScoreRepository>,
    board: Mutex<ScoreBoard>,
}

impl ScoreTracker {
    /// Load the stored board, falling back to an all-zero one.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` if the backend cannot be read.
    pub async fn load(repo: Arc<dyn ScoreRepository>) -> Result<Self, TrackerError> {
        let board = repo.load_scores().await?.unwrap_or_default();
        Ok(Self {
            repo,
            board: Mutex::new(board),
        })
    }

    /// Record one answer for `category` and persist the whole board.
    ///
    /// The in-memory update stays applied even when the write fails.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` if the board cannot be saved.
    pub async fn record_answer(
        &self,
        category: QuizCategory,
        is_correct: bool,
    ) -> Result<CategoryScore, TrackerError> {
        let mut board = self.board.lock().await;
        let score = board.record(category, is_correct);
        debug!(
            category = category.as_str(),
            is_correct,
            streak = score.streak(),
            "recorded category answer"
        );
        self.repo.save_scores(&board).await?;
        Ok(score)
    }

    /// Copy of the current board.
    pub async fn snapshot(&self) -> ScoreBoard {
        self.board.lock().await.clone()
    }

    pub async fn score(&self, category: QuizCategory) -> CategoryScore {
        self.board.lock().await.get(category)
    }
}
