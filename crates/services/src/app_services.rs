use std::path::PathBuf;
use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::progress_tracker::GameProgressTracker;
use crate::questions::{QuestionBank, QuestionSource};
use crate::score_tracker::ScoreTracker;
use crate::sessions::QuizLoopService;
use crate::settings::QuizSettings;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    questions: Arc<QuestionBank>,
    scores: Arc<ScoreTracker>,
    progress: Arc<GameProgressTracker>,
    quiz_loop: Arc<QuizLoopService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or loading fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        settings: QuizSettings,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(storage, clock, settings).await
    }

    /// Build services backed by JSON files in `dir`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the directory or stored data cannot be read.
    pub async fn new_file(
        dir: impl Into<PathBuf>,
        clock: Clock,
        settings: QuizSettings,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::file(dir).await?;
        Self::from_storage(storage, clock, settings).await
    }

    /// Build services that keep everything in memory.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the bundled question bank is invalid.
    pub async fn new_in_memory(clock: Clock, settings: QuizSettings) -> Result<Self, AppServicesError> {
        Self::from_storage(Storage::in_memory(), clock, settings).await
    }

    /// Load both trackers from `storage` and wire them to the bundled bank.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the trackers cannot load or the bundled
    /// question bank is invalid.
    pub async fn from_storage(
        storage: Storage,
        clock: Clock,
        settings: QuizSettings,
    ) -> Result<Self, AppServicesError> {
        let questions = Arc::new(QuestionBank::bundled()?);
        let scores = Arc::new(ScoreTracker::load(Arc::clone(&storage.scores)).await?);
        let progress = Arc::new(GameProgressTracker::load(Arc::clone(&storage.profiles)).await?);
        let quiz_loop = Arc::new(
            QuizLoopService::new(
                clock,
                Arc::clone(&questions) as Arc<dyn QuestionSource>,
                Arc::clone(&scores),
                Arc::clone(&progress),
            )
            .with_settings(settings),
        );

        Ok(Self {
            questions,
            scores,
            progress,
            quiz_loop,
        })
    }

    #[must_use]
    pub fn questions(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn scores(&self) -> Arc<ScoreTracker> {
        Arc::clone(&self.scores)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<GameProgressTracker> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuizCategory;
    use quiz_core::time::fixed_clock;

    #[tokio::test]
    async fn in_memory_services_share_trackers() {
        let services = AppServices::new_in_memory(fixed_clock(), QuizSettings::default())
            .await
            .unwrap();
        assert_eq!(services.questions().categories().len(), QuizCategory::ALL.len());

        let mut session = services
            .quiz_loop()
            .start_session(QuizCategory::FluidMechanics)
            .await
            .unwrap();
        let answer = session.current_question().unwrap().correct_answer().to_owned();
        let feedback = services.quiz_loop().answer(&mut session, &answer).await.unwrap();

        assert!(feedback.answer.correct);
        assert_eq!(services.progress().profile().await.xp(), feedback.answer.points);
        assert_eq!(
            services.scores().score(QuizCategory::FluidMechanics).await.correct(),
            1
        );
    }
}
