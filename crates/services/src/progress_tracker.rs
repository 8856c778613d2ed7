use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use quiz_core::model::{AnswerOutcome, Difficulty, PlayerProfile, ProfileUpdate, SessionCounters};
use quiz_core::scoring;
use storage::repository::ProfileRepository;

use crate::error::TrackerError;

/// Profile after an update together with what changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsUpdate {
    pub profile: PlayerProfile,
    pub change: ProfileUpdate,
}

#[derive(Debug, Default)]
struct ProgressState {
    profile: PlayerProfile,
    counters: SessionCounters,
}

/// Player-wide level, xp and achievements.
///
/// Session counters live only in memory; the profile is written after every
/// update.
pub struct GameProgressTracker {
    repo: Arc<dyn ProfileRepository>,
    state: Mutex<ProgressState>,
}

impl GameProgressTracker {
    /// Load the stored profile, falling back to a fresh level-1 profile.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` if the backend cannot be read.
    pub async fn load(repo: Arc<dyn ProfileRepository>) -> Result<Self, TrackerError> {
        let profile = repo.load_profile().await?.unwrap_or_default();
        Ok(Self {
            repo,
            state: Mutex::new(ProgressState {
                profile,
                counters: SessionCounters::default(),
            }),
        })
    }

    /// Points for one answer; see [`scoring::calculate_points`].
    #[must_use]
    pub fn calculate_points(correct: bool, difficulty: Difficulty, streak: u32) -> u32 {
        scoring::calculate_points(correct, difficulty, streak)
    }

    /// Apply one answer to the profile and persist it.
    ///
    /// Not idempotent: applying the same outcome twice counts it twice.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` if the profile cannot be saved. The
    /// in-memory update is kept in that case.
    pub async fn update_stats(&self, outcome: AnswerOutcome) -> Result<StatsUpdate, TrackerError> {
        let mut state = self.state.lock().await;
        let ProgressState { profile, counters } = &mut *state;
        let change = profile.apply(&outcome, counters);

        debug!(
            correct = outcome.correct,
            streak = outcome.streak,
            points = outcome.points,
            xp = profile.xp(),
            "updated player stats"
        );
        if change.leveled_up() {
            info!(
                from = change.previous_level,
                to = change.level,
                "level up"
            );
        }
        for id in &change.unlocked {
            info!(achievement = id.as_str(), title = id.title(), "achievement unlocked");
        }

        self.repo.save_profile(profile).await?;
        Ok(StatsUpdate {
            profile: profile.clone(),
            change,
        })
    }

    /// Clear the per-session tallies; the profile itself is untouched.
    pub async fn reset_session(&self) {
        self.state.lock().await.counters.reset();
    }

    pub async fn profile(&self) -> PlayerProfile {
        self.state.lock().await.profile.clone()
    }

    pub async fn counters(&self) -> SessionCounters {
        self.state.lock().await.counters
    }
}
