use std::time::Duration;

use crate::error::SettingsError;

const MAX_REVEAL_DWELL: Duration = Duration::from_secs(60);

/// Tunables for a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    session_size: u32,
    reveal_dwell: Duration,
}

impl Default for QuizSettings {
    /// Ten questions per session, three seconds on each revealed answer.
    fn default() -> Self {
        Self {
            session_size: 10,
            reveal_dwell: Duration::from_secs(3),
        }
    }
}

impl QuizSettings {
    /// Creates custom quiz settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the session size is zero or the dwell is zero
    /// or longer than a minute.
    pub fn new(session_size: u32, reveal_dwell: Duration) -> Result<Self, SettingsError> {
        if session_size == 0 {
            return Err(SettingsError::InvalidSessionSize);
        }
        if reveal_dwell.is_zero() || reveal_dwell > MAX_REVEAL_DWELL {
            return Err(SettingsError::InvalidRevealDwell);
        }
        Ok(Self {
            session_size,
            reveal_dwell,
        })
    }

    #[must_use]
    pub fn session_size(&self) -> u32 {
        self.session_size
    }

    #[must_use]
    pub fn reveal_dwell(&self) -> Duration {
        self.reveal_dwell
    }
}
