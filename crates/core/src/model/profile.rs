use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::scoring::{accuracy_percent, level_for_xp, XP_PER_LEVEL};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("accuracy must be between 0 and 100, got {0}")]
    AccuracyOutOfRange(u32),

    #[error("unknown achievement id: {0}")]
    UnknownAchievement(String),
}

//
// ─── ACHIEVEMENTS ──────────────────────────────────────────────────────────────
//

/// One-way unlockable badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstWin,
    #[serde(rename = "streak_5")]
    Streak5,
    #[serde(rename = "accuracy_80")]
    Accuracy80,
    #[serde(rename = "level_5")]
    Level5,
    #[serde(rename = "score_1000")]
    Score1000,
    #[serde(rename = "level_10")]
    Level10,
}

/// State an achievement predicate is evaluated against, taken after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementCheck {
    /// `games_played` as it was before the update.
    pub previous_games_played: u32,
    pub streak: u32,
    pub accuracy: u32,
    pub level: u32,
    pub total_score: u32,
}

impl AchievementId {
    /// Evaluation order; unlocks are appended in this order.
    pub const ALL: [AchievementId; 6] = [
        Self::FirstWin,
        Self::Streak5,
        Self::Accuracy80,
        Self::Level5,
        Self::Score1000,
        Self::Level10,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstWin => "first_win",
            Self::Streak5 => "streak_5",
            Self::Accuracy80 => "accuracy_80",
            Self::Level5 => "level_5",
            Self::Score1000 => "score_1000",
            Self::Level10 => "level_10",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::FirstWin => "First Victory",
            Self::Streak5 => "Hot Streak",
            Self::Accuracy80 => "Sharp Mind",
            Self::Level5 => "Rising Star",
            Self::Score1000 => "Score Master",
            Self::Level10 => "Chemistry Pro",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::FirstWin => "Answer your first question",
            Self::Streak5 => "Reach a streak of 5",
            Self::Accuracy80 => "Hold 80% accuracy in a session",
            Self::Level5 => "Reach level 5",
            Self::Score1000 => "Earn 1000 points",
            Self::Level10 => "Reach level 10",
        }
    }

    #[must_use]
    pub fn is_met(self, check: &AchievementCheck) -> bool {
        match self {
            Self::FirstWin => check.previous_games_played == 0,
            Self::Streak5 => check.streak >= 5,
            Self::Accuracy80 => check.accuracy >= 80,
            Self::Level5 => check.level >= 5,
            Self::Score1000 => check.total_score >= 1000,
            Self::Level10 => check.level >= 10,
        }
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AchievementId {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ProfileError::UnknownAchievement(s.to_owned()))
    }
}

//
// ─── ANSWER OUTCOME ────────────────────────────────────────────────────────────
//

/// Result of one answered question, as reported by the session.
///
/// `points` is computed by the caller with [`crate::scoring::calculate_points`];
/// `streak` is the caller's category streak and is taken at face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub streak: u32,
    pub points: u32,
}

//
// ─── SESSION COUNTERS ──────────────────────────────────────────────────────────
//

/// Per-session tallies behind the profile's accuracy. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionCounters {
    current_streak: u32,
    correct_answers: u32,
    total_answers: u32,
}

impl SessionCounters {
    #[must_use]
    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    #[must_use]
    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    #[must_use]
    pub fn total_answers(&self) -> u32 {
        self.total_answers
    }

    #[must_use]
    pub fn accuracy_percent(&self) -> u32 {
        accuracy_percent(self.correct_answers, self.total_answers)
    }

    pub fn record(&mut self, outcome: &AnswerOutcome) {
        self.current_streak = outcome.streak;
        self.total_answers = self.total_answers.saturating_add(1);
        if outcome.correct {
            self.correct_answers = self.correct_answers.saturating_add(1);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//
// ─── PROFILE ───────────────────────────────────────────────────────────────────
//

/// What changed in a single profile update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub points: u32,
    pub previous_level: u32,
    pub level: u32,
    pub unlocked: Vec<AchievementId>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn leveled_up(&self) -> bool {
        self.level > self.previous_level
    }
}

/// Cross-category player progress.
///
/// `xp` and `total_score` only grow and stay equal; `level` is always derived
/// from `xp`; achievements are never removed once recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    level: u32,
    xp: u32,
    total_score: u32,
    games_played: u32,
    accuracy: u32,
    best_streak: u32,
    achievements: Vec<AchievementId>,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            total_score: 0,
            games_played: 0,
            accuracy: 0,
            best_streak: 0,
            achievements: Vec::new(),
        }
    }
}

impl PlayerProfile {
    /// Rehydrate a profile from persisted storage.
    ///
    /// The stored level is not trusted; it is derived from `xp`. Duplicate
    /// achievement ids are collapsed.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::AccuracyOutOfRange` if accuracy exceeds 100.
    pub fn from_persisted(
        xp: u32,
        total_score: u32,
        games_played: u32,
        accuracy: u32,
        best_streak: u32,
        achievements: impl IntoIterator<Item = AchievementId>,
    ) -> Result<Self, ProfileError> {
        if accuracy > 100 {
            return Err(ProfileError::AccuracyOutOfRange(accuracy));
        }
        let mut unique = Vec::new();
        for id in achievements {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Ok(Self {
            level: level_for_xp(xp),
            xp,
            total_score,
            games_played,
            accuracy,
            best_streak,
            achievements: unique,
        })
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn xp(&self) -> u32 {
        self.xp
    }

    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    /// Counts incorrect answers.
    #[must_use]
    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    #[must_use]
    pub fn accuracy(&self) -> u32 {
        self.accuracy
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    #[must_use]
    pub fn achievements(&self) -> &[AchievementId] {
        &self.achievements
    }

    #[must_use]
    pub fn has_achievement(&self, id: AchievementId) -> bool {
        self.achievements.contains(&id)
    }

    /// Experience earned inside the current level.
    #[must_use]
    pub fn xp_into_level(&self) -> u32 {
        self.xp % XP_PER_LEVEL
    }

    /// Experience total at which the next level starts.
    #[must_use]
    pub fn xp_for_next_level(&self) -> u32 {
        self.level.saturating_mul(XP_PER_LEVEL)
    }

    /// Achievements whose condition holds on the stored state but that are not
    /// recorded yet, e.g. after importing stats written by an older build.
    ///
    /// `first_win` counts as held once anything has been answered.
    #[must_use]
    pub fn pending_achievements(&self) -> Vec<AchievementId> {
        let answered_any = self.xp > 0 || self.games_played > 0;
        let check = AchievementCheck {
            previous_games_played: if answered_any { 0 } else { 1 },
            streak: self.best_streak,
            accuracy: self.accuracy,
            level: self.level,
            total_score: self.total_score,
        };
        AchievementId::ALL
            .into_iter()
            .filter(|id| id.is_met(&check) && !self.has_achievement(*id))
            .collect()
    }

    /// Apply one answered question to the profile.
    ///
    /// `counters` are the session tallies; they are advanced here so accuracy
    /// always reflects the answer being applied.
    pub fn apply(
        &mut self,
        outcome: &AnswerOutcome,
        counters: &mut SessionCounters,
    ) -> ProfileUpdate {
        let previous_level = self.level;
        let previous_games_played = self.games_played;

        counters.record(outcome);

        self.xp = self.xp.saturating_add(outcome.points);
        self.level = level_for_xp(self.xp).max(self.level);
        self.total_score = self.total_score.saturating_add(outcome.points);
        if !outcome.correct {
            self.games_played = self.games_played.saturating_add(1);
        }
        self.accuracy = counters.accuracy_percent();
        self.best_streak = self.best_streak.max(outcome.streak);

        let check = AchievementCheck {
            previous_games_played,
            streak: outcome.streak,
            accuracy: self.accuracy,
            level: self.level,
            total_score: self.total_score,
        };
        let mut unlocked = Vec::new();
        for id in AchievementId::ALL {
            if id.is_met(&check) && !self.achievements.contains(&id) {
                self.achievements.push(id);
                unlocked.push(id);
            }
        }

        ProfileUpdate {
            points: outcome.points,
            previous_level,
            level: self.level,
            unlocked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn correct(streak: u32, points: u32) -> AnswerOutcome {
        AnswerOutcome {
            correct: true,
            streak,
            points,
        }
    }

    fn wrong() -> AnswerOutcome {
        AnswerOutcome {
            correct: false,
            streak: 0,
            points: 0,
        }
    }

    #[test]
    fn default_profile_starts_at_level_one() {
        let profile = PlayerProfile::default();
        assert_eq!(profile.level(), 1);
        assert_eq!(profile.xp(), 0);
        assert!(profile.achievements().is_empty());
        assert_eq!(profile.xp_for_next_level(), 100);
    }

    #[test]
    fn streak_five_from_fresh_profile_unlocks_expected_set() {
        let mut profile = PlayerProfile::default();
        let mut counters = SessionCounters::default();
        let update = profile.apply(&correct(5, 30), &mut counters);

        assert!(update.unlocked.contains(&AchievementId::Streak5));
        // first answer ever and 1/1 accuracy hold too on a fresh profile
        assert_eq!(
            update.unlocked,
            vec![
                AchievementId::FirstWin,
                AchievementId::Streak5,
                AchievementId::Accuracy80
            ]
        );
    }

    #[test]
    fn streak_five_unlocks_only_streak_when_others_do_not_hold() {
        let mut profile = PlayerProfile::default();
        let mut counters = SessionCounters::default();
        profile.apply(&wrong(), &mut counters);
        profile.apply(&wrong(), &mut counters);

        let update = profile.apply(&correct(5, 20), &mut counters);
        assert_eq!(update.unlocked, vec![AchievementId::Streak5]);
        assert_eq!(profile.accuracy(), 33);
    }

    #[test]
    fn wrong_answers_count_as_games_played() {
        let mut profile = PlayerProfile::default();
        let mut counters = SessionCounters::default();
        profile.apply(&correct(1, 11), &mut counters);
        assert_eq!(profile.games_played(), 0);
        profile.apply(&wrong(), &mut counters);
        assert_eq!(profile.games_played(), 1);
    }

    #[test]
    fn first_win_fires_even_on_a_wrong_first_answer() {
        let mut profile = PlayerProfile::default();
        let mut counters = SessionCounters::default();
        let update = profile.apply(&wrong(), &mut counters);
        assert_eq!(update.unlocked, vec![AchievementId::FirstWin]);
    }

    #[test]
    fn level_and_score_thresholds_unlock() {
        let mut profile =
            PlayerProfile::from_persisted(990, 990, 3, 50, 4, [AchievementId::FirstWin]).unwrap();
        assert_eq!(profile.level(), 10);
        let mut counters = SessionCounters::default();
        counters.record(&wrong());
        counters.record(&wrong());
        let update = profile.apply(&correct(1, 22), &mut counters);
        assert_eq!(profile.xp(), 1012);
        assert_eq!(profile.level(), 11);
        assert!(update.leveled_up());
        assert_eq!(
            update.unlocked,
            vec![
                AchievementId::Level5,
                AchievementId::Score1000,
                AchievementId::Level10
            ]
        );
    }

    #[test]
    fn achievements_are_never_revoked() {
        let mut profile = PlayerProfile::default();
        let mut counters = SessionCounters::default();
        profile.apply(&correct(1, 11), &mut counters);
        assert!(profile.has_achievement(AchievementId::Accuracy80));

        for _ in 0..5 {
            profile.apply(&wrong(), &mut counters);
        }
        assert!(profile.accuracy() < 80);
        assert!(profile.has_achievement(AchievementId::Accuracy80));
    }

    #[test]
    fn xp_and_total_score_stay_equal_and_level_tracks_xp() {
        let mut profile = PlayerProfile::default();
        let mut counters = SessionCounters::default();
        let mut last_len = 0;
        for step in 0..60_u32 {
            let outcome = if step % 4 == 3 {
                wrong()
            } else {
                correct(step % 4 + 1, 10 + step)
            };
            let before = profile.xp();
            profile.apply(&outcome, &mut counters);
            assert!(profile.xp() >= before);
            assert_eq!(profile.xp(), profile.total_score());
            assert_eq!(profile.level(), profile.xp() / 100 + 1);
            assert!(profile.achievements().len() >= last_len);
            last_len = profile.achievements().len();
        }
    }

    #[test]
    fn persisted_profile_recomputes_level_and_dedups() {
        let profile = PlayerProfile::from_persisted(
            250,
            250,
            1,
            70,
            3,
            [AchievementId::FirstWin, AchievementId::FirstWin],
        )
        .unwrap();
        assert_eq!(profile.level(), 3);
        assert_eq!(profile.achievements(), &[AchievementId::FirstWin]);
        assert_eq!(profile.xp_into_level(), 50);
    }

    #[test]
    fn persisted_accuracy_is_bounded() {
        let err = PlayerProfile::from_persisted(0, 0, 0, 101, 0, []).unwrap_err();
        assert_eq!(err, ProfileError::AccuracyOutOfRange(101));
    }

    #[test]
    fn achievement_ids_use_wire_names() {
        assert_eq!("streak_5".parse::<AchievementId>().unwrap(), AchievementId::Streak5);
        let json = serde_json::to_string(&AchievementId::Score1000).unwrap();
        assert_eq!(json, "\"score_1000\"");
        assert!("streak_50".parse::<AchievementId>().is_err());
    }

    #[test]
    fn counters_reset_clears_session_tallies() {
        let mut counters = SessionCounters::default();
        counters.record(&correct(3, 13));
        assert_eq!(counters.current_streak(), 3);
        counters.reset();
        assert_eq!(counters, SessionCounters::default());
    }

    #[test]
    fn pending_achievements_lists_held_but_unrecorded_ids() {
        assert!(PlayerProfile::default().pending_achievements().is_empty());

        let profile = PlayerProfile::from_persisted(520, 520, 2, 90, 6, [AchievementId::FirstWin])
            .unwrap();
        assert_eq!(
            profile.pending_achievements(),
            vec![
                AchievementId::Streak5,
                AchievementId::Accuracy80,
                AchievementId::Level5,
            ]
        );
    }
}
