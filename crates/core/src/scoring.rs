//! Point, level and accuracy arithmetic shared by the trackers.
//!
//! All math is integer-exact: the streak multiplier moves in steps of 0.1, so it
//! is carried as tenths and never touches floating point on the scoring path.

use crate::model::Difficulty;

/// Experience needed per level.
pub const XP_PER_LEVEL: u32 = 100;

/// Upper bound of the streak multiplier, reached at a streak of 20.
pub const MAX_STREAK_MULTIPLIER: f64 = 3.0;

const MULTIPLIER_BASE_TENTHS: u32 = 10;
const MULTIPLIER_CAP_TENTHS: u32 = 30;

fn multiplier_tenths(streak: u32) -> u32 {
    streak
        .saturating_add(MULTIPLIER_BASE_TENTHS)
        .min(MULTIPLIER_CAP_TENTHS)
}

/// `min(1 + 0.1 × streak, 3)`, for display.
#[must_use]
pub fn streak_multiplier(streak: u32) -> f64 {
    f64::from(multiplier_tenths(streak)) / 10.0
}

/// Points earned by one answer.
///
/// Wrong answers are worth nothing. Correct answers earn the difficulty's base
/// points scaled by the streak multiplier, rounded half up.
#[must_use]
pub fn calculate_points(correct: bool, difficulty: Difficulty, streak: u32) -> u32 {
    if !correct {
        return 0;
    }
    let scaled = difficulty.base_points() * multiplier_tenths(streak);
    (scaled + 5) / 10
}

/// `floor(xp / 100) + 1`.
#[must_use]
pub fn level_for_xp(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

/// Rounded percentage of `correct` over `total`; zero when nothing was answered.
#[must_use]
pub fn accuracy_percent(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let correct = u64::from(correct.min(total));
    let total = u64::from(total);
    // round half up: (200c + t) / 2t
    let pct = (200 * correct + total) / (2 * total);
    u32::try_from(pct).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hard_at_streak_twenty_hits_the_cap() {
        assert_eq!(calculate_points(true, Difficulty::Hard, 20), 90);
        assert_eq!(calculate_points(true, Difficulty::Hard, 45), 90);
    }

    #[test]
    fn easy_without_streak_is_base_points() {
        assert_eq!(calculate_points(true, Difficulty::Easy, 0), 10);
    }

    #[test]
    fn wrong_answers_score_zero() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            for streak in [0, 1, 5, 20, 100] {
                assert_eq!(calculate_points(false, difficulty, streak), 0);
            }
        }
    }

    #[test]
    fn medium_streak_sequence() {
        let points: Vec<u32> = (1..=5)
            .map(|streak| calculate_points(true, Difficulty::Medium, streak))
            .collect();
        assert_eq!(points, vec![22, 24, 26, 28, 30]);
    }

    #[test]
    fn multiplier_is_capped() {
        assert!((streak_multiplier(0) - 1.0).abs() < f64::EPSILON);
        assert!((streak_multiplier(5) - 1.5).abs() < f64::EPSILON);
        assert!((streak_multiplier(20) - MAX_STREAK_MULTIPLIER).abs() < f64::EPSILON);
        assert!((streak_multiplier(u32::MAX) - MAX_STREAK_MULTIPLIER).abs() < f64::EPSILON);
    }

    #[test]
    fn level_boundaries() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(99), 1);
        assert_eq!(level_for_xp(100), 2);
        assert_eq!(level_for_xp(130), 2);
        assert_eq!(level_for_xp(999), 10);
    }

    #[test]
    fn accuracy_rounds_half_up() {
        assert_eq!(accuracy_percent(0, 0), 0);
        assert_eq!(accuracy_percent(1, 2), 50);
        assert_eq!(accuracy_percent(2, 3), 67);
        assert_eq!(accuracy_percent(1, 3), 33);
        assert_eq!(accuracy_percent(1, 8), 13);
        assert_eq!(accuracy_percent(4, 4), 100);
    }
}
