use std::collections::BTreeMap;
use thiserror::Error;

use crate::model::category::QuizCategory;
use crate::scoring::accuracy_percent;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("correct count ({correct}) exceeds total ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },

    #[error("streak ({streak}) exceeds best streak ({best_streak})")]
    StreakExceedsBest { streak: u32, best_streak: u32 },
}

/// Running tally for one quiz category.
///
/// Invariants: `correct <= total`, `streak <= best_streak`, and `best_streak`
/// never decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryScore {
    correct: u32,
    total: u32,
    streak: u32,
    best_streak: u32,
}

impl CategoryScore {
    /// Rehydrate a score from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError` if the stored counters break the score invariants.
    pub fn from_persisted(
        correct: u32,
        total: u32,
        streak: u32,
        best_streak: u32,
    ) -> Result<Self, ScoreError> {
        if correct > total {
            return Err(ScoreError::CorrectExceedsTotal { correct, total });
        }
        if streak > best_streak {
            return Err(ScoreError::StreakExceedsBest {
                streak,
                best_streak,
            });
        }
        Ok(Self {
            correct,
            total,
            streak,
            best_streak,
        })
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    #[must_use]
    pub fn accuracy_percent(&self) -> u32 {
        accuracy_percent(self.correct, self.total)
    }

    /// Apply one answered question.
    pub fn record(&mut self, is_correct: bool) {
        self.total = self.total.saturating_add(1);
        if is_correct {
            self.correct = self.correct.saturating_add(1);
            self.streak = self.streak.saturating_add(1);
        } else {
            self.streak = 0;
        }
        self.best_streak = self.best_streak.max(self.streak);
    }
}

/// Score table covering every category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    scores: BTreeMap<QuizCategory, CategoryScore>,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreBoard {
    /// A board with every category zeroed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scores: QuizCategory::ALL
                .into_iter()
                .map(|category| (category, CategoryScore::default()))
                .collect(),
        }
    }

    /// Build a board from stored entries; categories not present start at zero.
    #[must_use]
    pub fn from_persisted(
        entries: impl IntoIterator<Item = (QuizCategory, CategoryScore)>,
    ) -> Self {
        let mut board = Self::new();
        board.scores.extend(entries);
        board
    }

    #[must_use]
    pub fn get(&self, category: QuizCategory) -> CategoryScore {
        self.scores.get(&category).copied().unwrap_or_default()
    }

    /// Record an answer, creating a zeroed entry for an unseen category.
    pub fn record(&mut self, category: QuizCategory, is_correct: bool) -> CategoryScore {
        let score = self.scores.entry(category).or_default();
        score.record(is_correct);
        *score
    }

    /// Entries in selector display order.
    pub fn iter(&self) -> impl Iterator<Item = (QuizCategory, CategoryScore)> + '_ {
        QuizCategory::ALL
            .into_iter()
            .map(|category| (category, self.get(category)))
    }

    #[must_use]
    pub fn total_answered(&self) -> u32 {
        self.scores.values().map(CategoryScore::total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_tracks_streaks_and_totals() {
        let mut score = CategoryScore::default();
        score.record(true);
        score.record(true);
        score.record(true);
        assert_eq!(score.streak(), 3);
        assert_eq!(score.best_streak(), 3);

        score.record(false);
        assert_eq!(score.streak(), 0);
        assert_eq!(score.best_streak(), 3);
        assert_eq!(score.correct(), 3);
        assert_eq!(score.total(), 4);
        assert_eq!(score.accuracy_percent(), 75);
    }

    #[test]
    fn invariants_hold_over_mixed_sequences() {
        let pattern = [true, false, true, true, false, false, true, true, true, true, false];
        let mut score = CategoryScore::default();
        let mut last_best = 0;
        for (i, answer) in pattern.iter().cycle().take(200).enumerate() {
            score.record(*answer);
            assert!(score.correct() <= score.total());
            assert!(score.best_streak() >= last_best);
            if !*answer {
                assert_eq!(score.streak(), 0, "streak not reset at step {i}");
            }
            last_best = score.best_streak();
        }
    }

    #[test]
    fn persisted_scores_are_validated() {
        assert_eq!(
            CategoryScore::from_persisted(5, 3, 0, 0).unwrap_err(),
            ScoreError::CorrectExceedsTotal {
                correct: 5,
                total: 3
            }
        );
        assert!(matches!(
            CategoryScore::from_persisted(3, 3, 3, 2),
            Err(ScoreError::StreakExceedsBest { .. })
        ));
        assert!(CategoryScore::from_persisted(3, 4, 1, 3).is_ok());
    }

    #[test]
    fn board_covers_every_category() {
        let board = ScoreBoard::new();
        assert_eq!(board.iter().count(), QuizCategory::ALL.len());
        assert!(board.iter().all(|(_, score)| score == CategoryScore::default()));
    }

    #[test]
    fn board_record_only_touches_one_category() {
        let mut board = ScoreBoard::new();
        let updated = board.record(QuizCategory::MassTransfer, true);
        assert_eq!(updated.total(), 1);
        assert_eq!(board.get(QuizCategory::MassTransfer).correct(), 1);
        assert_eq!(board.get(QuizCategory::HeatTransfer).total(), 0);
        assert_eq!(board.total_answered(), 1);
    }

    #[test]
    fn partial_persisted_board_fills_missing_categories() {
        let stored = CategoryScore::from_persisted(2, 3, 1, 2).unwrap();
        let board = ScoreBoard::from_persisted([(QuizCategory::Thermodynamics, stored)]);
        assert_eq!(board.get(QuizCategory::Thermodynamics), stored);
        assert_eq!(board.get(QuizCategory::ProcessControl), CategoryScore::default());
    }
}
