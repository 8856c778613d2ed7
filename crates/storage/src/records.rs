//! Persisted JSON shapes for the score table and the player profile.
//!
//! The field names match what the browser build wrote to local storage, so a
//! value exported from there loads unchanged.

use std::collections::BTreeMap;

use quiz_core::model::{AchievementId, CategoryScore, PlayerProfile, QuizCategory, ScoreBoard};
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Stored shape of one category's tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryScoreRecord {
    pub correct: u32,
    pub total: u32,
    pub streak: u32,
    pub best_streak: u32,
}

impl CategoryScoreRecord {
    #[must_use]
    pub fn from_score(score: CategoryScore) -> Self {
        Self {
            correct: score.correct(),
            total: score.total(),
            streak: score.streak(),
            best_streak: score.best_streak(),
        }
    }
}

/// Stored shape of the player profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    /// Written for readers of the raw value; recomputed from `xp` on load.
    pub level: u32,
    pub xp: u32,
    pub total_score: u32,
    pub games_played: u32,
    pub accuracy: u32,
    pub best_streak: u32,
    #[serde(default)]
    pub achievements: Vec<String>,
}

impl ProfileRecord {
    #[must_use]
    pub fn from_profile(profile: &PlayerProfile) -> Self {
        Self {
            level: profile.level(),
            xp: profile.xp(),
            total_score: profile.total_score(),
            games_played: profile.games_played(),
            accuracy: profile.accuracy(),
            best_streak: profile.best_streak(),
            achievements: profile
                .achievements()
                .iter()
                .map(|id| id.as_str().to_owned())
                .collect(),
        }
    }

    /// Convert into a domain profile, skipping achievement ids this build
    /// does not know.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the profile invariants fail.
    pub fn into_profile(self) -> Result<PlayerProfile, StorageError> {
        let achievements = self
            .achievements
            .iter()
            .filter_map(|raw| match raw.parse::<AchievementId>() {
                Ok(id) => Some(id),
                Err(err) => {
                    tracing::warn!(%err, "skipping stored achievement");
                    None
                }
            })
            .collect::<Vec<_>>();

        PlayerProfile::from_persisted(
            self.xp,
            self.total_score,
            self.games_played,
            self.accuracy,
            self.best_streak,
            achievements,
        )
        .map_err(ser)
    }
}

/// Serialize the full score table, keyed by category id.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if JSON encoding fails.
pub fn encode_scores(board: &ScoreBoard) -> Result<String, StorageError> {
    let table: BTreeMap<&'static str, CategoryScoreRecord> = board
        .iter()
        .map(|(category, score)| (category.as_str(), CategoryScoreRecord::from_score(score)))
        .collect();
    serde_json::to_string(&table).map_err(ser)
}

/// Parse a stored score table.
///
/// Unknown category ids and records that break the score invariants are
/// skipped; those categories start from zero.
///
/// # Errors
///
/// Returns `StorageError::Serialization` on malformed JSON.
pub fn decode_scores(raw: &str) -> Result<ScoreBoard, StorageError> {
    let table: BTreeMap<String, CategoryScoreRecord> = serde_json::from_str(raw).map_err(ser)?;
    let mut entries = Vec::with_capacity(table.len());
    for (id, record) in table {
        let category = match id.parse::<QuizCategory>() {
            Ok(category) => category,
            Err(err) => {
                tracing::warn!(%err, "skipping stored score");
                continue;
            }
        };
        match CategoryScore::from_persisted(
            record.correct,
            record.total,
            record.streak,
            record.best_streak,
        ) {
            Ok(score) => entries.push((category, score)),
            Err(err) => {
                tracing::warn!(category = category.as_str(), %err, "skipping stored score");
            }
        }
    }
    Ok(ScoreBoard::from_persisted(entries))
}

/// # Errors
///
/// Returns `StorageError::Serialization` if JSON encoding fails.
pub fn encode_profile(profile: &PlayerProfile) -> Result<String, StorageError> {
    serde_json::to_string(&ProfileRecord::from_profile(profile)).map_err(ser)
}

/// # Errors
///
/// Returns `StorageError::Serialization` on malformed JSON or invalid records.
pub fn decode_profile(raw: &str) -> Result<PlayerProfile, StorageError> {
    let record: ProfileRecord = serde_json::from_str(raw).map_err(ser)?;
    record.into_profile()
}
