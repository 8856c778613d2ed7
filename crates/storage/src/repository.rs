use async_trait::async_trait;
use quiz_core::model::{PlayerProfile, ScoreBoard};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::records;

/// Key holding the per-category score table.
pub const SCORES_KEY: &str = "quizScores";

/// Key holding the player profile.
pub const PROFILE_KEY: &str = "gameStats";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Raw key-value persistence port.
///
/// Values are JSON text, the same way a browser's local storage holds them.
/// Adapters only move strings; decoding belongs to the typed repositories.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Repository contract for the score table.
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Load the stored table; `None` when absent or unreadable.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only for backend failures.
    async fn load_scores(&self) -> Result<Option<ScoreBoard>, StorageError>;

    /// Persist the whole table.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the table cannot be stored.
    async fn save_scores(&self, board: &ScoreBoard) -> Result<(), StorageError>;
}

/// Repository contract for the player profile.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Load the stored profile; `None` when absent or unreadable.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only for backend failures.
    async fn load_profile(&self) -> Result<Option<PlayerProfile>, StorageError>;

    /// Persist the profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the profile cannot be stored.
    async fn save_profile(&self, profile: &PlayerProfile) -> Result<(), StorageError>;
}

/// Simple in-memory store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Typed repositories over any [`KeyValueStore`].
///
/// A stored value that fails to parse or validate is logged and reported as
/// absent, so callers fall back to defaults instead of failing to start.
#[derive(Clone)]
pub struct JsonRepository {
    store: Arc<dyn KeyValueStore>,
}

impl JsonRepository {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn load_decoded<T>(
        &self,
        key: &str,
        decode: impl FnOnce(&str) -> Result<T, StorageError> + Send,
    ) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.store.load(key).await? else {
            return Ok(None);
        };
        match decode(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                tracing::warn!(key, %err, "discarding unreadable persisted value");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl ScoreRepository for JsonRepository {
    async fn load_scores(&self) -> Result<Option<ScoreBoard>, StorageError> {
        self.load_decoded(SCORES_KEY, records::decode_scores).await
    }

    async fn save_scores(&self, board: &ScoreBoard) -> Result<(), StorageError> {
        let raw = records::encode_scores(board)?;
        self.store.save(SCORES_KEY, &raw).await
    }
}

#[async_trait]
impl ProfileRepository for JsonRepository {
    async fn load_profile(&self) -> Result<Option<PlayerProfile>, StorageError> {
        self.load_decoded(PROFILE_KEY, records::decode_profile).await
    }

    async fn save_profile(&self, profile: &PlayerProfile) -> Result<(), StorageError> {
        let raw = records::encode_profile(profile)?;
        self.store.save(PROFILE_KEY, &raw).await
    }
}

/// Aggregates the score and profile repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub scores: Arc<dyn ScoreRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
}

impl Storage {
    #[must_use]
    pub fn from_store(store: Arc<dyn KeyValueStore>) -> Self {
        let repo = JsonRepository::new(store);
        let scores: Arc<dyn ScoreRepository> = Arc::new(repo.clone());
        let profiles: Arc<dyn ProfileRepository> = Arc::new(repo);
        Self { scores, profiles }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(InMemoryStore::new()))
    }
}
