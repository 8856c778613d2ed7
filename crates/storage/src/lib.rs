pub mod file;
pub mod records;
pub mod repository;
pub mod sqlite;

pub use repository::{
    InMemoryStore, JsonRepository, KeyValueStore, PROFILE_KEY, ProfileRepository, SCORES_KEY,
    ScoreRepository, Storage, StorageError,
};
