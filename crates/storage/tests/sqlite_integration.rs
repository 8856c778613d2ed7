use quiz_core::model::{
    AchievementId, AnswerOutcome, PlayerProfile, QuizCategory, ScoreBoard, SessionCounters,
};
use std::sync::Arc;
use storage::repository::{
    JsonRepository, KeyValueStore, PROFILE_KEY, ProfileRepository, SCORES_KEY, ScoreRepository,
    Storage,
};
use storage::sqlite::SqliteStore;

async fn connect(name: &str) -> SqliteStore {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let store = SqliteStore::connect(&url).await.expect("connect");
    store.migrate().await.expect("migrate");
    store
}

#[tokio::test]
async fn sqlite_roundtrip_persists_scores_and_profile() {
    let store = connect("memdb_roundtrip").await;
    let repo = JsonRepository::new(Arc::new(store.clone()));

    let mut board = ScoreBoard::new();
    for answer in [true, true, false, true] {
        board.record(QuizCategory::ReactionEngineering, answer);
    }
    repo.save_scores(&board).await.unwrap();

    let mut profile = PlayerProfile::default();
    let mut counters = SessionCounters::default();
    for streak in 1..=5 {
        profile.apply(
            &AnswerOutcome {
                correct: true,
                streak,
                points: 20 + 2 * streak,
            },
            &mut counters,
        );
    }
    repo.save_profile(&profile).await.unwrap();

    let loaded_board = repo.load_scores().await.unwrap().expect("scores");
    let score = loaded_board.get(QuizCategory::ReactionEngineering);
    assert_eq!(score.correct(), 3);
    assert_eq!(score.total(), 4);
    assert_eq!(score.streak(), 1);
    assert_eq!(score.best_streak(), 2);

    let loaded_profile = repo.load_profile().await.unwrap().expect("profile");
    assert_eq!(loaded_profile.xp(), 130);
    assert_eq!(loaded_profile.level(), 2);
    assert!(loaded_profile.has_achievement(AchievementId::Streak5));
}

#[tokio::test]
async fn sqlite_save_overwrites_previous_value() {
    let store = connect("memdb_overwrite").await;
    store.save(SCORES_KEY, "{}").await.unwrap();
    let updated = r#"{"mass-transfer":{"correct":1,"total":1,"streak":1,"bestStreak":1}}"#;
    store.save(SCORES_KEY, updated).await.unwrap();

    let raw = store.load(SCORES_KEY).await.unwrap().unwrap();
    assert!(raw.contains("mass-transfer"));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_store")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn sqlite_corrupt_profile_falls_back_to_absent() {
    let store = connect("memdb_corrupt").await;
    store.save(PROFILE_KEY, "{\"xp\": -4").await.unwrap();

    let repo = JsonRepository::new(Arc::new(store));
    assert!(repo.load_profile().await.unwrap().is_none());
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let store = connect("memdb_migrate_twice").await;
    store.migrate().await.expect("second migrate");
}

#[tokio::test]
async fn storage_sqlite_constructor_migrates_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("quiz.sqlite3").display());

    let storage = Storage::sqlite(&url).await.expect("storage");
    storage
        .profiles
        .save_profile(&PlayerProfile::default())
        .await
        .unwrap();

    let reopened = Storage::sqlite(&url).await.expect("reopen");
    assert_eq!(
        reopened.profiles.load_profile().await.unwrap(),
        Some(PlayerProfile::default())
    );
}
