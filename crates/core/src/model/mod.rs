mod category;
mod difficulty;
mod profile;
mod question;
mod score;

pub use category::{CategoryError, QuizCategory};
pub use difficulty::{Difficulty, DifficultyError};
pub use profile::{
    AchievementCheck, AchievementId, AnswerOutcome, PlayerProfile, ProfileError, ProfileUpdate,
    SessionCounters,
};
pub use question::{QuestionError, QuestionId, QuizQuestion};
pub use score::{CategoryScore, ScoreBoard, ScoreError};
