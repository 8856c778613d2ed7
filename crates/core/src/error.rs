use thiserror::Error;

use crate::model::{CategoryError, DifficultyError, ProfileError, QuestionError, ScoreError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    Difficulty(#[from] DifficultyError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
}
