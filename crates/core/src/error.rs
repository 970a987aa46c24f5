//! Error types for the game engine

use thiserror::Error;

use crate::models::GameStatus;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid difficulty")]
    InvalidDifficulty { valid_options: Vec<&'static str> },

    #[error("player_name is required")]
    MissingPlayerName,

    #[error("player_name must be {max} characters or less")]
    PlayerNameTooLong { max: usize },

    #[error("Game not found")]
    GameNotFound,

    #[error("Game is not active")]
    GameNotActive { status: GameStatus },

    #[error("guess must be a valid integer")]
    InvalidGuessFormat,

    #[error("guess must be between {min} and {max}")]
    GuessOutOfRange { min: i64, max: i64 },

    /// A previous holder of the engine lock panicked mid-operation.
    #[error("Game state is unavailable")]
    StatePoisoned,
}

impl GameError {
    /// True for errors caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, GameError::StatePoisoned)
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
