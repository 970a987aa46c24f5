//! Request and response bodies for the HTTP API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::*;

/// Body of `POST /game/start`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartGameRequest {
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

/// Body of `POST /game/{id}/guess`. The guess stays raw until the engine
/// has checked the game exists and is active.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuessRequest {
    #[serde(default)]
    pub guess: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartGameResponse {
    pub game_id: Uuid,
    pub message: String,
    pub difficulty: Difficulty,
    pub max_attempts: u32,
}

impl From<&Game> for StartGameResponse {
    fn from(game: &Game) -> Self {
        Self {
            game_id: game.game_id,
            message: format!(
                "Game started! Guess a number between {} and {}",
                game.min_range, game.max_range
            ),
            difficulty: game.difficulty,
            max_attempts: game.max_attempts,
        }
    }
}

/// Result of one accepted guess
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum GuessOutcome {
    /// The guess hit the target
    Win {
        message: String,
        target_number: i64,
        attempts: u32,
        score: u32,
    },

    /// Last attempt used without hitting the target
    Lose {
        message: String,
        target_number: i64,
        attempts: u32,
    },

    /// Game still running
    Continue {
        hint: String,
        attempts_used: u32,
        attempts_remaining: u32,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub total_games: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub active_games: usize,
    pub timestamp: DateTime<Utc>,
}
