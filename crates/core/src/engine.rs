//! Game engine: owns every game and the leaderboard for the life of the process

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rand::Rng;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{GameError, Result};
use crate::messages::GuessOutcome;
use crate::models::*;
use crate::rules;

/// Entries returned by [`GameEngine::leaderboard`].
pub const LEADERBOARD_SIZE: usize = 10;

#[derive(Debug, Default)]
struct EngineState {
    games: HashMap<Uuid, Game>,
    /// Completion order; never reordered in place.
    leaderboard: Vec<LeaderboardEntry>,
}

/// All game state behind a single lock, so every operation is one atomic step.
#[derive(Debug, Default)]
pub struct GameEngine {
    state: Mutex<EngineState>,
}

impl GameEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, EngineState>> {
        self.state.lock().map_err(|_| {
            tracing::error!("Game engine lock poisoned");
            GameError::StatePoisoned
        })
    }

    /// Start a game with a target drawn uniformly from the difficulty's range.
    pub fn start_game(&self, player_name: Option<&str>, difficulty: Option<&str>) -> Result<Game> {
        let difficulty = Difficulty::parse(difficulty)?;
        let profile = difficulty.profile();
        let target = rand::thread_rng().gen_range(profile.min..=profile.max);
        self.start_game_with_target(player_name, difficulty, target)
    }

    /// Start a game with a caller-chosen target, which must lie in the
    /// difficulty's range.
    pub(crate) fn start_game_with_target(
        &self,
        player_name: Option<&str>,
        difficulty: Difficulty,
        target: i64,
    ) -> Result<Game> {
        let player_name = validate_player_name(player_name)?;
        let game = Game::new(player_name, difficulty, target);
        if !game.contains(target) {
            return Err(GameError::GuessOutOfRange { min: game.min_range, max: game.max_range });
        }

        self.state()?.games.insert(game.game_id, game.clone());

        tracing::info!(
            game_id = %game.game_id,
            player = %game.player_name,
            difficulty = %game.difficulty,
            "Game started"
        );
        Ok(game)
    }

    pub fn submit_guess(&self, game_id: &str, raw_guess: &Value) -> Result<GuessOutcome> {
        let id = parse_game_id(game_id)?;
        let mut state = self.state()?;
        let EngineState { games, leaderboard } = &mut *state;

        let game = games.get_mut(&id).ok_or(GameError::GameNotFound)?;
        if game.status != GameStatus::Active {
            return Err(GameError::GameNotActive { status: game.status });
        }

        let bounds = (game.min_range, game.max_range);
        let guess = rules::parse_guess(raw_guess, bounds)?;
        if !game.contains(guess) {
            tracing::debug!(game_id = %id, guess, "Guess out of range");
            return Err(GameError::GuessOutOfRange { min: bounds.0, max: bounds.1 });
        }

        let now = Utc::now();
        game.attempts += 1;
        let hint = rules::hint(guess, game.target_number);
        game.guesses.push(GuessRecord {
            attempt: game.attempts,
            guess,
            hint: hint.clone(),
            timestamp: now,
        });

        if guess == game.target_number {
            let score = rules::score(game.difficulty, game.attempts, true);
            game.status = GameStatus::Won;
            game.ended_at = Some(now);
            game.score = Some(score);

            leaderboard.push(LeaderboardEntry {
                player_name: game.player_name.clone(),
                difficulty: game.difficulty,
                attempts: game.attempts,
                score,
                completed_at: now,
            });

            tracing::info!(game_id = %id, attempts = game.attempts, score, "Game won");
            return Ok(GuessOutcome::Win {
                message: format!("Congratulations! You guessed it in {} attempts!", game.attempts),
                target_number: game.target_number,
                attempts: game.attempts,
                score,
            });
        }

        if game.attempts >= game.max_attempts {
            game.status = GameStatus::Lost;
            game.ended_at = Some(now);
            game.score = Some(0);

            tracing::info!(game_id = %id, attempts = game.attempts, "Game lost");
            return Ok(GuessOutcome::Lose {
                message: "Game over! You ran out of attempts.".to_string(),
                target_number: game.target_number,
                attempts: game.attempts,
            });
        }

        Ok(GuessOutcome::Continue {
            hint,
            attempts_used: game.attempts,
            attempts_remaining: game.attempts_remaining(),
        })
    }

    pub fn get_status(&self, game_id: &str) -> Result<GameView> {
        self.game(game_id).map(|game| game.view())
    }

    /// Current status only, without cloning the guess history.
    pub fn status_of(&self, game_id: &str) -> Result<GameStatus> {
        let id = parse_game_id(game_id)?;
        self.state()?.games.get(&id).map(|game| game.status).ok_or(GameError::GameNotFound)
    }

    /// Full record of a game, target included. Not for caller-facing responses.
    pub fn game(&self, game_id: &str) -> Result<Game> {
        let id = parse_game_id(game_id)?;
        self.state()?.games.get(&id).cloned().ok_or(GameError::GameNotFound)
    }

    /// Top entries by score, ties in completion order, with the full entry count.
    pub fn leaderboard(&self) -> Result<(Vec<LeaderboardEntry>, usize)> {
        let state = self.state()?;
        let mut ranked = state.leaderboard.clone();
        // sort_by is stable
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.truncate(LEADERBOARD_SIZE);
        Ok((ranked, state.leaderboard.len()))
    }

    pub fn stats(&self) -> Result<Stats> {
        Ok(Stats::from_games(self.state()?.games.values()))
    }

    /// Number of games held in memory, finished ones included.
    pub fn game_count(&self) -> Result<usize> {
        Ok(self.state()?.games.len())
    }
}

fn validate_player_name(player_name: Option<&str>) -> Result<String> {
    let name = player_name.unwrap_or_default().trim();
    if name.is_empty() {
        return Err(GameError::MissingPlayerName);
    }
    if name.chars().count() > MAX_PLAYER_NAME_LEN {
        return Err(GameError::PlayerNameTooLong { max: MAX_PLAYER_NAME_LEN });
    }
    Ok(name.to_string())
}

fn parse_game_id(game_id: &str) -> Result<Uuid> {
    Uuid::parse_str(game_id).map_err(|_| GameError::GameNotFound)
}
