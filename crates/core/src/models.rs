//! Game data models shared between the engine and the HTTP layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{GameError, Result};

/// Longest accepted player name, counted after trimming.
pub const MAX_PLAYER_NAME_LEN: usize = 20;

/// Difficulty selected when a start request names none.
pub const DEFAULT_DIFFICULTY: Difficulty = Difficulty::Medium;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Static parameters a game copies from its difficulty at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyProfile {
    pub min: i64,
    pub max: i64,
    pub max_attempts: u32,
    pub base_score: u32,
}

impl Difficulty {
    pub fn all() -> [Difficulty; 3] {
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile { min: 1, max: 50, max_attempts: 10, base_score: 100 },
            Difficulty::Medium => DifficultyProfile { min: 1, max: 100, max_attempts: 7, base_score: 200 },
            Difficulty::Hard => DifficultyProfile { min: 1, max: 200, max_attempts: 5, base_score: 300 },
        }
    }

    /// Names accepted by [`Difficulty::parse`], in table order.
    pub fn valid_options() -> Vec<&'static str> {
        Self::all().iter().map(Difficulty::as_str).collect()
    }

    /// Resolve a requested difficulty name, case-insensitively.
    /// `None` selects [`DEFAULT_DIFFICULTY`].
    pub fn parse(name: Option<&str>) -> Result<Difficulty> {
        let Some(name) = name else {
            return Ok(DEFAULT_DIFFICULTY);
        };
        let wanted = name.to_lowercase();
        Self::all()
            .into_iter()
            .find(|d| d.as_str() == wanted)
            .ok_or_else(|| GameError::InvalidDifficulty {
                valid_options: Self::valid_options(),
            })
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Active,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Active)
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            GameStatus::Active => "active",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        };
        f.write_str(label)
    }
}

/// One accepted guess in a game's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub attempt: u32,
    pub guess: i64,
    pub hint: String,
    pub timestamp: DateTime<Utc>,
}

/// Full game record as held by the engine, target included
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub game_id: Uuid,
    pub player_name: String,
    pub difficulty: Difficulty,
    pub target_number: i64,
    pub min_range: i64,
    pub max_range: i64,
    pub max_attempts: u32,
    pub attempts: u32,
    pub guesses: Vec<GuessRecord>,
    pub status: GameStatus,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub score: Option<u32>,
}

impl Game {
    pub fn new(player_name: String, difficulty: Difficulty, target_number: i64) -> Self {
        let profile = difficulty.profile();
        Self {
            game_id: Uuid::new_v4(),
            player_name,
            difficulty,
            target_number,
            min_range: profile.min,
            max_range: profile.max,
            max_attempts: profile.max_attempts,
            attempts: 0,
            guesses: Vec::new(),
            status: GameStatus::Active,
            started_at: Utc::now(),
            ended_at: None,
            score: None,
        }
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts)
    }

    pub fn contains(&self, guess: i64) -> bool {
        (self.min_range..=self.max_range).contains(&guess)
    }

    /// Caller-facing projection. Target and score stay hidden until the game ends.
    pub fn view(&self) -> GameView {
        let revealed = self.status.is_terminal();
        GameView {
            game_id: self.game_id,
            player_name: self.player_name.clone(),
            difficulty: self.difficulty,
            status: self.status,
            attempts: self.attempts,
            max_attempts: self.max_attempts,
            guesses: self.guesses.clone(),
            target_number: revealed.then_some(self.target_number),
            score: if revealed { Some(self.score.unwrap_or(0)) } else { None },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameView {
    pub game_id: Uuid,
    pub player_name: String,
    pub difficulty: Difficulty,
    pub status: GameStatus,
    pub attempts: u32,
    pub max_attempts: u32,
    pub guesses: Vec<GuessRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

/// Record of one won game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub difficulty: Difficulty,
    pub attempts: u32,
    pub score: u32,
    pub completed_at: DateTime<Utc>,
}

/// Aggregate counts over every game the engine has created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Stats {
    pub total_games: usize,
    pub active_games: usize,
    pub completed_games: usize,
    pub won_games: usize,
    pub lost_games: usize,
    pub win_rate: f64,
}

impl Stats {
    pub fn from_games<'a>(games: impl IntoIterator<Item = &'a Game>) -> Self {
        let mut stats = Stats::default();
        for game in games {
            stats.total_games += 1;
            match game.status {
                GameStatus::Active => stats.active_games += 1,
                GameStatus::Won => stats.won_games += 1,
                GameStatus::Lost => stats.lost_games += 1,
            }
        }
        stats.completed_games = stats.won_games + stats.lost_games;
        stats.win_rate = win_rate(stats.won_games, stats.completed_games);
        stats
    }
}

/// Percentage of completed games that were won, to two decimal places.
pub fn win_rate(won: usize, completed: usize) -> f64 {
    if completed == 0 {
        return 0.0;
    }
    let percent = won as f64 / completed as f64 * 100.0;
    (percent * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_difficulty_defaults_to_medium() {
        assert_eq!(Difficulty::parse(None), Ok(Difficulty::Medium));
    }

    #[test]
    fn test_parse_difficulty_ignores_case() {
        assert_eq!(Difficulty::parse(Some("EASY")), Ok(Difficulty::Easy));
        assert_eq!(Difficulty::parse(Some("Hard")), Ok(Difficulty::Hard));
    }

    #[test]
    fn test_parse_difficulty_rejects_unknown_name() {
        let err = Difficulty::parse(Some("nightmare")).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidDifficulty {
                valid_options: vec!["easy", "medium", "hard"]
            }
        );
    }

    #[test]
    fn test_profiles_match_table() {
        assert_eq!(Difficulty::Easy.profile(), DifficultyProfile { min: 1, max: 50, max_attempts: 10, base_score: 100 });
        assert_eq!(Difficulty::Medium.profile(), DifficultyProfile { min: 1, max: 100, max_attempts: 7, base_score: 200 });
        assert_eq!(Difficulty::Hard.profile(), DifficultyProfile { min: 1, max: 200, max_attempts: 5, base_score: 300 });
    }

    #[test]
    fn test_view_hides_target_while_active() {
        let game = Game::new("Alice".to_string(), Difficulty::Easy, 25);
        let json = serde_json::to_value(game.view()).unwrap();

        assert!(json.get("target_number").is_none());
        assert!(json.get("score").is_none());
        assert_eq!(json["status"], "active");
        assert_eq!(json["difficulty"], "easy");
    }

    #[test]
    fn test_view_reveals_target_once_lost() {
        let mut game = Game::new("Alice".to_string(), Difficulty::Easy, 25);
        game.status = GameStatus::Lost;
        game.score = Some(0);
        let json = serde_json::to_value(game.view()).unwrap();

        assert_eq!(json["target_number"], 25);
        assert_eq!(json["score"], 0);
    }

    #[test]
    fn test_win_rate() {
        assert_eq!(win_rate(0, 0), 0.0);
        assert_eq!(win_rate(3, 4), 75.0);
        assert_eq!(win_rate(1, 3), 33.33);
        assert_eq!(win_rate(2, 3), 66.67);
    }
}
