//! REST API routes

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use guesser_core::{
    GameError, GuessOutcome, GuessRequest, HealthResponse, LeaderboardResponse, StartGameRequest,
    StartGameResponse, Stats,
};
use serde_json::json;
use std::sync::Arc;
use crate::AppState;

/// Error returned by every handler; always rendered as a JSON object with an `error` field.
#[derive(Debug)]
pub enum ApiError {
    Game(GameError),
    Body(JsonRejection),
}

impl From<GameError> for ApiError {
    fn from(e: GameError) -> Self {
        ApiError::Game(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::Body(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            ApiError::Body(rejection) => {
                tracing::debug!("Rejected request body: {}", rejection.body_text());
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "Invalid JSON body"})),
                )
                    .into_response();
            }
            ApiError::Game(e) => e,
        };
        if !err.is_client_error() {
            tracing::error!("Request failed: {}", err);
        }

        match err {
            GameError::InvalidDifficulty { ref valid_options } => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": err.to_string(), "valid_options": valid_options})),
            )
                .into_response(),
            GameError::GameNotActive { status } => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": err.to_string(), "status": status})),
            )
                .into_response(),
            GameError::GameNotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({"error": err.to_string()})),
            )
                .into_response(),
            GameError::StatePoisoned => internal_error().into_response(),
            _ => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": err.to_string()})),
            )
                .into_response(),
        }
    }
}

pub fn internal_error() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Internal server error"})),
    )
}

pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Endpoint not found"})))
}

pub async fn method_not_allowed() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::METHOD_NOT_ALLOWED, Json(json!({"error": "Method not allowed"})))
}

pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        active_games: state.engine.game_count()?,
        timestamp: Utc::now(),
    }))
}

pub async fn start_game(
    State(state): State<Arc<AppState>>,
    body: Result<Json<StartGameRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StartGameResponse>), ApiError> {
    let Json(body) = body?;
    let game = state
        .engine
        .start_game(body.player_name.as_deref(), body.difficulty.as_deref())?;

    Ok((StatusCode::CREATED, Json(StartGameResponse::from(&game))))
}

pub async fn make_guess(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
    body: Result<Json<GuessRequest>, JsonRejection>,
) -> Result<Json<GuessOutcome>, ApiError> {
    // Unknown or finished games are reported before a bad body
    let status = state.engine.status_of(&game_id)?;
    if status.is_terminal() {
        return Err(GameError::GameNotActive { status }.into());
    }

    let Json(body) = body?;
    let outcome = state.engine.submit_guess(&game_id, &body.guess).map_err(|e| {
        tracing::debug!(game_id = %game_id, "Guess rejected: {}", e);
        e
    })?;

    Ok(Json(outcome))
}

pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
) -> Result<Json<guesser_core::GameView>, ApiError> {
    Ok(Json(state.engine.get_status(&game_id)?))
}

pub async fn leaderboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let (leaderboard, total_games) = state.engine.leaderboard()?;
    Ok(Json(LeaderboardResponse {
        leaderboard,
        total_games,
    }))
}

pub async fn stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Stats>, ApiError> {
    Ok(Json(state.engine.stats()?))
}
