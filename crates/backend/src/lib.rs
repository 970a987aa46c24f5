//! Number guesser HTTP backend
//!
//! Provides:
//! - REST API for starting games, guessing and reading game status
//! - Leaderboard and statistics endpoints
//! - JSON 404/405/500 fallbacks

pub mod config;
pub mod routes;

use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use guesser_core::GameEngine;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Debug, Default)]
pub struct AppState {
    pub engine: GameEngine,
}

impl AppState {
    pub fn new(engine: GameEngine) -> Self {
        Self { engine }
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(routes::health))
        // Game lifecycle
        .route("/game/start", post(routes::start_game))
        .route("/game/{id}/guess", post(routes::make_guess))
        .route("/game/{id}", get(routes::get_game))
        // Rankings
        .route("/leaderboard", get(routes::leaderboard))
        .route("/stats", get(routes::stats))
        .fallback(routes::not_found)
        .method_not_allowed_fallback(routes::method_not_allowed)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::new()
            .allow_origin(cors::Any)
            .allow_methods(cors::Any)
            .allow_headers(cors::Any))
        .layer(TraceLayer::new_for_http())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Request handler panicked: {}", detail);
    routes::internal_error().into_response()
}
