//! Core game logic for the number guesser
//!
//! This crate contains:
//! - Data models for games, guesses and the leaderboard
//! - Hint and scoring rules
//! - The in-memory game engine
//! - HTTP request/response bodies
//! - Error types

pub mod models;
pub mod rules;
pub mod engine;
pub mod messages;
pub mod error;

pub use models::*;
pub use engine::*;
pub use messages::*;
pub use error::*;
