//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O, clock or rendering
//! dependencies. Every transition consumes a [`GameState`] snapshot and returns
//! the next one, so the same rules serve human play and spectator autoplay.

pub mod action;
pub mod autoplay;
pub mod config;
pub mod engine;
pub mod food;
pub mod lifecycle;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{ConfigError, GameConfig};
pub use engine::GameEngine;
pub use food::generate_food;
pub use session::{GameSession, TickOutcome};
pub use state::{GameMode, GameOverCause, GameState, GameStatus, Position, Snake};
