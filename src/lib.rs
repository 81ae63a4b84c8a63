//! Snake Arcade - a terminal Snake game with a spectator autoplay mode
//!
//! This library provides:
//! - Core game logic as pure snapshot transitions (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Run timing (metrics module)
//! - A local score board (scoring module)
//! - Play and watch drivers (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod scoring;
