use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest grid the engine accepts; keeps coordinates comfortably inside `i32`
pub const MAX_GRID_SIZE: usize = 256;

/// Errors raised while loading or validating a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("initial snake length must be at least 1")]
    EmptySnake,

    /// The centered starting snake or its food would not fit
    #[error("grid size {grid_size} cannot host a centered snake of length {snake_length}")]
    GridTooSmall {
        grid_size: usize,
        snake_length: usize,
    },

    #[error("grid size {0} exceeds the maximum of {max}", max = MAX_GRID_SIZE)]
    GridTooLarge(usize),

    #[error("speed range is invalid: min {min_ms}ms must be between 1ms and initial {initial_ms}ms")]
    InvalidSpeedRange { min_ms: u64, initial_ms: u64 },

    #[error("autoplay exploration rate {0} must be within [0, 1]")]
    InvalidExplorationRate(f64),
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square game grid
    pub grid_size: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    // Pace
    /// Tick interval at the start of a run, in milliseconds
    pub initial_speed_ms: u64,
    /// Fastest tick interval a run can reach
    pub min_speed_ms: u64,
    /// Interval reduction applied each time food is eaten
    pub speed_increment_ms: u64,

    /// Points awarded per food
    pub points_per_food: u32,

    // Spectator
    /// Probability that autoplay ignores the greedy choice for a random valid turn
    pub ai_exploration_rate: f64,
    /// Spectator tick interval at normal speed
    pub spectator_tick_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_snake_length: 3,
            initial_speed_ms: 150,
            min_speed_ms: 50,
            speed_increment_ms: 5,
            points_per_food: 10,
            ai_exploration_rate: 0.1,
            spectator_tick_ms: 150,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Load a TOML config file; missing keys fall back to defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: GameConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Reject configurations the engine cannot start a game on.
    ///
    /// The initial snake is placed with its head at `grid_size / 2` and its
    /// body extending toward x = 0, so the grid must be wide enough for the
    /// whole body to the left of the center, and must leave at least one
    /// free cell for food.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_snake_length == 0 {
            return Err(ConfigError::EmptySnake);
        }

        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge(self.grid_size));
        }

        let center = self.grid_size / 2;
        let cells = self.grid_size * self.grid_size;
        if center + 1 < self.initial_snake_length || cells <= self.initial_snake_length {
            return Err(ConfigError::GridTooSmall {
                grid_size: self.grid_size,
                snake_length: self.initial_snake_length,
            });
        }

        if self.min_speed_ms == 0 || self.min_speed_ms > self.initial_speed_ms {
            return Err(ConfigError::InvalidSpeedRange {
                min_ms: self.min_speed_ms,
                initial_ms: self.initial_speed_ms,
            });
        }

        if !(0.0..=1.0).contains(&self.ai_exploration_rate) {
            return Err(ConfigError::InvalidExplorationRate(self.ai_exploration_rate));
        }

        Ok(())
    }
}
