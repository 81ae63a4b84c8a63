use std::fmt;

use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Wrap both coordinates onto a square grid of the given size
    pub fn wrapped(&self, grid_size: usize) -> Self {
        let size = grid_size as i32;
        Self {
            x: self.x.rem_euclid(size),
            y: self.y.rem_euclid(size),
        }
    }
}

/// The snake's body, head first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
}

impl Snake {
    /// Create a snake whose body trails behind `head`, opposite to `direction`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body }
    }

    pub fn from_segments(body: Vec<Position>) -> Self {
        Self { body }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Every segment except the tail, i.e. the cells still occupied after a plain move
    pub fn without_tail(&self) -> &[Position] {
        &self.body[..self.body.len() - 1]
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (never true for a snake inside a game state)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Board topology
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Leaving the grid ends the game
    #[default]
    Walls,
    /// Leaving the grid re-enters on the opposite edge
    PassThrough,
}

impl GameMode {
    /// The other topology
    pub fn toggled(&self) -> GameMode {
        match self {
            GameMode::Walls => GameMode::PassThrough,
            GameMode::PassThrough => GameMode::Walls,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Walls => write!(f, "Walls"),
            GameMode::PassThrough => write!(f, "Pass-Through"),
        }
    }
}

/// Lifecycle state of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Idle,
    Playing,
    Paused,
    GameOver,
}

impl GameStatus {
    /// Whether the topology may be changed in this state
    pub fn allows_mode_change(&self) -> bool {
        matches!(self, GameStatus::Idle | GameStatus::GameOver)
    }
}

/// Why a run ended. Only reported through logs; the state records `GameOver` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Snake left the grid in walls mode
    Wall,
    /// Snake ran into its own body
    SelfCollision,
    /// No free cell would remain for food
    BoardFull,
}

/// Complete game state. Transitions consume a snapshot and return the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    /// Heading applied on the last move
    pub direction: Direction,
    /// Buffered heading for the next move
    pub next_direction: Direction,
    pub score: u32,
    pub status: GameStatus,
    pub mode: GameMode,
    pub grid_size: usize,
    /// Tick interval in milliseconds
    pub speed: u64,
}

impl GameState {
    pub fn head(&self) -> Position {
        self.snake.head()
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = self.grid_size as i32;
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.contains(pos)
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }
}
