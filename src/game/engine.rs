use super::{
    action::Direction,
    config::{ConfigError, GameConfig},
    food::generate_food,
    state::{GameMode, GameOverCause, GameState, GameStatus, Position, Snake},
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// The game engine that handles all game logic.
///
/// The engine owns configuration and a random source, never a game state:
/// every transition takes the current snapshot by value and returns the next
/// one. Calling a transition in a state where it does not apply returns the
/// snapshot unchanged.
pub struct GameEngine<R = StdRng> {
    pub(super) config: GameConfig,
    pub(super) rng: R,
}

impl GameEngine<StdRng> {
    /// Create an engine seeded from OS entropy
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine with a reproducible random source
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine drawing randomness from `rng`. Fails if the config
    /// cannot host a game.
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Canonical idle start state for `mode`
    pub fn initial_state(&mut self, mode: GameMode) -> GameState {
        let center = (self.config.grid_size / 2) as i32;

        let snake = Snake::new(
            Position::new(center, center),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let food = generate_food(&mut self.rng, &snake, self.config.grid_size)
            .expect("validated config always leaves a free cell beside the initial snake");

        GameState {
            snake,
            food,
            direction: Direction::Right,
            next_direction: Direction::Right,
            score: 0,
            status: GameStatus::Idle,
            mode,
            grid_size: self.config.grid_size,
            speed: self.config.initial_speed_ms,
        }
    }

    /// Advance the snake one cell along its buffered direction
    pub fn move_snake(&mut self, state: GameState) -> GameState {
        if !state.is_playing() {
            return state;
        }

        let direction = state.next_direction;
        let mut new_head = state.head().moved_in_direction(direction);

        match state.mode {
            GameMode::Walls => {
                if !state.is_in_bounds(new_head) {
                    return end_game(state, GameOverCause::Wall);
                }
            }
            GameMode::PassThrough => new_head = new_head.wrapped(state.grid_size),
        }

        let will_eat = new_head == state.food;

        // The tail vacates its cell this tick unless the snake grows
        let blocking = if will_eat {
            state.snake.body.as_slice()
        } else {
            state.snake.without_tail()
        };
        if blocking.contains(&new_head) {
            return end_game(state, GameOverCause::SelfCollision);
        }

        let mut body = Vec::with_capacity(state.snake.len() + 1);
        body.push(new_head);
        body.extend_from_slice(&state.snake.body);
        if !will_eat {
            body.pop();
        }
        let snake = Snake::from_segments(body);

        if !will_eat {
            return GameState {
                snake,
                direction,
                ..state
            };
        }

        let Some(food) = generate_food(&mut self.rng, &snake, state.grid_size) else {
            return end_game(state, GameOverCause::BoardFull);
        };

        let score = state.score + self.config.points_per_food;
        let speed = state
            .speed
            .saturating_sub(self.config.speed_increment_ms)
            .max(self.config.min_speed_ms);

        debug!(
            x = new_head.x,
            y = new_head.y,
            score,
            speed,
            length = snake.len(),
            "Snake ate food"
        );

        GameState {
            snake,
            food,
            direction,
            score,
            speed,
            ..state
        }
    }

    /// Buffer a new heading for the next move; reversals are ignored
    pub fn change_direction(&self, state: GameState, new_direction: Direction) -> GameState {
        if !state.is_playing() || state.direction.is_opposite(new_direction) {
            return state;
        }

        GameState {
            next_direction: new_direction,
            ..state
        }
    }
}

fn end_game(state: GameState, cause: GameOverCause) -> GameState {
    info!(
        score = state.score,
        length = state.snake.len(),
        mode = %state.mode,
        ?cause,
        "Game over"
    );

    GameState {
        status: GameStatus::GameOver,
        ..state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GameEngine {
        GameEngine::with_seed(GameConfig::default(), 42).unwrap()
    }

    fn playing(mut state: GameState) -> GameState {
        state.status = GameStatus::Playing;
        state
    }

    #[test]
    fn test_initial_state() {
        let mut engine = engine();
        let state = engine.initial_state(GameMode::Walls);

        assert_eq!(state.status, GameStatus::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, 150);
        assert_eq!(state.grid_size, 20);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.next_direction, Direction::Right);
        assert_eq!(
            state.snake.body,
            vec![
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10)
            ]
        );
        assert!(!state.is_occupied_by_snake(state.food));
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(GameEngine::new(GameConfig::new(2)).is_err());
    }

    #[test]
    fn test_move_is_noop_unless_playing() {
        let mut engine = engine();
        let idle = engine.initial_state(GameMode::Walls);

        for status in [GameStatus::Idle, GameStatus::Paused, GameStatus::GameOver] {
            let state = GameState {
                status,
                ..idle.clone()
            };
            assert_eq!(engine.move_snake(state.clone()), state);
        }
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine();
        let mut state = playing(engine.initial_state(GameMode::Walls));
        state.food = Position::new(0, 0);

        let state = engine.move_snake(state);

        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(
            state.snake.body,
            vec![
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10)
            ]
        );
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, 150);
    }

    #[test]
    fn test_buffered_direction_applied_on_move() {
        let mut engine = engine();
        let mut state = playing(engine.initial_state(GameMode::Walls));
        state.food = Position::new(0, 0);

        let state = engine.change_direction(state, Direction::Up);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.next_direction, Direction::Up);

        let state = engine.move_snake(state);
        assert_eq!(state.head(), Position::new(10, 9));
        assert_eq!(state.direction, Direction::Up);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine();
        let mut state = playing(engine.initial_state(GameMode::Walls));
        state.food = state.head().moved_in_direction(Direction::Right);
        let initial_length = state.snake.len();

        let state = engine.move_snake(state);

        assert_eq!(state.score, 10);
        assert_eq!(state.snake.len(), initial_length + 1);
        assert_eq!(state.speed, 145);
        assert_eq!(state.head(), Position::new(11, 10));
        assert!(!state.is_occupied_by_snake(state.food));
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_speed_never_drops_below_minimum() {
        let mut engine = engine();
        let mut state = playing(engine.initial_state(GameMode::Walls));
        state.speed = 52;
        state.food = state.head().moved_in_direction(Direction::Right);

        let state = engine.move_snake(state);
        assert_eq!(state.speed, 50);

        let mut state = state;
        state.food = state.head().moved_in_direction(Direction::Right);
        let state = engine.move_snake(state);
        assert_eq!(state.speed, 50);
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = engine();
        let mut state = playing(engine.initial_state(GameMode::Walls));
        state.snake = Snake::from_segments(vec![Position::new(19, 10)]);
        let before = state.clone();

        let state = engine.move_snake(state);

        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.snake, before.snake);
        assert_eq!(state.food, before.food);
        assert_eq!(state.score, before.score);
    }

    #[test]
    fn test_wall_collision_on_every_edge() {
        let mut engine = engine();
        let base = playing(engine.initial_state(GameMode::Walls));
        let cases = [
            (Position::new(0, 4), Direction::Left),
            (Position::new(4, 0), Direction::Up),
            (Position::new(4, 19), Direction::Down),
            (Position::new(19, 4), Direction::Right),
        ];

        for (head, direction) in cases {
            let state = GameState {
                snake: Snake::from_segments(vec![head]),
                food: Position::new(10, 10),
                direction,
                next_direction: direction,
                ..base.clone()
            };
            let state = engine.move_snake(state);
            assert_eq!(state.status, GameStatus::GameOver, "{direction:?}");
        }
    }

    #[test]
    fn test_pass_through_wraps() {
        let mut engine = engine();
        let mut state = playing(engine.initial_state(GameMode::PassThrough));
        state.snake = Snake::from_segments(vec![Position::new(19, 10), Position::new(18, 10)]);
        state.food = Position::new(5, 5);

        let state = engine.move_snake(state);

        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.head(), Position::new(0, 10));
        assert_eq!(state.snake.tail(), Position::new(19, 10));
    }

    #[test]
    fn test_pass_through_keeps_head_in_bounds() {
        let mut engine = engine();
        let mut state = playing(engine.initial_state(GameMode::PassThrough));
        state.snake = Snake::from_segments(vec![Position::new(3, 0)]);
        state.food = Position::new(15, 15);

        let state = engine.change_direction(state, Direction::Up);
        let state = engine.move_snake(state);
        assert_eq!(state.head(), Position::new(3, 19));

        let mut state = state;
        for _ in 0..45 {
            state = engine.move_snake(state);
            assert!(state.is_in_bounds(state.head()));
            assert_eq!(state.status, GameStatus::Playing);
        }
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine();
        let mut state = playing(engine.initial_state(GameMode::Walls));
        state.snake = Snake::from_segments(vec![
            Position::new(5, 5),
            Position::new(6, 5),
            Position::new(6, 4),
            Position::new(5, 4),
            Position::new(4, 4),
            Position::new(4, 5),
        ]);
        state.food = Position::new(15, 15);
        // (5, 4) is a mid-body segment, not the vacating tail
        state.direction = Direction::Left;
        state.next_direction = Direction::Up;
        let before = state.clone();

        let state = engine.move_snake(state);

        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.snake, before.snake);
        assert_eq!(state.food, before.food);
    }

    #[test]
    fn test_moving_into_vacating_tail_is_allowed() {
        let mut engine = engine();
        let mut state = playing(engine.initial_state(GameMode::Walls));
        // 2x2 loop: head (5,5) moving up into the tail at (5,4)
        state.snake = Snake::from_segments(vec![
            Position::new(5, 5),
            Position::new(6, 5),
            Position::new(6, 4),
            Position::new(5, 4),
        ]);
        state.food = Position::new(15, 15);
        state.direction = Direction::Left;
        state.next_direction = Direction::Up;

        let state = engine.move_snake(state);

        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.head(), Position::new(5, 4));
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_eating_into_tail_cell_collides() {
        let mut engine = engine();
        let mut state = playing(engine.initial_state(GameMode::Walls));
        state.snake = Snake::from_segments(vec![
            Position::new(5, 5),
            Position::new(6, 5),
            Position::new(6, 4),
            Position::new(5, 4),
        ]);
        // food cannot normally sit on the snake; forcing it makes the tail stay put
        state.food = Position::new(5, 4);
        state.direction = Direction::Left;
        state.next_direction = Direction::Up;

        let state = engine.move_snake(state);
        assert_eq!(state.status, GameStatus::GameOver);
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = engine();
        let state = playing(engine.initial_state(GameMode::Walls));

        let state = engine.change_direction(state, Direction::Left);

        assert_eq!(state.next_direction, Direction::Right);
    }

    #[test]
    fn test_last_buffered_direction_wins() {
        let mut engine = engine();
        let state = playing(engine.initial_state(GameMode::Walls));

        let state = engine.change_direction(state, Direction::Up);
        let state = engine.change_direction(state, Direction::Down);

        assert_eq!(state.next_direction, Direction::Down);
    }

    #[test]
    fn test_change_direction_ignored_unless_playing() {
        let mut engine = engine();
        let state = engine.initial_state(GameMode::Walls);

        let state = engine.change_direction(state, Direction::Up);

        assert_eq!(state.next_direction, Direction::Right);
    }

    #[test]
    fn test_filling_the_board_ends_the_game() {
        let config = GameConfig {
            grid_size: 2,
            initial_snake_length: 1,
            ..Default::default()
        };
        let mut engine = GameEngine::with_seed(config, 1).unwrap();
        let mut state = playing(engine.initial_state(GameMode::Walls));
        state.snake = Snake::from_segments(vec![
            Position::new(0, 0),
            Position::new(0, 1),
            Position::new(1, 1),
        ]);
        state.food = Position::new(1, 0);
        state.direction = Direction::Up;
        state.next_direction = Direction::Right;
        let before = state.clone();

        let state = engine.move_snake(state);

        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.snake, before.snake);
        assert_eq!(state.food, before.food);
        assert_eq!(state.score, before.score);
    }
}
