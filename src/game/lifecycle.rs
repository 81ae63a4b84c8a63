//! Start, pause and mode transitions

use rand::Rng;
use tracing::info;

use super::engine::GameEngine;
use super::state::{GameMode, GameState, GameStatus};

impl<R: Rng> GameEngine<R> {
    /// Start a fresh run from idle or game over, or resume a paused one
    pub fn start_game(&mut self, state: GameState) -> GameState {
        match state.status {
            GameStatus::Idle | GameStatus::GameOver => {
                let fresh = self.initial_state(state.mode);
                info!(mode = %fresh.mode, "Game started");
                GameState {
                    status: GameStatus::Playing,
                    ..fresh
                }
            }
            GameStatus::Paused => GameState {
                status: GameStatus::Playing,
                ..state
            },
            GameStatus::Playing => state,
        }
    }

    pub fn pause_game(&self, state: GameState) -> GameState {
        if !state.is_playing() {
            return state;
        }

        GameState {
            status: GameStatus::Paused,
            ..state
        }
    }

    pub fn toggle_pause(&mut self, state: GameState) -> GameState {
        match state.status {
            GameStatus::Playing => self.pause_game(state),
            GameStatus::Paused => self.start_game(state),
            GameStatus::Idle | GameStatus::GameOver => state,
        }
    }

    /// Switch topology. Only allowed while idle or game over, and always
    /// resets to a fresh idle state under the new mode.
    pub fn set_game_mode(&mut self, state: GameState, mode: GameMode) -> GameState {
        if !state.status.allows_mode_change() {
            return state;
        }

        self.initial_state(mode)
    }
}

#[cfg(test)]
mod tests {
    use crate::game::{Direction, GameConfig, Position, Snake};

    use super::*;

    fn engine() -> GameEngine {
        GameEngine::with_seed(GameConfig::default(), 9).unwrap()
    }

    fn started(engine: &mut GameEngine) -> GameState {
        let idle = engine.initial_state(GameMode::Walls);
        engine.start_game(idle)
    }

    fn canonical_snake() -> Snake {
        Snake::from_segments(vec![
            Position::new(10, 10),
            Position::new(9, 10),
            Position::new(8, 10),
        ])
    }

    #[test]
    fn test_start_from_idle() {
        let mut engine = engine();
        let state = engine.initial_state(GameMode::Walls);

        let state = engine.start_game(state);

        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake, canonical_snake());
    }

    #[test]
    fn test_restart_from_game_over_resets_run() {
        let mut engine = engine();
        let state = engine.initial_state(GameMode::PassThrough);
        let state = GameState {
            status: GameStatus::GameOver,
            score: 100,
            speed: 60,
            snake: Snake::from_segments(vec![Position::new(1, 1)]),
            direction: Direction::Up,
            next_direction: Direction::Up,
            ..state
        };

        let state = engine.start_game(state);

        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, 150);
        assert_eq!(state.mode, GameMode::PassThrough);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.snake, canonical_snake());
    }

    #[test]
    fn test_resume_keeps_progress() {
        let mut engine = engine();
        let state = started(&mut engine);
        let state = GameState {
            score: 30,
            ..state
        };

        let paused = engine.pause_game(state.clone());
        assert_eq!(paused.status, GameStatus::Paused);

        let resumed = engine.start_game(paused);
        assert_eq!(resumed, state);
    }

    #[test]
    fn test_start_while_playing_is_noop() {
        let mut engine = engine();
        let state = started(&mut engine);
        let state = GameState { score: 20, ..state };

        assert_eq!(engine.start_game(state.clone()), state);
    }

    #[test]
    fn test_pause_only_from_playing() {
        let mut engine = engine();
        let idle = engine.initial_state(GameMode::Walls);
        assert_eq!(engine.pause_game(idle.clone()), idle);

        let over = GameState {
            status: GameStatus::GameOver,
            ..idle
        };
        assert_eq!(engine.pause_game(over.clone()), over);
    }

    #[test]
    fn test_toggle_pause() {
        let mut engine = engine();
        let state = started(&mut engine);

        let state = engine.toggle_pause(state);
        assert_eq!(state.status, GameStatus::Paused);

        let state = engine.toggle_pause(state);
        assert_eq!(state.status, GameStatus::Playing);
    }

    #[test]
    fn test_toggle_pause_ignored_when_stopped() {
        let mut engine = engine();
        let idle = engine.initial_state(GameMode::Walls);
        assert_eq!(engine.toggle_pause(idle.clone()).status, GameStatus::Idle);

        let over = GameState {
            status: GameStatus::GameOver,
            ..idle
        };
        assert_eq!(engine.toggle_pause(over).status, GameStatus::GameOver);
    }

    #[test]
    fn test_set_mode_when_idle() {
        let mut engine = engine();
        let state = engine.initial_state(GameMode::Walls);

        let state = engine.set_game_mode(state, GameMode::PassThrough);

        assert_eq!(state.mode, GameMode::PassThrough);
        assert_eq!(state.status, GameStatus::Idle);
    }

    #[test]
    fn test_set_mode_after_game_over_resets() {
        let mut engine = engine();
        let state = engine.initial_state(GameMode::Walls);
        let state = GameState {
            status: GameStatus::GameOver,
            score: 70,
            ..state
        };

        let state = engine.set_game_mode(state, GameMode::PassThrough);

        assert_eq!(state.mode, GameMode::PassThrough);
        assert_eq!(state.status, GameStatus::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake, canonical_snake());
    }

    #[test]
    fn test_set_mode_ignored_while_running() {
        let mut engine = engine();
        let playing = started(&mut engine);

        let unchanged = engine.set_game_mode(playing.clone(), GameMode::PassThrough);
        assert_eq!(unchanged, playing);

        let paused = engine.pause_game(playing);
        let unchanged = engine.set_game_mode(paused.clone(), GameMode::PassThrough);
        assert_eq!(unchanged.mode, GameMode::Walls);
        assert_eq!(unchanged, paused);
    }
}
