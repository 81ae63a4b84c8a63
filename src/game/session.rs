use rand::rngs::StdRng;
use rand::Rng;

use super::action::Action;
use super::engine::GameEngine;
use super::state::{GameMode, GameState, GameStatus};

/// What a tick did to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to report (still playing, or not running at all)
    Continued,
    /// The snake ate food; `speed` is the new tick period in milliseconds
    Ate { score: u32, speed: u64 },
    /// This tick moved the run from playing into game over
    GameOver { score: u32, mode: GameMode },
}

/// Single owner of the latest snapshot, driven by a run loop.
///
/// Each call hands the current snapshot to an engine transition and stores
/// the returned one, so readers always see a fully committed state.
pub struct GameSession<R = StdRng> {
    engine: GameEngine<R>,
    state: GameState,
}

impl<R: Rng> GameSession<R> {
    pub fn new(mut engine: GameEngine<R>, mode: GameMode) -> Self {
        let state = engine.initial_state(mode);
        Self { engine, state }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn engine(&self) -> &GameEngine<R> {
        &self.engine
    }

    /// Route a player command to the matching transition
    pub fn apply(&mut self, action: Action) {
        self.transition(|engine, state| match action {
            Action::Steer(direction) => engine.change_direction(state, direction),
            Action::Start => engine.start_game(state),
            Action::TogglePause => engine.toggle_pause(state),
            Action::SetMode(mode) => engine.set_game_mode(state, mode),
        });
    }

    /// One timer firing in play mode
    pub fn tick(&mut self) -> TickOutcome {
        self.advance(|engine, state| engine.move_snake(state))
    }

    /// One timer firing in spectator mode
    pub fn autoplay_tick(&mut self) -> TickOutcome {
        self.advance(|engine, state| engine.simulate_ai_move(state))
    }

    fn advance<F>(&mut self, step: F) -> TickOutcome
    where
        F: FnOnce(&mut GameEngine<R>, GameState) -> GameState,
    {
        let was_playing = self.state.is_playing();
        let score_before = self.state.score;
        self.transition(step);

        if was_playing && self.state.status == GameStatus::GameOver {
            TickOutcome::GameOver {
                score: self.state.score,
                mode: self.state.mode,
            }
        } else if self.state.score > score_before {
            TickOutcome::Ate {
                score: self.state.score,
                speed: self.state.speed,
            }
        } else {
            TickOutcome::Continued
        }
    }

    fn transition<F>(&mut self, step: F)
    where
        F: FnOnce(&mut GameEngine<R>, GameState) -> GameState,
    {
        let current = self.state.clone();
        self.state = step(&mut self.engine, current);
    }
}
