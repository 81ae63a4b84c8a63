//! Greedy food-seeking controller for spectator mode
//!
//! The controller looks only at the head, the food and the current heading.
//! It does not plan around its own body, so it dies regularly; a small
//! exploration rate keeps it from circling the same path forever.

use rand::seq::SliceRandom;
use rand::Rng;

use super::action::Direction;
use super::engine::GameEngine;
use super::state::GameState;

/// Directions reachable from `current` without reversing
pub fn valid_directions(current: Direction) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|direction| !current.is_opposite(*direction))
        .collect()
}

/// Close the horizontal gap to food first, then the vertical one.
///
/// Falls back to the first valid direction when no food-seeking turn is allowed.
pub fn greedy_direction(state: &GameState, valid: &[Direction]) -> Direction {
    let head = state.head();
    let food = state.food;
    let allowed = |direction: Direction| valid.contains(&direction);

    if food.x > head.x && allowed(Direction::Right) {
        Direction::Right
    } else if food.x < head.x && allowed(Direction::Left) {
        Direction::Left
    } else if food.y > head.y && allowed(Direction::Down) {
        Direction::Down
    } else if food.y < head.y && allowed(Direction::Up) {
        Direction::Up
    } else {
        valid[0]
    }
}

/// Pick the next heading: greedy, except with probability `exploration_rate`
/// a uniformly random valid turn
pub fn choose_direction<R: Rng + ?Sized>(
    state: &GameState,
    rng: &mut R,
    exploration_rate: f64,
) -> Direction {
    let valid = valid_directions(state.direction);
    let greedy = greedy_direction(state, &valid);

    if rng.gen_bool(exploration_rate) {
        return valid.choose(rng).copied().unwrap_or(greedy);
    }

    greedy
}

impl<R: Rng> GameEngine<R> {
    /// Steer with the autoplay controller, then advance one tick
    pub fn simulate_ai_move(&mut self, state: GameState) -> GameState {
        if !state.is_playing() {
            return state;
        }

        let direction = choose_direction(&state, &mut self.rng, self.config.ai_exploration_rate);
        let state = self.change_direction(state, direction);
        self.move_snake(state)
    }
}
