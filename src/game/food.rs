//! Food placement by rejection sampling

use rand::seq::SliceRandom;
use rand::Rng;

use super::state::{Position, Snake};

/// Rejected draws per grid cell before switching to an explicit free-cell scan
const REJECTIONS_PER_CELL: usize = 4;

/// Pick a uniformly random cell not covered by `snake`.
///
/// Draws random cells until one is free. A nearly full grid makes that slow,
/// so after a bounded number of misses the free cells are enumerated and one
/// is chosen directly; both paths are uniform over the free cells. Returns
/// `None` only when the snake covers the whole grid.
pub fn generate_food<R: Rng + ?Sized>(
    rng: &mut R,
    snake: &Snake,
    grid_size: usize,
) -> Option<Position> {
    if grid_size == 0 {
        return None;
    }

    let max_attempts = grid_size * grid_size * REJECTIONS_PER_CELL;
    for _ in 0..max_attempts {
        let x = rng.gen_range(0..grid_size) as i32;
        let y = rng.gen_range(0..grid_size) as i32;
        let pos = Position::new(x, y);

        if !snake.contains(pos) {
            return Some(pos);
        }
    }

    let free: Vec<Position> = (0..grid_size as i32)
        .flat_map(|y| (0..grid_size as i32).map(move |x| Position::new(x, y)))
        .filter(|pos| !snake.contains(*pos))
        .collect();

    free.choose(rng).copied()
}
