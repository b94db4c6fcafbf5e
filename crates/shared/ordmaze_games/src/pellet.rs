//! Deterministic pellet placement.
//!
//! Pellet `n` for an asset is always in the same place: the position is drawn
//! from a generator seeded with `"{asset}:{n}"`. Only when that cell is taken
//! does a second, salted generator search for a free one.

use ordmaze::prng::SeededRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

fn draw_point(rng: &mut SeededRandom, grid_size: u32) -> Point {
    let g = grid_size as usize;
    let x = rng.pick_index(g) as i32;
    let y = rng.pick_index(g) as i32;
    Point { x, y }
}

/// The primary candidate for pellet `pellet_number`, ignoring the snake.
pub fn pellet_for(asset_id: &str, pellet_number: u32, grid_size: u32) -> Point {
    let mut rng = SeededRandom::from_identifier(&format!("{asset_id}:{pellet_number}"));
    draw_point(&mut rng, grid_size)
}

/// Pellet position avoiding occupied cells.
///
/// Falls back to up to `grid_size²` draws from the `":fallback"`-salted
/// generator; if every draw lands on an occupied cell the primary candidate
/// is returned anyway.
pub fn pellet_position(
    asset_id: &str,
    pellet_number: u32,
    grid_size: u32,
    is_occupied: impl Fn(Point) -> bool,
) -> Point {
    let candidate = pellet_for(asset_id, pellet_number, grid_size);
    if !is_occupied(candidate) {
        return candidate;
    }

    let mut rng =
        SeededRandom::from_identifier(&format!("{asset_id}:{pellet_number}:fallback"));
    let attempts = (grid_size as usize).saturating_mul(grid_size as usize);
    for _ in 0..attempts {
        let p = draw_point(&mut rng, grid_size);
        if !is_occupied(p) {
            debug!(asset_id, pellet_number, x = p.x, y = p.y, "pellet fallback");
            return p;
        }
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden_pellets() {
        let id = "test-inscription-id";
        assert_eq!(pellet_for(id, 1, 20), Point::new(17, 5));
        assert_eq!(pellet_for(id, 2, 20), Point::new(2, 7));
        assert_eq!(pellet_for(id, 3, 20), Point::new(8, 19));
        assert_eq!(pellet_for("abc", 1, 20), Point::new(16, 4));
    }

    #[test]
    fn free_candidate_is_kept() {
        let p = pellet_position("test-inscription-id", 1, 20, |_| false);
        assert_eq!(p, Point::new(17, 5));
    }

    #[test]
    fn occupied_candidate_uses_fallback_stream() {
        let blocked = Point::new(17, 5);
        let p = pellet_position("test-inscription-id", 1, 20, |q| q == blocked);
        // First draw of "test-inscription-id:1:fallback".
        assert_eq!(p, Point::new(18, 3));

        let blocked = [Point::new(17, 5), Point::new(18, 3)];
        let p = pellet_position("test-inscription-id", 1, 20, |q| blocked.contains(&q));
        assert_eq!(p, Point::new(7, 18));
    }

    #[test]
    fn full_board_returns_primary_candidate() {
        let p = pellet_position("test-inscription-id", 1, 20, |_| true);
        assert_eq!(p, Point::new(17, 5));
    }

    #[test]
    fn pellets_stay_on_the_board() {
        for n in 1..200 {
            let p = pellet_for("bounds", n, 7);
            assert!((0..7).contains(&p.x) && (0..7).contains(&p.y));
        }
    }
}
