//! # ordmaze
//!
//! Deterministic mazes from opaque identifiers (inscription ids, wallet
//! addresses, composite keys).
//!
//! The pipeline is one-shot and pure: identifier → [`seed::SeedPair`] →
//! [`prng::SeededRandom`] → [`maze::Grid`]. The same identifier and size give
//! the same walls on every call, in every process.
//!
//! ## Quick Start
//!
//! ```
//! use ordmaze::prelude::*;
//!
//! let grid = build_maze("test-inscription-id", 10).unwrap();
//! assert!(grid.is_perfect());
//! print!("{}", render_classic(&grid));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): `Serialize`/`Deserialize` for seeds, cells and grids
//!
//! ## Modules
//!
//! - [`seed`]: identifier fingerprinting
//! - [`prng`]: the two-lane xorshift generator
//! - [`maze`]: grid types and the carver
//! - [`render`]: text renderings

#[path = "core/seed.rs"]
pub mod seed;

#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/maze.rs"]
pub mod maze;

#[path = "core/render.rs"]
pub mod render;

/// Prelude module for convenient imports.
///
/// ```
/// use ordmaze::prelude::*;
/// ```
pub mod prelude {
    pub use crate::maze::{
        build_maze, build_maze_from_seeds, Cell, Direction, Grid, MazeError, Position,
    };
    pub use crate::prng::SeededRandom;
    pub use crate::render::{render, render_boxed, render_classic, RenderOptions, RenderStyle};
    pub use crate::seed::{derive_seeds, SeedPair};
}
