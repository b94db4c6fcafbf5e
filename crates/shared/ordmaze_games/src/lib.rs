//! Game sessions built on deterministic `ordmaze` seeding.
//!
//! Everything here is driven synchronously by the caller: a UI, a terminal
//! loop or a test feeds keys and ticks in, and reads state back out.

// Monotonic clock shim; `std::time::Instant` is not usable on wasm32.
pub(crate) mod time;

pub mod maze;
pub mod pellet;
pub mod snake;
pub mod sources;
pub mod stats;

pub use maze::{Key, MazeEvent, MazePhase, MazeSession};
pub use pellet::{pellet_for, pellet_position, Point};
pub use snake::{SnakeEvent, SnakeGame, SnakePhase, SnakeSim};
pub use sources::{identifiers_from_json, SourceError};
pub use stats::GameStats;
