//! Core types: directions, tiles, positions, RNG, configuration, errors.
//!
//! Everything else in the crate builds on these; none of them know about
//! boards or turns.

pub mod config;
pub mod direction;
pub mod error;
pub mod rng;
pub mod tile;

pub use config::GameConfig;
pub use direction::Direction;
pub use error::{AdvisorError, BoardError, GameError, Result};
pub use rng::{GameRng, GameRngState};
pub use tile::{Position, Tile, TileId, CELL_COUNT, GRID_SIZE};
