//! The grid engine: board snapshots and the pure operations on them.
//!
//! - `shift`: slide and merge in a direction, or report `NoMove`
//! - `spawn_tile`: place a 2 or 4 on a random empty cell
//! - `has_valid_move`: whether any shift would change the board
//!
//! None of these mutate their input; each returns a new `Board`.

mod board;
mod moves;
mod shift;
mod spawn;

pub use board::{Board, BoardMatrix};
pub use moves::{has_valid_move, legal_directions};
pub use shift::{shift, Merge, ShiftOutcome, Shifted};
pub use spawn::spawn_tile;
