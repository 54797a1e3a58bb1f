use thiserror::Error;

use super::direction::Direction;
use super::tile::{Position, TileId};

/// Errors surfaced by the game controller.
///
/// Rejected moves are not errors; they come back as
/// [`MoveOutcome`](crate::game::MoveOutcome) values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid direction {0:?}, expected UP, DOWN, LEFT or RIGHT")]
    InvalidDirection(String),
    #[error("game is not accepting moves")]
    NotReady,
    #[error("move advisor gave up after {attempts} attempts (avoided: {avoided:?})")]
    AdvisorExhausted {
        attempts: u32,
        avoided: Vec<Direction>,
    },
    #[error("snapshot encoding failed: {0}")]
    Snapshot(String),
    #[error("inconsistent snapshot: {0}")]
    InvalidSnapshot(String),
    #[error("snapshot violates board invariants: {0}")]
    Board(#[from] BoardError),
}

/// A broken board invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("duplicate tile id {0}")]
    DuplicateId(TileId),
    #[error("{id} stored under key {key}")]
    MisfiledTile { key: TileId, id: TileId },
    #[error("{id} was never allocated (next id {next_id})")]
    Unallocated { id: TileId, next_id: u32 },
    #[error("{id} is off the grid at {position}")]
    OffGrid { id: TileId, position: Position },
    #[error("{id} has invalid value {value}")]
    InvalidValue { id: TileId, value: u32 },
    #[error("two live tiles share {0}")]
    SharedCell(Position),
}

/// Failures reported by a [`MoveAdvisor`](crate::advisor::MoveAdvisor).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    #[error("advisor transport failed: {0}")]
    Transport(String),
    #[error("advisor response could not be parsed: {0}")]
    Unparsable(String),
    #[error("advisor proposed an invalid direction {0:?}")]
    InvalidDirection(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
