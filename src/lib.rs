//! # rust-2048
//!
//! A deterministic 2048 engine for human and automated players.
//!
//! ## Design Principles
//!
//! 1. **Pure Grid Engine**: `shift`, `spawn_tile` and `has_valid_move` take a
//!    board snapshot and return a new one. Nothing mutates in place.
//!
//! 2. **Explicit Turn State Machine**: `Game` moves between `Ready`, `Locked`
//!    and `Over`. Board changes happen only in a move's shift and in the
//!    spawn that follows it.
//!
//! 3. **Deterministic**: Every random decision draws from a seeded ChaCha8
//!    stream owned by the game, and the spawn delay runs on a virtual clock.
//!
//! ## Architecture
//!
//! - **Persistent Tile Arena**: Boards keep tiles in `im` maps keyed by a
//!   per-game monotonic id, so snapshots are O(1) clones.
//!
//! - **Generation Guard**: Deferred spawns carry the generation that
//!   scheduled them; a restart makes older spawns inert.
//!
//! ## Modules
//!
//! - `core`: Directions, tiles, positions, RNG, configuration, errors
//! - `grid`: Board snapshots and the shift/spawn/move-check operations
//! - `game`: Turn controller, events, telemetry, snapshots
//! - `advisor`: Move advisor contract and the random agent

pub mod core;
pub mod grid;
pub mod game;
pub mod advisor;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    AdvisorError, BoardError, Direction, GameConfig, GameError, GameRng, GameRngState, Position, Tile,
    TileId,
};

pub use crate::grid::{
    has_valid_move, legal_directions, shift, spawn_tile, Board, BoardMatrix, Merge, ShiftOutcome,
    Shifted,
};

pub use crate::game::{Game, GameEvent, GameSnapshot, MoveOutcome, Phase, RejectReason, Telemetry};

pub use crate::advisor::{AdvisedTurn, AdvisorRequest, AgentKind, MoveAdvisor, Proposal, RandomAdvisor};
