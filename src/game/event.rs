//! Events emitted by the controller for a presentation layer.
//!
//! The controller queues events as it processes commands; consumers drain
//! them with [`Game::drain_events`](super::Game::drain_events). Events are
//! informational only: the board snapshot is always the source of truth.

use serde::{Deserialize, Serialize};

use crate::advisor::AgentKind;
use crate::core::{Direction, Position, Tile, TileId};

/// Why a requested move did not change the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// A spawn from the previous move is still pending.
    Locked,
    /// The game has ended.
    Over,
    /// The shift would not move any tile.
    NoMove,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::Locked => write!(f, "locked"),
            RejectReason::Over => write!(f, "game over"),
            RejectReason::NoMove => write!(f, "no tile moved"),
        }
    }
}

/// Something that happened in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The board was cleared and a new generation began.
    Restarted { generation: u64 },
    /// A tile was placed on the board.
    TileSpawned { tile: Tile },
    /// Two tiles merged; `consumed` is now flagged removed.
    TilesMerged {
        survivor: TileId,
        consumed: TileId,
        value: u32,
        position: Position,
    },
    /// A move was refused or had no effect.
    MoveRejected {
        direction: Direction,
        reason: RejectReason,
    },
    /// The game reached a terminal state.
    GameOver { won: bool },
    /// The source of moves changed.
    AgentChanged { agent: AgentKind },
}
