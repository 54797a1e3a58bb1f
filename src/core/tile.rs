//! Tile identification and grid positions.
//!
//! Every tile that ever appears on a board has a unique `TileId`. Ids are
//! handed out by the board's arena from a monotonic counter and are
//! preserved across moves and merges until the tile is removed, so a
//! presentation layer can key animations on them.
//!
//! ## Usage
//!
//! ```
//! use rust_2048::core::{Position, Tile, TileId};
//!
//! let tile = Tile::spawned(TileId(3), 2, Position::new(1, 2));
//! assert!(tile.just_spawned);
//! assert_eq!(tile.position.index(), 6);
//! assert!(tile.is_live());
//! ```

use serde::{Deserialize, Serialize};

/// Side length of the board.
pub const GRID_SIZE: usize = 4;

/// Number of cells on the board.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Unique identifier for a tile within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// A (row, column) cell, each coordinate in `0..4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub column: u8,
}

impl Position {
    /// Create a position. Coordinates are not range-checked here; use
    /// [`Position::checked`] for untrusted input.
    #[must_use]
    pub const fn new(row: u8, column: u8) -> Self {
        Self { row, column }
    }

    /// Create a position, returning `None` if it falls outside the grid.
    #[must_use]
    pub const fn checked(row: u8, column: u8) -> Option<Self> {
        if (row as usize) < GRID_SIZE && (column as usize) < GRID_SIZE {
            Some(Self { row, column })
        } else {
            None
        }
    }

    /// Position of a row-major cell index (`0..16`).
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self {
            row: (index / GRID_SIZE) as u8,
            column: (index % GRID_SIZE) as u8,
        }
    }

    /// Row-major cell index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.row as usize * GRID_SIZE + self.column as usize
    }

    /// Column mirrored across the vertical axis.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        Self {
            row: self.row,
            column: (GRID_SIZE - 1) as u8 - self.column,
        }
    }

    /// All 16 cells in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELL_COUNT).map(Position::from_index)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// A numbered tile.
///
/// `removed` marks a tile consumed by a merge in the move that produced the
/// current board: it sits on the survivor's cell with the merged value so a
/// renderer can slide it in, and it is pruned by the next shift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    /// A power of two, 2 or greater.
    pub value: u32,
    pub position: Position,
    pub removed: bool,
    /// Set only on the newest spawned tile.
    pub just_spawned: bool,
}

impl Tile {
    /// A tile that was just placed by a spawn.
    #[must_use]
    pub const fn spawned(id: TileId, value: u32, position: Position) -> Self {
        Self {
            id,
            value,
            position,
            removed: false,
            just_spawned: true,
        }
    }

    /// A resting tile, not flagged as new.
    #[must_use]
    pub const fn resting(id: TileId, value: u32, position: Position) -> Self {
        Self {
            id,
            value,
            position,
            removed: false,
            just_spawned: false,
        }
    }

    /// True unless the tile was consumed by a merge.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        !self.removed
    }
}
