//! The 4x4 board as a persistent tile arena.
//!
//! A `Board` is an immutable snapshot: engine operations take `&Board` and
//! return a new one. Tiles live in an `im::OrdMap` keyed by id, so cloning a
//! board is O(1) and untouched tiles are shared between snapshots.
//!
//! Cell occupancy is derived from the positions of live tiles; there is no
//! separate grid to keep in sync.

use im::OrdMap;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{BoardError, Position, Tile, TileId, CELL_COUNT, GRID_SIZE};

/// Row-major value matrix, 0 for empty cells.
pub type BoardMatrix = [[u32; GRID_SIZE]; GRID_SIZE];

/// A snapshot of every tile on the board.
///
/// Tiles consumed by the most recent merge are kept (flagged `removed`)
/// until the next shift prunes them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: OrdMap<TileId, Tile>,
    /// Next id the arena hands out. Never decreases.
    next_id: u32,
}

impl Board {
    /// An empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from a value matrix, assigning ids in row-major order.
    ///
    /// ```
    /// use rust_2048::grid::Board;
    ///
    /// let board = Board::from_matrix(&[
    ///     [2, 0, 0, 0],
    ///     [0, 0, 0, 0],
    ///     [0, 0, 4, 0],
    ///     [0, 0, 0, 0],
    /// ]);
    /// assert_eq!(board.live_count(), 2);
    /// assert_eq!(board.max_value(), 4);
    /// ```
    #[must_use]
    pub fn from_matrix(matrix: &BoardMatrix) -> Self {
        let mut board = Self::new();
        for pos in Position::all() {
            let value = matrix[pos.row as usize][pos.column as usize];
            if value != 0 {
                let id = board.allocate_id();
                board.insert(Tile::resting(id, value, pos));
            }
        }
        board
    }

    /// Rebuild a board from raw tiles, checking every board invariant.
    ///
    /// `next_id` is raised past the largest id present if needed.
    pub fn from_tiles(
        tiles: impl IntoIterator<Item = Tile>,
        next_id: u32,
    ) -> Result<Self, BoardError> {
        let mut board = Self {
            tiles: OrdMap::new(),
            next_id,
        };
        for tile in tiles {
            if board.tiles.contains_key(&tile.id) {
                return Err(BoardError::DuplicateId(tile.id));
            }
            board.next_id = board.next_id.max(tile.id.0 + 1);
            board.tiles.insert(tile.id, tile);
        }
        board.validate()?;
        Ok(board)
    }

    /// An empty board that continues this board's id sequence.
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self {
            tiles: OrdMap::new(),
            next_id: self.next_id,
        }
    }

    // === Queries ===

    /// Every tile in id order, including tiles removed by the last merge.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Tiles that were not consumed by a merge.
    pub fn live_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values().filter(|t| t.is_live())
    }

    /// Look up a tile by id.
    #[must_use]
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    /// The live tile on a cell, if any.
    #[must_use]
    pub fn tile_at(&self, pos: Position) -> Option<&Tile> {
        self.live_tiles().find(|t| t.position == pos)
    }

    /// Number of live tiles.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live_tiles().count()
    }

    /// True when all 16 cells hold a live tile.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.live_count() == CELL_COUNT
    }

    /// Largest live tile value, 0 on an empty board.
    #[must_use]
    pub fn max_value(&self) -> u32 {
        self.live_tiles().map(|t| t.value).max().unwrap_or(0)
    }

    /// Sum of live tile values.
    #[must_use]
    pub fn total_value(&self) -> u64 {
        self.live_tiles().map(|t| u64::from(t.value)).sum()
    }

    /// The id the next spawned tile will receive.
    #[must_use]
    pub fn next_id(&self) -> TileId {
        TileId(self.next_id)
    }

    /// Live tiles indexed by row-major cell.
    #[must_use]
    pub fn cells(&self) -> [Option<Tile>; CELL_COUNT] {
        let mut cells = [None; CELL_COUNT];
        for tile in self.live_tiles() {
            cells[tile.position.index()] = Some(*tile);
        }
        cells
    }

    /// Empty cells in row-major order.
    #[must_use]
    pub fn open_positions(&self) -> SmallVec<[Position; CELL_COUNT]> {
        let cells = self.cells();
        Position::all().filter(|p| cells[p.index()].is_none()).collect()
    }

    /// The board as a value matrix (0 = empty), as handed to move advisors.
    #[must_use]
    pub fn to_matrix(&self) -> BoardMatrix {
        let mut matrix = [[0; GRID_SIZE]; GRID_SIZE];
        for tile in self.live_tiles() {
            matrix[tile.position.row as usize][tile.position.column as usize] = tile.value;
        }
        matrix
    }

    /// The same tiles reflected left-to-right.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        let tiles = self
            .tiles
            .iter()
            .map(|(id, t)| {
                (
                    *id,
                    Tile {
                        position: t.position.mirrored(),
                        ..*t
                    },
                )
            })
            .collect();
        Self {
            tiles,
            next_id: self.next_id,
        }
    }

    /// Check the board invariants: one live tile per cell (so at most 16),
    /// positions on the grid, power-of-two values, ids below the arena
    /// counter.
    pub fn validate(&self) -> Result<(), BoardError> {
        let mut occupied = FxHashSet::default();
        for (id, tile) in &self.tiles {
            if *id != tile.id {
                return Err(BoardError::MisfiledTile {
                    key: *id,
                    id: tile.id,
                });
            }
            if id.0 >= self.next_id {
                return Err(BoardError::Unallocated {
                    id: *id,
                    next_id: self.next_id,
                });
            }
            if Position::checked(tile.position.row, tile.position.column).is_none() {
                return Err(BoardError::OffGrid {
                    id: *id,
                    position: tile.position,
                });
            }
            if tile.value < 2 || !tile.value.is_power_of_two() {
                return Err(BoardError::InvalidValue {
                    id: *id,
                    value: tile.value,
                });
            }
            if tile.is_live() && !occupied.insert(tile.position) {
                return Err(BoardError::SharedCell(tile.position));
            }
        }
        Ok(())
    }

    // === Arena mutation (crate-internal; public operations are pure) ===

    pub(crate) fn allocate_id(&mut self) -> TileId {
        let id = TileId(self.next_id);
        self.next_id += 1;
        id
    }

    pub(crate) fn insert(&mut self, tile: Tile) {
        self.tiles.insert(tile.id, tile);
    }

    /// Copy without merge leftovers and with no tile flagged as new.
    pub(crate) fn settled(&self) -> Self {
        let tiles = self
            .tiles
            .iter()
            .filter(|(_, t)| t.is_live())
            .map(|(id, t)| {
                (
                    *id,
                    Tile {
                        just_spawned: false,
                        ..*t
                    },
                )
            })
            .collect();
        Self {
            tiles,
            next_id: self.next_id,
        }
    }

    pub(crate) fn clear_spawn_flags(&mut self) {
        let flagged: SmallVec<[TileId; 2]> = self
            .tiles
            .values()
            .filter(|t| t.just_spawned)
            .map(|t| t.id)
            .collect();
        for id in flagged {
            if let Some(tile) = self.tiles.get_mut(&id) {
                tile.just_spawned = false;
            }
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.to_matrix().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let cells: Vec<String> = row
                .iter()
                .map(|v| if *v == 0 { ".".to_string() } else { v.to_string() })
                .collect();
            write!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
