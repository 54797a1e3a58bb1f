//! Directional shift-and-merge.
//!
//! The board splits into four lines along the shift axis (columns for
//! `Up`/`Down`, rows for `Left`/`Right`). Each line is scanned from the edge
//! tiles travel toward. Every tile is packed into the next free slot, unless
//! it equals the last tile placed in the line and that tile has not merged
//! yet; then the two merge.
//!
//! In a merge the tile placed first survives, keeps its id and doubles. The
//! incoming tile lands on the survivor's cell, takes the doubled value and is
//! flagged `removed`. A survivor is inert for the rest of the move, so
//! `2 2 2` shifted left becomes `4 2`, never `8`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Direction, Position, Tile, TileId, GRID_SIZE};

use super::board::Board;

/// One merge performed by a shift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merge {
    /// Tile that absorbed the other and keeps its id.
    pub survivor: TileId,
    /// Tile flagged `removed` by this merge.
    pub consumed: TileId,
    /// The doubled value.
    pub value: u32,
    /// Cell the merged tile occupies.
    pub position: Position,
}

/// A shift that changed the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shifted {
    pub board: Board,
    pub merges: SmallVec<[Merge; 8]>,
}

impl Shifted {
    /// Points earned: the sum of the values produced by merges.
    #[must_use]
    pub fn score_delta(&self) -> u64 {
        self.merges.iter().map(|m| u64::from(m.value)).sum()
    }
}

/// Result of [`shift`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShiftOutcome {
    /// At least one tile moved or merged.
    Moved(Shifted),
    /// Nothing moved; the caller keeps its board and must not spawn.
    NoMove,
}

impl ShiftOutcome {
    /// True if the shift changed the board.
    #[must_use]
    pub fn is_move(&self) -> bool {
        matches!(self, ShiftOutcome::Moved(_))
    }

    /// The resulting board, if anything moved.
    #[must_use]
    pub fn into_board(self) -> Option<Board> {
        match self {
            ShiftOutcome::Moved(shifted) => Some(shifted.board),
            ShiftOutcome::NoMove => None,
        }
    }
}

/// Last tile packed into the current line.
#[derive(Clone, Copy)]
struct Placed {
    id: TileId,
    value: u32,
    position: Position,
    merged: bool,
}

/// Cell `inner` steps along `line` for the given axis.
fn line_cell(direction: Direction, line: usize, inner: usize) -> Position {
    if direction.is_vertical() {
        Position::new(inner as u8, line as u8)
    } else {
        Position::new(line as u8, inner as u8)
    }
}

/// Index along the line of the `k`-th slot counted from the leading edge.
fn slot_index(direction: Direction, k: usize) -> usize {
    if direction.toward_origin() {
        k
    } else {
        GRID_SIZE - 1 - k
    }
}

/// Slide and merge every tile in `direction`.
///
/// Pure: the input board is untouched. Tiles removed by an earlier merge
/// are pruned from the result and no tile keeps its spawn flag.
///
/// ```
/// use rust_2048::core::Direction;
/// use rust_2048::grid::{shift, Board, ShiftOutcome};
///
/// let board = Board::from_matrix(&[[0; 4], [0; 4], [2, 0, 0, 2], [0; 4]]);
/// let ShiftOutcome::Moved(shifted) = shift(&board, Direction::Left) else {
///     panic!("tiles should merge");
/// };
/// assert_eq!(shifted.board.to_matrix()[2], [4, 0, 0, 0]);
/// assert_eq!(shifted.score_delta(), 4);
///
/// // Already packed to the left: nothing happens.
/// assert_eq!(shift(&shifted.board, Direction::Left), ShiftOutcome::NoMove);
/// ```
#[must_use]
pub fn shift(board: &Board, direction: Direction) -> ShiftOutcome {
    let cells = board.cells();
    let mut next = board.settled();
    let mut merges = SmallVec::new();
    let mut moved = false;

    for line in 0..GRID_SIZE {
        let mut filled = 0usize;
        let mut last: Option<Placed> = None;

        for k in 0..GRID_SIZE {
            let origin = line_cell(direction, line, slot_index(direction, k));
            let Some(tile) = cells[origin.index()] else {
                continue;
            };

            match last {
                Some(prev) if !prev.merged && prev.value == tile.value => {
                    let value = tile.value * 2;
                    if let Some(survivor) = next.get(prev.id).copied() {
                        next.insert(Tile { value, ..survivor });
                    }
                    next.insert(Tile {
                        value,
                        position: prev.position,
                        removed: true,
                        just_spawned: false,
                        ..tile
                    });
                    merges.push(Merge {
                        survivor: prev.id,
                        consumed: tile.id,
                        value,
                        position: prev.position,
                    });
                    last = Some(Placed {
                        value,
                        merged: true,
                        ..prev
                    });
                    moved = true;
                }
                _ => {
                    let target = line_cell(direction, line, slot_index(direction, filled));
                    filled += 1;
                    if target != tile.position {
                        moved = true;
                        next.insert(Tile {
                            position: target,
                            just_spawned: false,
                            ..tile
                        });
                    }
                    last = Some(Placed {
                        id: tile.id,
                        value: tile.value,
                        position: target,
                        merged: false,
                    });
                }
            }
        }
    }

    if moved {
        log::trace!("shift {direction}: {} merges", merges.len());
        ShiftOutcome::Moved(Shifted {
            board: next,
            merges,
        })
    } else {
        ShiftOutcome::NoMove
    }
}
