//! Move availability.

use smallvec::SmallVec;

use crate::core::Direction;

use super::board::Board;
use super::shift::shift;

/// True if the game is not stuck: the board has an empty cell, or some
/// shift would change it.
///
/// On a full board only `Up` and `Left` are tried. With no gaps a line can
/// move only by merging an adjacent equal pair, and adjacency looks the same
/// from either end. A board with gaps needs no shift at all; there the
/// shortcut would be wrong (a lone tile in the top-left corner cannot move
/// up or left). `tests/engine_tests.rs` checks both claims exhaustively over
/// line contents.
#[must_use]
pub fn has_valid_move(board: &Board) -> bool {
    !board.is_full()
        || shift(board, Direction::Up).is_move()
        || shift(board, Direction::Left).is_move()
}

/// Every direction whose shift changes the board.
#[must_use]
pub fn legal_directions(board: &Board) -> SmallVec<[Direction; 4]> {
    Direction::ALL
        .into_iter()
        .filter(|d| shift(board, *d).is_move())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_cell_means_move() {
        let board = Board::from_matrix(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 0, 4], [4, 2, 4, 2]]);
        assert!(has_valid_move(&board));
    }

    #[test]
    fn test_locked_full_board() {
        let board = Board::from_matrix(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(!has_valid_move(&board));
        assert!(legal_directions(&board).is_empty());
    }

    #[test]
    fn test_full_board_with_pair() {
        let board = Board::from_matrix(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 8, 8]]);
        assert!(has_valid_move(&board));
        assert_eq!(
            legal_directions(&board).as_slice(),
            &[Direction::Left, Direction::Right]
        );
    }

    #[test]
    fn test_down_only_board() {
        let board = Board::from_matrix(&[[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(
            legal_directions(&board).as_slice(),
            &[Direction::Down, Direction::Right]
        );
        // Neither Up nor Left moves here, but the board is not stuck
        assert!(has_valid_move(&board));
    }

    #[test]
    fn test_empty_board_is_not_stuck() {
        assert!(has_valid_move(&Board::new()));
        assert!(legal_directions(&Board::new()).is_empty());
    }

    #[test]
    fn test_does_not_mutate() {
        let board = Board::from_matrix(&[[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let before = board.clone();
        let _ = has_valid_move(&board);
        assert_eq!(board, before);
    }
}
