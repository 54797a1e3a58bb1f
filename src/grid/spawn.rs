//! Random tile placement.

use crate::core::{GameRng, Tile};

use super::board::Board;

/// Place one new tile on a random empty cell.
///
/// The cell is drawn uniformly from the empty cells in row-major order;
/// the value is 4 with probability `four_probability`, otherwise 2. The new
/// tile is the only one flagged `just_spawned`.
///
/// A full board comes back unchanged with no tile.
///
/// ```
/// use rust_2048::core::GameRng;
/// use rust_2048::grid::{spawn_tile, Board};
///
/// let mut rng = GameRng::new(1);
/// let (board, tile) = spawn_tile(&Board::new(), &mut rng, 0.1);
/// let tile = tile.unwrap();
/// assert!(tile.value == 2 || tile.value == 4);
/// assert_eq!(board.live_count(), 1);
/// ```
pub fn spawn_tile(board: &Board, rng: &mut GameRng, four_probability: f64) -> (Board, Option<Tile>) {
    let open = board.open_positions();
    if open.is_empty() {
        log::debug!("spawn skipped: board is full");
        return (board.clone(), None);
    }

    let position = open[rng.gen_index(open.len())];
    let value = if rng.gen_bool(four_probability) { 4 } else { 2 };

    let mut next = board.clone();
    next.clear_spawn_flags();
    let tile = Tile::spawned(next.allocate_id(), value, position);
    next.insert(tile);

    log::debug!("spawned {} = {} at {}", tile.id, value, position);
    (next, Some(tile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Position, CELL_COUNT};

    fn full_board() -> Board {
        Board::from_matrix(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]])
    }

    #[test]
    fn test_full_board_unchanged() {
        let board = full_board();
        let mut rng = GameRng::new(5);
        let (next, tile) = spawn_tile(&board, &mut rng, 0.1);
        assert!(tile.is_none());
        assert_eq!(next, board);
    }

    #[test]
    fn test_fills_only_open_cell() {
        let mut matrix = full_board().to_matrix();
        matrix[2][1] = 0;
        let board = Board::from_matrix(&matrix);

        let mut rng = GameRng::new(9);
        let (next, tile) = spawn_tile(&board, &mut rng, 0.1);
        let tile = tile.unwrap();
        assert_eq!(tile.position, Position::new(2, 1));
        assert_eq!(tile.id, board.next_id());
        assert_eq!(next.live_count(), CELL_COUNT);
    }

    #[test]
    fn test_only_newest_is_flagged() {
        let mut rng = GameRng::new(11);
        let (first, a) = spawn_tile(&Board::new(), &mut rng, 0.1);
        let (second, b) = spawn_tile(&first, &mut rng, 0.1);
        let (a, b) = (a.unwrap(), b.unwrap());

        assert!(!second.get(a.id).unwrap().just_spawned);
        assert!(second.get(b.id).unwrap().just_spawned);
        assert_ne!(a.position, b.position);
        assert!(a.id < b.id);
    }

    #[test]
    fn test_value_odds() {
        let mut rng = GameRng::new(2024);
        let mut fours = 0;
        for _ in 0..2000 {
            let (_, tile) = spawn_tile(&Board::new(), &mut rng, 0.1);
            if tile.unwrap().value == 4 {
                fours += 1;
            }
        }
        // 10% of 2000 = 200; allow generous slack
        assert!((120..=280).contains(&fours), "got {fours} fours");

        let (_, tile) = spawn_tile(&Board::new(), &mut rng, 1.0);
        assert_eq!(tile.unwrap().value, 4);
        let (_, tile) = spawn_tile(&Board::new(), &mut rng, 0.0);
        assert_eq!(tile.unwrap().value, 2);
    }

    #[test]
    fn test_positions_cover_board() {
        let mut rng = GameRng::new(77);
        let mut seen = [false; CELL_COUNT];
        for _ in 0..500 {
            let (_, tile) = spawn_tile(&Board::new(), &mut rng, 0.1);
            seen[tile.unwrap().position.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut rng1 = GameRng::new(3);
        let mut rng2 = GameRng::new(3);
        let (b1, _) = spawn_tile(&Board::new(), &mut rng1, 0.1);
        let (b2, _) = spawn_tile(&Board::new(), &mut rng2, 0.1);
        assert_eq!(b1, b2);
    }
}
