//! Serializable game snapshots.
//!
//! A snapshot carries the data model verbatim (tiles, score, flags) plus
//! what is needed to continue the same game deterministically: the id
//! counter, generation, statistics and RNG position. Storage is the
//! caller's concern; `to_bytes`/`from_bytes` give a compact bincode form.
//!
//! Pending spawns are not stored. A snapshot taken while locked restores
//! locked, with its spawn rescheduled one `spawn_delay` after restore.
//! `max_tile` is the board's largest live tile at capture time, so a
//! snapshot taken between a merge and its spawn already counts the merge.

use serde::{Deserialize, Serialize};

use crate::advisor::AgentKind;
use crate::core::{GameConfig, GameError, GameRng, GameRngState, Result, Tile};
use crate::grid::Board;

use super::controller::{Game, Phase};
use super::telemetry::Telemetry;

/// Point-in-time copy of a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Configuration the game was running with.
    pub config: GameConfig,
    pub tiles: Vec<Tile>,
    pub next_id: u32,
    pub score: u64,
    pub over: bool,
    /// `None` while the game is in progress.
    pub won: Option<bool>,
    pub locked: bool,
    pub max_tile: u32,
    pub generation: u64,
    pub telemetry: Telemetry,
    pub agent: AgentKind,
    pub rng: GameRngState,
}

impl GameSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| GameError::Snapshot(e.to_string()))
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| GameError::Snapshot(e.to_string()))
    }

    fn phase(&self) -> Result<Phase> {
        match (self.over, self.won, self.locked) {
            (false, None, false) => Ok(Phase::Ready),
            (false, None, true) => Ok(Phase::Locked),
            (true, Some(won), false) => Ok(Phase::Over { won }),
            _ => Err(GameError::InvalidSnapshot(format!(
                "inconsistent flags over={} won={:?} locked={}",
                self.over, self.won, self.locked
            ))),
        }
    }
}

impl Game {
    /// Capture the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            config: self.config().clone(),
            tiles: self.board().tiles().copied().collect(),
            next_id: self.board().next_id().raw(),
            score: self.score(),
            over: self.is_over(),
            won: self.won(),
            locked: self.is_locked(),
            max_tile: self.board().max_value(),
            generation: self.generation(),
            telemetry: self.telemetry().clone(),
            agent: self.agent().clone(),
            rng: self.rng().state(),
        }
    }

    /// Rebuild a game from a snapshot with the configuration it was taken
    /// with.
    pub fn resume(snapshot: GameSnapshot) -> Result<Self> {
        let config = snapshot.config.clone();
        Self::restore(config, snapshot)
    }

    /// Rebuild a game from a snapshot under `config`, checking board
    /// invariants.
    pub fn restore(config: GameConfig, snapshot: GameSnapshot) -> Result<Self> {
        let phase = snapshot.phase()?;
        let board = Board::from_tiles(snapshot.tiles, snapshot.next_id)?;
        if board.max_value() != snapshot.max_tile {
            return Err(GameError::InvalidSnapshot(format!(
                "max tile {} does not match board ({})",
                snapshot.max_tile,
                board.max_value()
            )));
        }

        log::debug!(
            "restored generation {} with {} tiles, phase {:?}",
            snapshot.generation,
            board.live_count(),
            phase
        );
        Ok(Game::from_parts(
            config,
            board,
            GameRng::from_state(&snapshot.rng),
            phase,
            snapshot.score,
            snapshot.generation,
            snapshot.telemetry,
            snapshot.agent,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardError, Direction};

    #[test]
    fn test_restore_continues_identically() {
        let config = GameConfig::default().with_seed(5);
        let mut game = Game::new(config.clone());
        for dir in [Direction::Left, Direction::Up, Direction::Right] {
            game.request_move(dir);
            game.settle();
        }

        let bytes = game.snapshot().to_bytes().unwrap();
        let mut restored = Game::restore(config, GameSnapshot::from_bytes(&bytes).unwrap()).unwrap();
        assert_eq!(restored.snapshot(), game.snapshot());

        for dir in [Direction::Down, Direction::Left, Direction::Up] {
            assert_eq!(game.request_move(dir), restored.request_move(dir));
            game.settle();
            restored.settle();
        }
        assert_eq!(restored.board(), game.board());
        assert_eq!(restored.score(), game.score());
    }

    #[test]
    fn test_locked_snapshot_reschedules_spawn() {
        let board = Board::from_matrix(&[[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]]);
        let mut game = Game::from_board(GameConfig::default(), board);
        game.request_move(Direction::Left);
        let snapshot = game.snapshot();
        assert!(snapshot.locked);

        let mut restored = Game::restore(GameConfig::default(), snapshot).unwrap();
        assert!(restored.is_locked());
        assert_eq!(restored.settle(), 1);
        assert!(restored.phase().is_ready());
    }

    #[test]
    fn test_rejects_inconsistent_flags() {
        let mut snapshot = Game::default().snapshot();
        snapshot.locked = true;
        snapshot.over = true;
        snapshot.won = Some(false);
        assert!(matches!(
            Game::restore(GameConfig::default(), snapshot),
            Err(GameError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_rejects_corrupt_board() {
        let mut snapshot = Game::default().snapshot();
        let mut dup = snapshot.tiles[0];
        dup.id = crate::core::TileId(99);
        snapshot.tiles.push(dup);
        assert!(matches!(
            Game::restore(GameConfig::default(), snapshot),
            Err(GameError::Board(BoardError::SharedCell(_)))
        ));
    }

    #[test]
    fn test_rejects_mismatched_max_tile() {
        let mut snapshot = Game::default().snapshot();
        snapshot.max_tile = 1024;
        assert!(matches!(
            Game::restore(GameConfig::default(), snapshot),
            Err(GameError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_locked_snapshot_after_merge() {
        let board = Board::from_matrix(&[[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let mut game = Game::from_board(GameConfig::default(), board);
        assert!(game.request_move(Direction::Left).is_applied());
        assert_eq!(game.max_tile(), 2);

        let bytes = game.snapshot().to_bytes().unwrap();
        let snapshot = GameSnapshot::from_bytes(&bytes).unwrap();
        assert_eq!(snapshot.max_tile, 4);

        let mut restored = Game::restore(GameConfig::default(), snapshot).unwrap();
        assert!(restored.is_locked());
        assert_eq!(restored.score(), 4);
        game.settle();
        restored.settle();
        assert_eq!(restored.board(), game.board());
        assert_eq!(restored.max_tile(), 4);
        assert_eq!(restored.phase(), Phase::Ready);
    }

    #[test]
    fn test_resume_keeps_config() {
        let config = GameConfig::default()
            .with_seed(8)
            .with_win_value(512)
            .with_advisor_retries(3);
        let game = Game::new(config.clone());
        let bytes = game.snapshot().to_bytes().unwrap();
        let resumed = Game::resume(GameSnapshot::from_bytes(&bytes).unwrap()).unwrap();
        assert_eq!(resumed.config(), &config);
        assert_eq!(resumed.board(), game.board());
    }

    #[test]
    fn test_rejects_garbage_bytes() {
        assert!(matches!(
            GameSnapshot::from_bytes(&[1, 2, 3]),
            Err(GameError::Snapshot(_))
        ));
    }
}
