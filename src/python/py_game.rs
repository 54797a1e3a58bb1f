//! Game bindings for Python.
//!
//! Automated players drive the game from Python: make a move, settle the
//! pending spawn, read the board back as a list or numpy array.

use std::time::Duration;

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::advisor::RandomAdvisor;
use crate::core::{Direction, GameConfig, GameError};
use crate::game::{Game, GameSnapshot, MoveOutcome};
use crate::grid::legal_directions;

fn to_py_err(err: GameError) -> PyErr {
    PyErr::new::<PyValueError, _>(err.to_string())
}

/// Python wrapper for Game.
#[pyclass(name = "Game")]
pub struct PyGame {
    game: Game,
    /// Random agent for `play_random`, kept so its stream advances.
    random: RandomAdvisor,
}

#[pymethods]
impl PyGame {
    /// Create a new game.
    ///
    /// # Arguments
    /// - seed: RNG seed for spawns
    /// - spawn_delay_ms: Virtual delay between a move and its spawn
    /// - win_value: Tile value that wins the game
    /// - advisor_retries: Attempts per advised turn
    /// - random_seed: Seed for the random agent (defaults to `seed`)
    #[new]
    #[pyo3(signature = (seed = 42, spawn_delay_ms = 120, win_value = 2048, advisor_retries = 10, random_seed = None))]
    fn new(
        seed: u64,
        spawn_delay_ms: u64,
        win_value: u32,
        advisor_retries: u32,
        random_seed: Option<u64>,
    ) -> Self {
        let config = GameConfig::default()
            .with_seed(seed)
            .with_spawn_delay(Duration::from_millis(spawn_delay_ms))
            .with_win_value(win_value)
            .with_advisor_retries(advisor_retries);
        Self {
            game: Game::new(config),
            random: RandomAdvisor::new(random_seed.unwrap_or(seed)),
        }
    }

    /// Clear the board and start over.
    fn restart(&mut self) {
        self.game.restart();
    }

    /// Request a move ("UP", "DOWN", "LEFT" or "RIGHT").
    ///
    /// Returns "applied", "no_move", "locked" or "over".
    #[pyo3(name = "move")]
    fn request_move(&mut self, direction: &str) -> PyResult<&'static str> {
        let direction: Direction = direction.parse().map_err(to_py_err)?;
        Ok(match self.game.request_move(direction) {
            MoveOutcome::Applied { .. } => "applied",
            MoveOutcome::NoMove => "no_move",
            MoveOutcome::Rejected(crate::game::RejectReason::Over) => "over",
            MoveOutcome::Rejected(_) => "locked",
        })
    }

    /// Advance the virtual clock; returns how many spawns landed.
    fn advance(&mut self, elapsed_ms: u64) -> usize {
        self.game.advance(Duration::from_millis(elapsed_ms))
    }

    /// Fire every pending spawn now.
    fn settle(&mut self) -> usize {
        self.game.settle()
    }

    /// Play one turn with the random agent and settle its spawn.
    ///
    /// Returns the direction played.
    fn play_random(&mut self) -> PyResult<String> {
        let turn = self
            .game
            .play_advised_turn(&mut self.random)
            .map_err(to_py_err)?;
        self.game.settle();
        Ok(turn.direction.to_string())
    }

    /// Directions that would change the board.
    fn legal_moves(&self) -> Vec<String> {
        legal_directions(self.game.board())
            .into_iter()
            .map(|d| d.to_string())
            .collect()
    }

    /// Board as nested lists, 0 for empty.
    #[getter]
    fn board(&self) -> Vec<Vec<u32>> {
        self.game.board_matrix().iter().map(|row| row.to_vec()).collect()
    }

    /// Board as a 4x4 numpy array.
    fn board_numpy<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<u32>>> {
        let flat: Vec<u32> = self.game.board_matrix().iter().flatten().copied().collect();
        PyArray1::from_vec_bound(py, flat)
            .reshape([4, 4])
            .map_err(|e| PyErr::new::<PyValueError, _>(format!("{}", e)))
    }

    #[getter]
    fn score(&self) -> u64 {
        self.game.score()
    }

    #[getter]
    fn max_tile(&self) -> u32 {
        self.game.max_tile()
    }

    #[getter]
    fn over(&self) -> bool {
        self.game.is_over()
    }

    /// True/False once over, None while in progress.
    #[getter]
    fn won(&self) -> Option<bool> {
        self.game.won()
    }

    #[getter]
    fn locked(&self) -> bool {
        self.game.is_locked()
    }

    /// Encode the game as bytes.
    fn snapshot<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyBytes>> {
        let bytes = self.game.snapshot().to_bytes().map_err(to_py_err)?;
        Ok(PyBytes::new_bound(py, &bytes))
    }

    /// Rebuild a game from `snapshot()` bytes, with the configuration it
    /// was saved with.
    #[staticmethod]
    #[pyo3(signature = (data, random_seed = None))]
    fn restore(data: &[u8], random_seed: Option<u64>) -> PyResult<Self> {
        let snapshot = GameSnapshot::from_bytes(data).map_err(to_py_err)?;
        let game = Game::resume(snapshot).map_err(to_py_err)?;
        let seed = random_seed.unwrap_or(game.config().seed);
        Ok(Self {
            game,
            random: RandomAdvisor::new(seed),
        })
    }

    fn __repr__(&self) -> String {
        format!(
            "Game(score={}, max_tile={}, phase={:?})",
            self.game.score(),
            self.game.max_tile(),
            self.game.phase()
        )
    }
}
