//! Python bindings for the rust-2048 engine.
//!
//! # Quick Start
//!
//! ```python
//! import rust_2048
//!
//! game = rust_2048.Game(seed=42)
//! while not game.over:
//!     moves = game.legal_moves()
//!     game.move(moves[0])
//!     game.settle()
//! print(game.score, game.max_tile)
//! ```

use pyo3::prelude::*;

mod py_game;

pub use py_game::*;

/// rust-2048: a deterministic 2048 engine.
#[pymodule]
fn rust_2048(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGame>()?;
    Ok(())
}
