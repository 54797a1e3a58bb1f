//! Move directions.
//!
//! Directions travel over the wire as `UP`, `DOWN`, `LEFT` and `RIGHT`.
//! Parsing is case-insensitive because automated players are not always
//! consistent about casing.
//!
//! ```
//! use rust_2048::core::Direction;
//!
//! let dir: Direction = "left".parse().unwrap();
//! assert_eq!(dir, Direction::Left);
//! assert_eq!(dir.to_string(), "LEFT");
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// One of the four directions tiles can be shifted in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in the order the wire format lists them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Wire name of this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }

    /// True for `Up` and `Down`, whose lines are columns.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// True when tiles travel toward index 0 (`Up`, `Left`).
    #[must_use]
    pub const fn toward_origin(self) -> bool {
        matches!(self, Direction::Up | Direction::Left)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| GameError::InvalidDirection(trimmed.to_string()))
    }
}
