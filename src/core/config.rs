//! Game configuration.
//!
//! Every knob has a default matching the classic game; callers override
//! individual fields with the builder methods.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Random seed for tile spawns.
    /// Same seed produces the same game for the same move sequence.
    pub seed: u64,

    /// Pause between a successful move and its follow-up spawn (default 120ms).
    /// Pacing only, no gameplay effect.
    pub spawn_delay: Duration,

    /// Probability that a spawned tile is a 4 instead of a 2 (default 0.1).
    pub four_probability: f64,

    /// Reaching a tile of this value wins the game (default 2048).
    pub win_value: u32,

    /// Tiles placed on the board by a restart (default 2).
    pub initial_tiles: usize,

    /// Advisor proposals allowed per turn before giving up (default 10).
    /// Both advisor errors and proposals that do not move count.
    pub advisor_retries: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            spawn_delay: Duration::from_millis(120),
            four_probability: 0.1,
            win_value: 2048,
            initial_tiles: 2,
            advisor_retries: 10,
        }
    }
}

impl GameConfig {
    /// Create a new config with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spawn seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the delay between a move and its spawn.
    #[must_use]
    pub fn with_spawn_delay(mut self, delay: Duration) -> Self {
        self.spawn_delay = delay;
        self
    }

    /// Set the probability of spawning a 4.
    #[must_use]
    pub fn with_four_probability(mut self, probability: f64) -> Self {
        self.four_probability = probability.clamp(0.0, 1.0);
        self
    }

    /// Set the winning tile value.
    #[must_use]
    pub fn with_win_value(mut self, value: u32) -> Self {
        self.win_value = value;
        self
    }

    /// Set how many tiles a restart seeds.
    #[must_use]
    pub fn with_initial_tiles(mut self, count: usize) -> Self {
        self.initial_tiles = count;
        self
    }

    /// Set the per-turn advisor retry budget.
    #[must_use]
    pub fn with_advisor_retries(mut self, retries: u32) -> Self {
        self.advisor_retries = retries;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.spawn_delay, Duration::from_millis(120));
        assert_eq!(config.win_value, 2048);
        assert_eq!(config.initial_tiles, 2);
        assert_eq!(config.advisor_retries, 10);
        assert!((config.four_probability - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new()
            .with_seed(7)
            .with_spawn_delay(Duration::ZERO)
            .with_four_probability(3.0)
            .with_win_value(64)
            .with_initial_tiles(3)
            .with_advisor_retries(1);

        assert_eq!(config.seed, 7);
        assert_eq!(config.spawn_delay, Duration::ZERO);
        assert_eq!(config.four_probability, 1.0);
        assert_eq!(config.win_value, 64);
        assert_eq!(config.initial_tiles, 3);
        assert_eq!(config.advisor_retries, 1);
    }

    #[test]
    fn test_serde_round_trip() {
        let config = GameConfig::new().with_seed(99);
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
