//! Session configuration.
//!
//! Game-specific settings live with each game (`TicTacToeConfig`,
//! `SnakeConfig`). This module holds what every session shares: the seed
//! and the tick cadence.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Session configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seed for every random decision in the session.
    /// Same seed produces the same opponent moves and food placements.
    pub seed: u64,

    /// Delay between ticks of time-driven games, in milliseconds.
    /// Event-driven games ignore it.
    pub tick_interval_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_interval_ms: 300,
        }
    }
}

impl SessionConfig {
    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the tick interval.
    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Tick interval as a `Duration`.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.tick_interval(), Duration::from_millis(300));
    }

    #[test]
    fn test_builder_pattern() {
        let config = SessionConfig::default().with_seed(7).with_tick_interval_ms(50);
        assert_eq!(config.seed, 7);
        assert_eq!(config.tick_interval_ms, 50);
    }

    #[test]
    fn test_serialization() {
        let config = SessionConfig::default().with_seed(123);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
