//! Engine configuration.
//!
//! Table limits and dealing parameters. The defaults are the standard Okey
//! table: 2-4 players, 14 tiles each.

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use crate::tiles::CIRCULATING_TILES;

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Tiles dealt to each player, and the hand size a declaration needs.
    pub tiles_per_player: usize,

    /// Smallest roster a session accepts.
    pub min_players: usize,

    /// Largest roster a session accepts.
    pub max_players: usize,

    /// Base seed for shuffling. `None` seeds from the OS at registry start.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tiles_per_player: 14,
            min_players: 2,
            max_players: 4,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Use a fixed shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the accepted roster size range.
    #[must_use]
    pub fn with_player_range(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Set the dealt hand size.
    #[must_use]
    pub fn with_tiles_per_player(mut self, count: usize) -> Self {
        self.tiles_per_player = count;
        self
    }

    /// Check that the limits are coherent and that a full table can be dealt.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.min_players == 0 {
            return Err(EngineError::InvalidRoster(
                "min_players must be at least 1".to_string(),
            ));
        }
        if self.min_players > self.max_players {
            return Err(EngineError::InvalidRoster(format!(
                "min_players {} exceeds max_players {}",
                self.min_players, self.max_players
            )));
        }
        if self.tiles_per_player == 0 {
            return Err(EngineError::InvalidRoster(
                "tiles_per_player must be at least 1".to_string(),
            ));
        }
        let needed = self.max_players * self.tiles_per_player;
        if needed > CIRCULATING_TILES {
            return Err(EngineError::InvalidRoster(format!(
                "dealing {} tiles to {} players needs {} tiles, only {} circulate",
                self.tiles_per_player, self.max_players, needed, CIRCULATING_TILES
            )));
        }
        Ok(())
    }

    /// Check a roster size against the configured range.
    pub fn check_player_count(&self, count: usize) -> Result<(), EngineError> {
        if (self.min_players..=self.max_players).contains(&count) {
            Ok(())
        } else {
            Err(EngineError::InvalidRoster(format!(
                "{} players requested, table seats {}-{}",
                count, self.min_players, self.max_players
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.tiles_per_player, 14);
        assert_eq!(config.min_players, 2);
        assert_eq!(config.max_players, 4);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::default()
            .with_seed(123)
            .with_player_range(3, 5)
            .with_tiles_per_player(10);

        assert_eq!(config.seed, Some(123));
        assert_eq!(config.min_players, 3);
        assert_eq!(config.max_players, 5);
        assert_eq!(config.tiles_per_player, 10);
    }

    #[test]
    fn test_validate_rejects_oversized_deal() {
        let config = EngineConfig::default().with_player_range(2, 8);
        assert!(matches!(config.validate(), Err(EngineError::InvalidRoster(_))));
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let config = EngineConfig::default().with_player_range(4, 2);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_check_player_count() {
        let config = EngineConfig::default();
        assert!(config.check_player_count(1).is_err());
        assert!(config.check_player_count(2).is_ok());
        assert!(config.check_player_count(4).is_ok());
        assert!(config.check_player_count(5).is_err());
    }

    #[test]
    fn test_serialization() {
        let config = EngineConfig::default().with_seed(7);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
