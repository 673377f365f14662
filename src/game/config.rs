use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square board
    pub grid_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { grid_size: 20 }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size
    pub fn new(grid_size: usize) -> Self {
        Self { grid_size }
    }

    /// Create a small grid, the size the Q-learning agent trains on
    pub fn small() -> Self {
        Self::new(5)
    }

    /// Number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// The board must hold the two-cell starting snake
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 2 {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }
        // Coordinates are i32
        if self.grid_size > i32::MAX as usize {
            return Err(ConfigError::OutOfRange {
                name: "grid_size",
                range: "[2, i32::MAX]",
                value: self.grid_size as f64,
            });
        }
        Ok(())
    }
}
