//! Q-learning hyperparameters and transition rewards

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for the tabular Q-learning agent
///
/// # Example
///
/// ```rust
/// use snake_agents::rl::QLearningConfig;
///
/// let config = QLearningConfig {
///     learning_rate: 0.1,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QLearningConfig {
    /// Step size of the temporal-difference update (alpha)
    ///
    /// Default: 0.01
    pub learning_rate: f64,

    /// Discount factor for future rewards (gamma)
    ///
    /// Default: 0.99
    pub discount: f64,

    /// Initial probability of taking a random action
    ///
    /// Default: 1.0
    pub exploration_rate: f64,

    /// Floor for the exploration rate
    ///
    /// Default: 0.001
    pub min_exploration: f64,

    /// Multiplier applied to the exploration rate after every episode
    ///
    /// Default: 0.9995
    pub exploration_decay: f64,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            discount: 0.99,
            exploration_rate: 1.0,
            min_exploration: 0.001,
            exploration_decay: 0.9995,
        }
    }
}

impl QLearningConfig {
    /// Check that all hyperparameters are in valid ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit("learning_rate", self.learning_rate, false)?;
        check_unit("discount", self.discount, true)?;
        check_unit("exploration_rate", self.exploration_rate, true)?;
        check_unit("min_exploration", self.min_exploration, true)?;
        check_unit("exploration_decay", self.exploration_decay, false)?;
        Ok(())
    }
}

/// Ensure `value` lies in [0, 1], or (0, 1] when zero is not allowed
pub(crate) fn check_unit(name: &'static str, value: f64, allow_zero: bool) -> Result<(), ConfigError> {
    let lower_ok = if allow_zero { value >= 0.0 } else { value > 0.0 };
    if lower_ok && value <= 1.0 {
        return Ok(());
    }
    Err(ConfigError::OutOfRange {
        name,
        range: if allow_zero { "[0, 1]" } else { "(0, 1]" },
        value,
    })
}

/// Per-transition reward values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Reward when the move ends in a collision
    pub collision_penalty: f64,
    /// Reward when the head is left with no free neighbouring cell
    pub trapped_penalty: f64,
    /// Reward for eating food
    pub food_reward: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            collision_penalty: -100.0,
            trapped_penalty: -50.0,
            food_reward: 15.0,
        }
    }
}
