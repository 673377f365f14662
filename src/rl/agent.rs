//! Tabular Q-learning agent
//!
//! The agent owns a dense `(state_space x action_space)` table that persists
//! across the whole training run and is updated in place after every
//! transition. Its only mode is the exploration rate, which decays once per
//! finished episode.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::QLearningConfig;

/// Dense row-major table of action values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    state_space: usize,
    action_space: usize,
    values: Vec<f64>,
}

impl QTable {
    /// A zero-initialised table
    pub fn zeros(state_space: usize, action_space: usize) -> Self {
        Self {
            state_space,
            action_space,
            values: vec![0.0; state_space * action_space],
        }
    }

    /// Build a table from row-major values, `None` if the shape does not match
    pub fn from_values(state_space: usize, action_space: usize, values: Vec<f64>) -> Option<Self> {
        if values.len() != state_space * action_space {
            return None;
        }
        Some(Self {
            state_space,
            action_space,
            values,
        })
    }

    pub fn state_space(&self) -> usize {
        self.state_space
    }

    pub fn action_space(&self) -> usize {
        self.action_space
    }

    /// Row-major values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Action values for one state
    ///
    /// # Panics
    ///
    /// Panics if `state` is outside the table.
    pub fn row(&self, state: usize) -> &[f64] {
        assert!(state < self.state_space, "state {} outside table of {} states", state, self.state_space);
        let start = state * self.action_space;
        &self.values[start..start + self.action_space]
    }

    pub fn get(&self, state: usize, action: usize) -> f64 {
        self.row(state)[action]
    }

    pub fn set(&mut self, state: usize, action: usize, value: f64) {
        assert!(state < self.state_space, "state {} outside table of {} states", state, self.state_space);
        assert!(action < self.action_space, "action {} outside table of {} actions", action, self.action_space);
        self.values[state * self.action_space + action] = value;
    }

    /// Largest value in a row
    pub fn max_value(&self, state: usize) -> f64 {
        self.row(state).iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Index of the largest value in a row; the first one wins ties
    pub fn best_action(&self, state: usize) -> usize {
        let row = self.row(state);
        let mut best = 0;
        for (action, &value) in row.iter().enumerate() {
            if value > row[best] {
                best = action;
            }
        }
        best
    }
}

/// Epsilon-greedy tabular learner
#[derive(Debug, Clone)]
pub struct QAgent {
    config: QLearningConfig,
    q_table: QTable,
    exploration_rate: f64,
}

impl QAgent {
    /// Create an agent with a zeroed table
    pub fn new(config: QLearningConfig, state_space: usize, action_space: usize) -> Self {
        Self::with_table(config, QTable::zeros(state_space, action_space))
    }

    /// Create an agent that continues from an existing table
    pub fn with_table(config: QLearningConfig, q_table: QTable) -> Self {
        let exploration_rate = config.exploration_rate;
        Self {
            config,
            q_table,
            exploration_rate,
        }
    }

    /// Pick a uniformly random action with probability `exploration_rate`,
    /// otherwise the greedy one
    pub fn choose_action<R: Rng + ?Sized>(&self, state: usize, rng: &mut R) -> usize {
        if rng.gen::<f64>() < self.exploration_rate {
            rng.gen_range(0..self.q_table.action_space())
        } else {
            self.q_table.best_action(state)
        }
    }

    /// Greedy action with no exploration
    pub fn best_action(&self, state: usize) -> usize {
        self.q_table.best_action(state)
    }

    /// Temporal-difference update of `Q(state, action)`
    ///
    /// `new = (1 - alpha) * old + alpha * (reward + gamma * max_a' Q(next_state, a'))`
    pub fn update_q_table(&mut self, state: usize, action: usize, reward: f64, next_state: usize) {
        let alpha = self.config.learning_rate;
        let old_value = self.q_table.get(state, action);
        let next_max = self.q_table.max_value(next_state);
        let new_value =
            (1.0 - alpha) * old_value + alpha * (reward + self.config.discount * next_max);
        self.q_table.set(state, action, new_value);
    }

    /// Shrink the exploration rate once, never below the configured floor
    pub fn decay_exploration(&mut self) {
        self.exploration_rate = (self.exploration_rate * self.config.exploration_decay)
            .max(self.config.min_exploration);
    }

    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }

    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Hand the learned table over, e.g. for persistence
    pub fn into_q_table(self) -> QTable {
        self.q_table
    }
}
