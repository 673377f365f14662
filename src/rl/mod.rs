//! Tabular reinforcement learning for the Snake game
//!
//! Provides:
//! - 12-bit state encoding and the greedy heuristic controller
//! - Per-transition rewards
//! - Q-table agent with epsilon-greedy exploration and decay
//! - An episode environment pairing the game with encoder and reward

pub mod agent;
pub mod config;
pub mod environment;
pub mod observation;
pub mod reward;

pub use agent::{QAgent, QTable};
pub use config::{QLearningConfig, RewardConfig};
pub use environment::SnakeEnvironment;
pub use observation::{encode_state, heuristic_action, STATE_SPACE};
pub use reward::transition_reward;
