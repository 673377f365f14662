//! Snake Agents - Q-learning and genetic algorithm agents for Snake
//!
//! This library provides:
//! - Core game logic on a square board (game module)
//! - Tabular Q-learning: state encoding, rewards and the agent (rl module)
//! - A genetic algorithm over binary genomes (evolution module)
//! - Controllers shared by training and evaluation (policy module)
//! - JSON artifacts, run configuration and metrics
//! - Train, evolve and evaluate execution modes (modes module)

pub mod config;
pub mod error;
pub mod evolution;
pub mod game;
pub mod metrics;
pub mod modes;
pub mod persistence;
pub mod policy;
pub mod rl;
