//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Both learners drive it through the same `Game::update` contract.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, ACTION_SPACE};
pub use config::GameConfig;
pub use engine::Game;
pub use state::{GameStatus, Position, Snake};
