//! Typed errors for invalid configuration and degenerate evolutionary inputs
//!
//! Everything in the game and the learners is deterministic given its random
//! draws, so these are precondition violations rather than transient
//! failures. Nothing here is retried.

use thiserror::Error;

/// Invalid hyperparameters or game settings
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The board cannot hold the starting snake
    #[error("grid_size must be at least 2, got {0}")]
    GridTooSmall(usize),

    /// A numeric parameter fell outside its allowed range
    #[error("{name} must be in {range}, got {value}")]
    OutOfRange {
        name: &'static str,
        range: &'static str,
        value: f64,
    },

    /// A count that must be positive was zero
    #[error("{0} must be at least 1")]
    Zero(&'static str),

    /// Population size must split into breeding pairs
    #[error("population_size must be even, got {0}")]
    OddPopulation(usize),

    /// Genomes must carry at least one bit per direction
    #[error("genome_length must be at least {min}, got {value}")]
    GenomeTooShort { min: usize, value: usize },

    /// A loaded Q-table does not match the encoder and action space
    #[error("Q-table must be {expected_states}x{expected_actions}, got {states}x{actions}")]
    TableShape {
        expected_states: usize,
        expected_actions: usize,
        states: usize,
        actions: usize,
    },
}

/// Degenerate input to a genetic operator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeneticError {
    #[error("genome has zero length")]
    EmptyGenome,

    #[error("genome lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("population is empty")]
    EmptyPopulation,

    #[error("got {scores} fitness scores for a population of {population}")]
    FitnessCountMismatch { population: usize, scores: usize },

    #[error("fitness score at index {index} is {value}; scores must be finite and non-negative")]
    InvalidFitness { index: usize, value: f64 },

    #[error("total fitness is zero; roulette selection is undefined")]
    ZeroTotalFitness,

    #[error("total fitness is not finite")]
    FitnessOverflow,

    #[error(transparent)]
    Config(#[from] ConfigError),
}
