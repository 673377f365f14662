//! Genetic algorithm over fixed-length binary genomes
//!
//! Each genome is decoded into a [`GenomePolicy`](crate::policy::GenomePolicy),
//! scored over a batch of rollouts, and bred by roulette selection, single
//! point crossover and bit-flip mutation.

pub mod algorithm;
pub mod config;
pub mod fitness;
pub mod genome;
pub mod selection;

pub use algorithm::{GenerationSummary, GeneticAlgorithm};
pub use config::{FitnessConfig, GaConfig};
pub use fitness::{episode_fitness, evaluate_genome, play_episode, EpisodeOutcome, FitnessReport};
pub use genome::{initialize_population, Genome};
pub use selection::{roulette_wheel_selection, select_index};
