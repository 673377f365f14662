//! Genetic algorithm hyperparameters

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::{GameConfig, ACTION_SPACE};
use crate::rl::config::check_unit;

/// How a genome's episodes are scored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessConfig {
    /// Episodes played per genome; fitness is their mean
    ///
    /// Default: 100
    pub episodes: usize,

    /// Generation index at which fitness switches to the late-stage formula
    ///
    /// Default: 250
    pub switch_generation: usize,

    /// Frames without eating before an episode is cut off
    ///
    /// Default: 100000
    pub stall_limit: u64,

    /// Subtracted from the frame count when an episode is cut off
    ///
    /// Default: 50
    pub stall_penalty: u64,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            episodes: 100,
            switch_generation: 250,
            stall_limit: 100_000,
            stall_penalty: 50,
        }
    }
}

impl FitnessConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.episodes == 0 {
            return Err(ConfigError::Zero("episodes"));
        }
        if self.stall_limit == 0 {
            return Err(ConfigError::Zero("stall_limit"));
        }
        Ok(())
    }
}

/// Configuration for the genetic algorithm
///
/// # Example
///
/// ```rust
/// use snake_agents::evolution::GaConfig;
///
/// let config = GaConfig {
///     population_size: 10,
///     seed: Some(7),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Genomes per generation; must be even
    ///
    /// Default: 50
    pub population_size: usize,

    /// Bits per genome
    ///
    /// Default: 200
    pub genome_length: usize,

    /// Generations to run
    ///
    /// Default: 1000
    pub generations: usize,

    /// Per-bit flip probability
    ///
    /// Default: 0.01
    pub mutation_rate: f64,

    /// Board size used for fitness episodes
    ///
    /// Default: 20
    pub grid_size: usize,

    pub fitness: FitnessConfig,

    /// Seed for the master random stream; entropy when unset
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            genome_length: 200,
            generations: 1000,
            mutation_rate: 0.01,
            grid_size: 20,
            fitness: FitnessConfig::default(),
            seed: None,
        }
    }
}

impl GaConfig {
    /// Check that all hyperparameters are in valid ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::Zero("population_size"));
        }
        if self.generations == 0 {
            return Err(ConfigError::Zero("generations"));
        }
        if self.population_size % 2 != 0 {
            return Err(ConfigError::OddPopulation(self.population_size));
        }
        if self.genome_length < ACTION_SPACE {
            return Err(ConfigError::GenomeTooShort {
                min: ACTION_SPACE,
                value: self.genome_length,
            });
        }
        check_unit("mutation_rate", self.mutation_rate, true)?;
        self.game_config().validate()?;
        self.fitness.validate()
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new(self.grid_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.genome_length, 200);
        assert_eq!(config.generations, 1000);
        assert_eq!(config.mutation_rate, 0.01);
        assert_eq!(config.fitness.episodes, 100);
        assert_eq!(config.fitness.switch_generation, 250);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_odd_population_rejected() {
        let config = GaConfig {
            population_size: 7,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::OddPopulation(7)));
    }

    #[test]
    fn test_short_genome_rejected() {
        let config = GaConfig {
            genome_length: 3,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GenomeTooShort { min: 4, value: 3 })
        ));
    }

    #[test]
    fn test_mutation_rate_bounds() {
        let mut config = GaConfig::default();
        config.mutation_rate = 0.0;
        assert!(config.validate().is_ok());
        config.mutation_rate = 1.0;
        assert!(config.validate().is_ok());
        config.mutation_rate = 1.01;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_episodes_rejected() {
        let mut config = GaConfig::default();
        config.fitness.episodes = 0;
        assert_eq!(config.validate(), Err(ConfigError::Zero("episodes")));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GaConfig =
            serde_json::from_str(r#"{"population_size": 4, "fitness": {"episodes": 3}}"#).unwrap();
        assert_eq!(config.population_size, 4);
        assert_eq!(config.genome_length, 200);
        assert_eq!(config.fitness.episodes, 3);
        assert_eq!(config.fitness.stall_limit, 100_000);
    }
}
