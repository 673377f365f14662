//! Evolution mode for the genetic algorithm
//!
//! Steps the population once per generation, logs average fitness and average
//! game score to their streams, and keeps the fittest genome seen so far on
//! disk.

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::evolution::{GaConfig, GenerationSummary, GeneticAlgorithm};
use crate::metrics::LogStream;
use crate::persistence::{save_genome, GenomeArtifact, ModelMetadata};

/// Configuration for evolution mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolveConfig {
    pub ga: GaConfig,

    /// Directory for the best genome, checkpoints and log streams
    pub output_dir: PathBuf,

    /// Save the best genome so far every N generations
    pub checkpoint_frequency: usize,
}

impl Default for EvolveConfig {
    fn default() -> Self {
        Self::new(GaConfig::default(), PathBuf::from("runs/evolution"))
    }
}

impl EvolveConfig {
    pub fn new(ga: GaConfig, output_dir: PathBuf) -> Self {
        Self {
            ga,
            output_dir,
            checkpoint_frequency: 100,
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.output_dir.join("best_genome.json")
    }
}

pub struct EvolveMode {
    ga: GeneticAlgorithm,
    config: EvolveConfig,
    fitness_log: LogStream,
    score_log: LogStream,
    /// Fittest generation summary seen so far
    best: Option<GenerationSummary>,
}

impl EvolveMode {
    pub fn new(config: EvolveConfig) -> Result<Self> {
        if config.checkpoint_frequency == 0 {
            anyhow::bail!("checkpoint_frequency must be at least 1");
        }
        let ga = GeneticAlgorithm::new(config.ga.clone())
            .context("Invalid genetic algorithm configuration")?;
        let fitness_log = LogStream::create(config.output_dir.join("avg_fitness.txt"))?;
        let score_log = LogStream::create(config.output_dir.join("avg_score.txt"))?;

        Ok(Self {
            ga,
            config,
            fitness_log,
            score_log,
            best: None,
        })
    }

    /// Run every configured generation and save the best genome
    pub fn run(&mut self) -> Result<()> {
        self.print_header();

        for _ in 0..self.config.ga.generations {
            let summary = self
                .ga
                .step()
                .with_context(|| format!("Generation {} failed", self.ga.generation()))?;
            self.record(&summary)?;

            let completed = summary.generation + 1;
            if self
                .best
                .as_ref()
                .map_or(true, |best| summary.best_fitness > best.best_fitness)
            {
                self.best = Some(summary);
            }

            if completed % self.config.checkpoint_frequency == 0 {
                self.save_checkpoint(completed)?;
            }
        }

        let model_path = self.config.model_path();
        if let Some(best) = &self.best {
            save_genome(&self.artifact(best), &model_path)
                .with_context(|| format!("Failed to save best genome to {:?}", model_path))?;

            println!("\nEvolution complete!");
            println!("Best genome saved to: {:?}", model_path);
            println!(
                "Best fitness: {:.2} (generation {}, mean score {:.2})",
                best.best_fitness, best.generation, best.mean_score
            );
        }

        Ok(())
    }

    fn record(&mut self, summary: &GenerationSummary) -> Result<()> {
        println!(
            "[Generation {}/{}] Best: {:.2} | Avg fitness: {:.2} | Avg score: {:.2}",
            summary.generation + 1,
            self.config.ga.generations,
            summary.best_fitness,
            summary.mean_fitness,
            summary.mean_score
        );
        self.fitness_log.record(summary.mean_fitness)?;
        self.score_log.record(summary.mean_score)?;
        Ok(())
    }

    fn artifact(&self, summary: &GenerationSummary) -> GenomeArtifact {
        GenomeArtifact {
            genome: summary.best_genome.clone(),
            generation: summary.generation,
            fitness: summary.best_fitness,
            mean_score: summary.mean_score,
            config: self.config.ga.clone(),
            metadata: ModelMetadata::new(self.config.ga.grid_size, self.config.ga.seed),
        }
    }

    fn save_checkpoint(&self, completed: usize) -> Result<()> {
        let Some(best) = &self.best else {
            return Ok(());
        };
        let checkpoint_path = self
            .config
            .output_dir
            .join("checkpoints")
            .join(format!("best_genome_gen{}.json", completed));

        save_genome(&self.artifact(best), &checkpoint_path)
            .with_context(|| format!("Failed to save checkpoint to {:?}", checkpoint_path))?;

        info!("Checkpoint saved: {:?}", checkpoint_path);
        Ok(())
    }

    fn print_header(&self) {
        let ga = &self.config.ga;
        println!("{}", "=".repeat(70));
        println!("Genetic Algorithm - Snake");
        println!("{}", "=".repeat(70));
        println!("Generations: {}", ga.generations);
        println!("Population: {} genomes x {} bits", ga.population_size, ga.genome_length);
        println!("Mutation rate: {}", ga.mutation_rate);
        println!("Game Config: {}x{} grid", ga.grid_size, ga.grid_size);
        println!(
            "Fitness: {} episodes per genome, formula switches at generation {}",
            ga.fitness.episodes, ga.fitness.switch_generation
        );
        println!("Checkpoints: Every {} generations", self.config.checkpoint_frequency);
        println!("Output dir: {:?}", self.config.output_dir);
        println!("{}", "=".repeat(70));
        println!();
    }

    pub fn best(&self) -> Option<&GenerationSummary> {
        self.best.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::FitnessConfig;
    use crate::persistence::load_genome;
    use std::fs;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> EvolveConfig {
        let ga = GaConfig {
            population_size: 4,
            genome_length: 12,
            generations: 4,
            grid_size: 6,
            fitness: FitnessConfig {
                episodes: 2,
                stall_limit: 200,
                ..Default::default()
            },
            seed: Some(11),
            ..Default::default()
        };
        let mut config = EvolveConfig::new(ga, dir.path().to_path_buf());
        config.checkpoint_frequency = 2;
        config
    }

    #[test]
    fn test_invalid_config_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = test_config(&temp_dir);
        config.ga.population_size = 3;
        assert!(EvolveMode::new(config).is_err());
    }

    #[test]
    fn test_run_writes_best_genome_and_logs() {
        let temp_dir = TempDir::new().unwrap();
        let mut mode = EvolveMode::new(test_config(&temp_dir)).unwrap();

        mode.run().unwrap();

        let best = mode.best().unwrap().clone();
        let artifact = load_genome(&temp_dir.path().join("best_genome.json")).unwrap();
        assert_eq!(artifact.genome, best.best_genome);
        assert_eq!(artifact.fitness, best.best_fitness);
        assert_eq!(artifact.genome.len(), 12);

        assert!(temp_dir.path().join("checkpoints/best_genome_gen2.json").exists());
        assert!(temp_dir.path().join("checkpoints/best_genome_gen4.json").exists());

        let fitness = fs::read_to_string(temp_dir.path().join("avg_fitness.txt")).unwrap();
        assert_eq!(fitness.matches(',').count(), 4);
        let scores = fs::read_to_string(temp_dir.path().join("avg_score.txt")).unwrap();
        assert_eq!(scores.matches(',').count(), 4);
    }
}
