//! Generational loop of the genetic algorithm

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::config::GaConfig;
use super::fitness::{evaluate_genome, FitnessReport};
use super::genome::{initialize_population, Genome};
use super::selection::roulette_wheel_selection;
use crate::error::GeneticError;
use crate::game::Game;

/// Statistics of one evaluated generation
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSummary {
    /// Index of the generation that was evaluated
    pub generation: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    /// Mean over genomes of each genome's mean episode score
    pub mean_score: f64,
    /// Fittest genome of the evaluated generation; the first one wins ties
    pub best_genome: Genome,
}

/// Population of genomes plus the master random stream that drives it
///
/// The master generator draws the initial population, one evaluation seed per
/// genome per generation, and every selection, crossover and mutation, so a
/// seeded run replays exactly.
pub struct GeneticAlgorithm {
    config: GaConfig,
    population: Vec<Genome>,
    generation: usize,
    rng: StdRng,
}

impl GeneticAlgorithm {
    /// Validate `config` and draw a random initial population
    pub fn new(config: GaConfig) -> Result<Self, GeneticError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: GaConfig, mut rng: StdRng) -> Result<Self, GeneticError> {
        config.validate()?;
        let population =
            initialize_population(config.population_size, config.genome_length, &mut rng)?;
        Ok(Self {
            config,
            population,
            generation: 0,
            rng,
        })
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    /// Index of the generation the current population belongs to
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Score every genome of the current population
    ///
    /// Genomes are evaluated in parallel, each on its own game seeded from
    /// the master stream, and reports come back in population order.
    pub fn evaluate_population(&mut self) -> Result<Vec<FitnessReport>, GeneticError> {
        let seeds: Vec<u64> = (0..self.population.len()).map(|_| self.rng.gen()).collect();
        let game_config = self.config.game_config();
        let fitness_config = &self.config.fitness;
        let generation = self.generation;

        self.population
            .par_iter()
            .zip(seeds.par_iter())
            .map(|(genome, &seed)| -> Result<FitnessReport, GeneticError> {
                let mut game = Game::new(game_config.clone(), seed)?;
                evaluate_genome(genome, &mut game, generation, fitness_config)
            })
            .collect()
    }

    /// Evaluate the current population, then replace it with its offspring
    pub fn step(&mut self) -> Result<GenerationSummary, GeneticError> {
        let reports = self.evaluate_population()?;
        let summary = self.summarize(&reports)?;
        debug!(
            "generation {}: best {:.2}, mean {:.2}",
            summary.generation, summary.best_fitness, summary.mean_fitness
        );

        let fitness: Vec<f64> = reports.iter().map(|r| r.fitness).collect();
        self.population = self.breed(&fitness)?;
        self.generation += 1;
        Ok(summary)
    }

    /// Produce a new population of the same size from `n / 2` breeding pairs
    fn breed(&mut self, fitness: &[f64]) -> Result<Vec<Genome>, GeneticError> {
        let mut next = Vec::with_capacity(self.population.len());
        for _ in 0..self.population.len() / 2 {
            let first = roulette_wheel_selection(&self.population, fitness, &mut self.rng)?;
            let second = roulette_wheel_selection(&self.population, fitness, &mut self.rng)?;
            let (mut child_a, mut child_b) = first.crossover(second, &mut self.rng)?;
            child_a.mutate(self.config.mutation_rate, &mut self.rng);
            child_b.mutate(self.config.mutation_rate, &mut self.rng);
            next.push(child_a);
            next.push(child_b);
        }
        Ok(next)
    }

    fn summarize(&self, reports: &[FitnessReport]) -> Result<GenerationSummary, GeneticError> {
        if reports.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let mut best_index = 0;
        let mut fitness_sum = 0.0;
        let mut score_sum = 0.0;
        for (index, report) in reports.iter().enumerate() {
            if report.fitness > reports[best_index].fitness {
                best_index = index;
            }
            fitness_sum += report.fitness;
            score_sum += report.mean_score;
        }

        let n = reports.len() as f64;
        Ok(GenerationSummary {
            generation: self.generation,
            best_fitness: reports[best_index].fitness,
            mean_fitness: fitness_sum / n,
            mean_score: score_sum / n,
            best_genome: self.population[best_index].clone(),
        })
    }
}
