//! Fitness-proportionate selection

use rand::Rng;

use super::genome::Genome;
use crate::error::GeneticError;

/// Draw an index with probability proportional to its fitness
///
/// Scores must be finite and non-negative with a positive total.
pub fn select_index<R: Rng + ?Sized>(fitness: &[f64], rng: &mut R) -> Result<usize, GeneticError> {
    if fitness.is_empty() {
        return Err(GeneticError::EmptyPopulation);
    }
    for (index, &value) in fitness.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(GeneticError::InvalidFitness { index, value });
        }
    }

    let total: f64 = fitness.iter().sum();
    if total <= 0.0 {
        return Err(GeneticError::ZeroTotalFitness);
    }
    if !total.is_finite() {
        return Err(GeneticError::FitnessOverflow);
    }

    let pick = rng.gen_range(0.0..total);
    let mut current = 0.0;
    for (index, &value) in fitness.iter().enumerate() {
        current += value;
        if current > pick {
            return Ok(index);
        }
    }

    // Rounding can leave the running sum just short of `pick`
    fitness
        .iter()
        .rposition(|&value| value > 0.0)
        .ok_or(GeneticError::ZeroTotalFitness)
}

/// Roulette-wheel selection of one parent
pub fn roulette_wheel_selection<'a, R: Rng + ?Sized>(
    population: &'a [Genome],
    fitness: &[f64],
    rng: &mut R,
) -> Result<&'a Genome, GeneticError> {
    if population.is_empty() {
        return Err(GeneticError::EmptyPopulation);
    }
    if population.len() != fitness.len() {
        return Err(GeneticError::FitnessCountMismatch {
            population: population.len(),
            scores: fitness.len(),
        });
    }
    let index = select_index(fitness, rng)?;
    Ok(&population[index])
}
