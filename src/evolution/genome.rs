//! Fixed-length binary genomes and their variation operators

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GeneticError};
use crate::game::ACTION_SPACE;

/// A fixed-length bit string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genome {
    bits: Vec<bool>,
}

impl Genome {
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Each bit is an independent fair coin
    pub fn random<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Self {
        Self {
            bits: (0..length).map(|_| rng.gen::<bool>()).collect(),
        }
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Single-point crossover at a uniformly random cut in `[0, len)`
    ///
    /// The first child takes `self` up to the cut and `other` after it; the
    /// second child is the complement.
    pub fn crossover<R: Rng + ?Sized>(
        &self,
        other: &Genome,
        rng: &mut R,
    ) -> Result<(Genome, Genome), GeneticError> {
        self.check_compatible(other)?;
        let cut = rng.gen_range(0..self.len());
        self.crossover_at(other, cut)
    }

    /// Single-point crossover at a fixed cut
    pub fn crossover_at(&self, other: &Genome, cut: usize) -> Result<(Genome, Genome), GeneticError> {
        self.check_compatible(other)?;
        let cut = cut.min(self.len());

        let mut first = Vec::with_capacity(self.len());
        first.extend_from_slice(&self.bits[..cut]);
        first.extend_from_slice(&other.bits[cut..]);

        let mut second = Vec::with_capacity(self.len());
        second.extend_from_slice(&other.bits[..cut]);
        second.extend_from_slice(&self.bits[cut..]);

        Ok((Genome::from_bits(first), Genome::from_bits(second)))
    }

    /// Flip each bit independently with probability `rate`
    pub fn mutate<R: Rng + ?Sized>(&mut self, rate: f64, rng: &mut R) {
        for bit in self.bits.iter_mut() {
            if rng.gen::<f64>() < rate {
                *bit = !*bit;
            }
        }
    }

    /// Fraction of set bits in each quarter, in action index order
    ///
    /// Trailing bits that do not fill a whole quarter are ignored.
    pub fn direction_preferences(&self) -> Result<[f64; ACTION_SPACE], GeneticError> {
        if self.is_empty() {
            return Err(GeneticError::EmptyGenome);
        }
        let quarter = self.len() / ACTION_SPACE;
        if quarter == 0 {
            return Err(GeneticError::Config(ConfigError::GenomeTooShort {
                min: ACTION_SPACE,
                value: self.len(),
            }));
        }

        let mut preferences = [0.0; ACTION_SPACE];
        for (i, chunk) in self.bits.chunks_exact(quarter).take(ACTION_SPACE).enumerate() {
            let ones = chunk.iter().filter(|&&b| b).count();
            preferences[i] = ones as f64 / quarter as f64;
        }
        Ok(preferences)
    }

    fn check_compatible(&self, other: &Genome) -> Result<(), GeneticError> {
        if self.len() != other.len() {
            return Err(GeneticError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        if self.is_empty() {
            return Err(GeneticError::EmptyGenome);
        }
        Ok(())
    }
}

/// `size` random genomes of `length` bits
pub fn initialize_population<R: Rng + ?Sized>(
    size: usize,
    length: usize,
    rng: &mut R,
) -> Result<Vec<Genome>, GeneticError> {
    if size == 0 {
        return Err(GeneticError::EmptyPopulation);
    }
    if length == 0 {
        return Err(GeneticError::EmptyGenome);
    }
    Ok((0..size).map(|_| Genome::random(length, rng)).collect())
}
