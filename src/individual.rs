//! # Individual
//!
//! An `Individual` owns one chromosome together with the fitness values derived
//! from it. Individuals live in fixed population slots and are reset in place when
//! a new generation replaces their chromosome; a reset clears every derived value,
//! so stale fitness can never be read for a new chromosome.

use std::fmt;

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::evolution::Challenge;

/// Identifier of an individual, unique within its population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndividualId(pub u64);

impl fmt::Display for IndividualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A chromosome plus its fitness state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual<G> {
    id: IndividualId,
    chromosome: Chromosome<G>,
    fitness: Option<f64>,
    normalized_fitness: Option<f64>,
    inverse_normalized_fitness: Option<f64>,
}

impl<G> Individual<G> {
    /// Creates an unevaluated individual.
    pub fn new(id: IndividualId, chromosome: Chromosome<G>) -> Self {
        Self {
            id,
            chromosome,
            fitness: None,
            normalized_fitness: None,
            inverse_normalized_fitness: None,
        }
    }

    pub fn id(&self) -> IndividualId {
        self.id
    }

    pub fn chromosome(&self) -> &[G] {
        &self.chromosome
    }

    pub fn into_chromosome(self) -> Chromosome<G> {
        self.chromosome
    }

    /// Raw fitness, `None` until evaluated.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Fitness rescaled to `[0, 1]` over the current population.
    pub fn normalized_fitness(&self) -> Option<f64> {
        self.normalized_fitness
    }

    /// `1 - normalized_fitness`, used as the selection weight when minimizing.
    pub fn inverse_normalized_fitness(&self) -> Option<f64> {
        self.inverse_normalized_fitness
    }

    pub fn len(&self) -> usize {
        self.chromosome.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosome.is_empty()
    }

    /// Scores the chromosome with `challenge` unless a fitness is already cached.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::FitnessCalculation` if the score is NaN or infinite.
    pub fn evaluate(&mut self, challenge: &dyn Challenge<G>) -> Result<f64> {
        if let Some(fitness) = self.fitness {
            return Ok(fitness);
        }

        let score = challenge.score(&self.chromosome);
        if !score.is_finite() {
            return Err(GeneticError::FitnessCalculation(format!(
                "Non-finite fitness score encountered for individual {}: {}",
                self.id, score
            )));
        }

        self.fitness = Some(score);
        Ok(score)
    }

    pub(crate) fn set_normalized_fitness(&mut self, normalized: f64, inverse: f64) {
        self.normalized_fitness = Some(normalized);
        self.inverse_normalized_fitness = Some(inverse);
    }

    /// Replaces the chromosome in place and clears every derived fitness value.
    pub fn reset(&mut self, chromosome: Chromosome<G>) {
        self.chromosome = chromosome;
        self.fitness = None;
        self.normalized_fitness = None;
        self.inverse_normalized_fitness = None;
    }
}

impl<G: fmt::Debug> fmt::Display for Individual<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fitness {
            Some(fitness) => write!(f, "Chromosome: {:?}, Fitness: {}", self.chromosome, fitness),
            None => write!(f, "Chromosome: {:?}, Fitness: unevaluated", self.chromosome),
        }
    }
}
