//! # Diversity Maintenance
//!
//! Periodically the population is rebuilt around its best individual: duplicates in
//! the top quartile and the whole bottom three quartiles are replaced with freshly
//! generated chromosomes. Duplicates are detected on canonical chromosomes, see
//! [`ChromosomeComparison`].
//!
//! Replacement chromosomes are drawn until one passes the validity predicate. There
//! is no retry ceiling, so a predicate that is almost never satisfied stalls repair.

use tracing::debug;

use crate::chromosome::{Chromosome, ChromosomeComparison, Gene, SearchSpace};
use crate::error::Result;
use crate::generator::ChromosomeGenerator;
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

#[derive(Debug, Clone)]
pub struct DiversityMaintainer<G> {
    comparison: ChromosomeComparison<G>,
}

impl<G: Gene> DiversityMaintainer<G> {
    pub fn new(comparison: ChromosomeComparison<G>) -> Self {
        Self { comparison }
    }

    pub fn comparison(&self) -> &ChromosomeComparison<G> {
        &self.comparison
    }

    /// Builds the replacement chromosomes for a population sorted best-first.
    ///
    /// The output has one chromosome per input individual. Slot `0` is the best
    /// chromosome unchanged. Slots `1..n / 4` keep their chromosome unless it
    /// duplicates an earlier one, and every later slot gets a fresh chromosome.
    pub fn repair(
        &self,
        population: &[Individual<G>],
        generator: &dyn ChromosomeGenerator<G>,
        space: &SearchSpace<'_, G>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Chromosome<G>>> {
        let Some(best) = population.first() else {
            return Ok(Vec::new());
        };

        let protected = population.len() / 4;
        let canonical: Vec<Chromosome<G>> = population
            .iter()
            .take(protected)
            .map(|individual| self.comparison.canonical(individual.chromosome()))
            .collect();

        let mut repaired = Vec::with_capacity(population.len());
        repaired.push(best.chromosome().to_vec());

        let mut duplicates = 0;
        for rank in 1..protected {
            if canonical[..rank].contains(&canonical[rank]) {
                duplicates += 1;
                repaired.push(fresh_chromosome(generator, space, rng)?);
            } else {
                repaired.push(population[rank].chromosome().to_vec());
            }
        }

        let fresh = population.len() - repaired.len();
        for _ in 0..fresh {
            repaired.push(fresh_chromosome(generator, space, rng)?);
        }

        debug!(duplicates, fresh, "diversity repair");
        Ok(repaired)
    }
}

impl<G> Default for DiversityMaintainer<G> {
    fn default() -> Self {
        Self {
            comparison: ChromosomeComparison::Positional,
        }
    }
}

/// Draws chromosomes until one passes the validity predicate.
fn fresh_chromosome<G: Gene>(
    generator: &dyn ChromosomeGenerator<G>,
    space: &SearchSpace<'_, G>,
    rng: &mut RandomNumberGenerator,
) -> Result<Chromosome<G>> {
    loop {
        let chromosome = generator.generate(
            space.bounds,
            space.possible_genes,
            space.repeated_genes_allowed,
            rng,
        )?;
        if space.is_valid(&chromosome) {
            return Ok(chromosome);
        }
    }
}
