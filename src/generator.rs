//! # Chromosome Generation
//!
//! Random chromosomes seed the initial population and replace individuals during
//! diversity repair. Generators never consult the validity predicate; callers keep
//! drawing until a generated chromosome passes it.

use std::fmt::Debug;

use crate::chromosome::{Chromosome, Gene, LengthBounds};
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Produces one random chromosome with a length inside `bounds`.
pub trait ChromosomeGenerator<G: Gene>: Debug {
    fn generate(
        &self,
        bounds: LengthBounds,
        possible_genes: &[G],
        repeated_genes_allowed: bool,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Chromosome<G>>;
}

/// Uniform length, uniform genes.
///
/// With repetition allowed, every gene is drawn independently from the pool.
/// Without it, the chromosome is a uniformly random subset of the pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomChromosomeGenerator;

impl RandomChromosomeGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl<G: Gene> ChromosomeGenerator<G> for RandomChromosomeGenerator {
    fn generate(
        &self,
        bounds: LengthBounds,
        possible_genes: &[G],
        repeated_genes_allowed: bool,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Chromosome<G>> {
        if bounds.min > bounds.max {
            return Err(GeneticError::InvalidArgument(format!(
                "minimum chromosome length {} exceeds maximum {}",
                bounds.min, bounds.max
            )));
        }

        let length = rng.gen_range_inclusive(bounds.min, bounds.max);

        if repeated_genes_allowed {
            return (0..length)
                .map(|_| {
                    rng.choose(possible_genes).cloned().ok_or_else(|| {
                        GeneticError::InvalidArgument(
                            "cannot draw genes from an empty gene pool".to_string(),
                        )
                    })
                })
                .collect();
        }

        if possible_genes.len() < length {
            return Err(GeneticError::InvalidArgument(format!(
                "gene pool of {} genes cannot fill a chromosome of {} distinct genes",
                possible_genes.len(),
                length
            )));
        }

        let mut shuffled = possible_genes.to_vec();
        rng.shuffle(&mut shuffled);
        shuffled.truncate(length);
        Ok(shuffled)
    }
}
