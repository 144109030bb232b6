//! # Mutation
//!
//! The `MutationStrategy` trait defines how selected chromosomes are perturbed.
//! The default strategy, [`SubsetMutation`], either substitutes genes with genes
//! from the pool or grows/shrinks the chromosome, always keeping it valid.
pub mod subset;

use std::fmt;
use std::str::FromStr;

use crate::chromosome::{Chromosome, Gene, SearchSpace};
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Which kind of mutation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationMode {
    /// Replace genes with genes from the pool; the length is unchanged.
    Substitute,
    /// Add genes from the pool or remove genes; the length changes.
    Resize,
    /// Pick `Substitute` or `Resize` with equal probability, per chromosome.
    #[default]
    Either,
}

impl FromStr for MutationMode {
    type Err = GeneticError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "substitute" => Ok(MutationMode::Substitute),
            "resize" => Ok(MutationMode::Resize),
            "either" => Ok(MutationMode::Either),
            other => Err(GeneticError::InvalidArgument(format!(
                "unknown mutation mode '{}', expected 'substitute', 'resize' or 'either'",
                other
            ))),
        }
    }
}

impl fmt::Display for MutationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MutationMode::Substitute => "substitute",
            MutationMode::Resize => "resize",
            MutationMode::Either => "either",
        };
        f.write_str(name)
    }
}

/// Mutates a batch of chromosomes.
pub trait MutationStrategy<G: Gene>: fmt::Debug {
    /// Returns one mutated chromosome per input chromosome, in input order.
    ///
    /// ## Parameters
    ///
    /// - `chromosomes`: The chromosomes to mutate.
    /// - `mode`: The kind of mutation to apply.
    /// - `max_genes_changed`: Upper bound on the number of genes touched by one mutation.
    /// - `space`: Length bounds, gene pool, repetition policy and validity predicate.
    /// - `rng`: The random number generator driving the search.
    fn mutate(
        &self,
        chromosomes: Vec<Chromosome<G>>,
        mode: MutationMode,
        max_genes_changed: usize,
        space: &SearchSpace<'_, G>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Chromosome<G>>>;
}

pub use subset::{SubsetMutation, MAX_MUTATION_ATTEMPTS};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!("substitute".parse::<MutationMode>(), Ok(MutationMode::Substitute));
        assert_eq!("resize".parse::<MutationMode>(), Ok(MutationMode::Resize));
        assert_eq!("either".parse::<MutationMode>(), Ok(MutationMode::Either));
        assert!(matches!(
            "swap".parse::<MutationMode>(),
            Err(GeneticError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_display_round_trips() {
        for mode in [MutationMode::Substitute, MutationMode::Resize, MutationMode::Either] {
            assert_eq!(mode.to_string().parse::<MutationMode>(), Ok(mode));
        }
    }
}
