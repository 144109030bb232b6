//! # Crossover
//!
//! The `CrossoverStrategy` trait defines how pairs of parent chromosomes are
//! recombined into children. The default strategy, [`SubsetExchangeCrossover`],
//! swaps gene subsets between the parents while keeping both children inside the
//! length bounds and accepted by the validity predicate.
pub mod subset_exchange;

use std::fmt::Debug;

use crate::chromosome::{Chromosome, Gene, SearchSpace};
use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// Recombines parent pairs into children.
pub trait CrossoverStrategy<G: Gene>: Debug {
    /// Crosses every pair and returns the children flattened in pair order, two
    /// children per pair.
    ///
    /// ## Parameters
    ///
    /// - `pairs`: The parent chromosomes to recombine.
    /// - `space`: Length bounds, gene repetition policy and validity predicate the
    ///   children must respect.
    /// - `rng`: The random number generator driving the search.
    fn mate(
        &self,
        pairs: Vec<(Chromosome<G>, Chromosome<G>)>,
        space: &SearchSpace<'_, G>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Chromosome<G>>>;
}

pub use subset_exchange::{SubsetExchangeCrossover, MAX_CROSSOVER_ATTEMPTS};
