//! # SubsetExchangeCrossover
//!
//! Each parent donates a subset of its genes to the other. Donor pools are the
//! whole chromosome when genes may repeat, and otherwise only the genes the other
//! parent lacks, so no child ever receives a gene twice.
//!
//! Exchange sizes `(num_a, num_b)` are tried in random order, skipping pairs that
//! would push either child out of the length bounds. For each admissible size pair,
//! gene subsets are enumerated from shuffled donor pools and the first pair of
//! children accepted by the validity predicate wins. After
//! [`MAX_CROSSOVER_ATTEMPTS`] rejected candidates the parents are returned as they
//! were.

use tracing::trace;

use super::CrossoverStrategy;
use crate::chromosome::{genes_absent_from, without_genes, Chromosome, Gene, SearchSpace};
use crate::combinations::combinations;
use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// Number of candidate children checked before a pair is declared unmateable.
pub const MAX_CROSSOVER_ATTEMPTS: usize = 2000;

#[derive(Debug, Clone, Copy, Default)]
pub struct SubsetExchangeCrossover;

impl SubsetExchangeCrossover {
    pub fn new() -> Self {
        Self
    }

    /// Crosses two parents.
    ///
    /// Returns the two children, or copies of the unmodified parents if no valid
    /// exchange exists or none was found within the attempt budget.
    pub fn cross<G: Gene>(
        &self,
        parent_a: &[G],
        parent_b: &[G],
        space: &SearchSpace<'_, G>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Chromosome<G>, Chromosome<G>)> {
        let (mut donor_a, mut donor_b) = if space.repeated_genes_allowed {
            (parent_a.to_vec(), parent_b.to_vec())
        } else {
            (
                genes_absent_from(parent_a, parent_b),
                genes_absent_from(parent_b, parent_a),
            )
        };
        rng.shuffle(&mut donor_a);
        rng.shuffle(&mut donor_b);

        let mut attempts = 0;
        for num_a in rng.shuffled_sizes(donor_a.len()) {
            for num_b in rng.shuffled_sizes(donor_b.len()) {
                // Donor pools are drawn from the parents, so neither subtraction underflows.
                let length_a = parent_a.len() - num_a + num_b;
                let length_b = parent_b.len() - num_b + num_a;
                if !space.bounds.contains(length_a) || !space.bounds.contains(length_b) {
                    continue;
                }

                for genes_a in combinations(&donor_a, num_a)? {
                    for genes_b in combinations(&donor_b, num_b)? {
                        attempts += 1;

                        let mut child_a = without_genes(parent_a, &genes_a);
                        child_a.extend(genes_b.iter().cloned());
                        let mut child_b = without_genes(parent_b, &genes_b);
                        child_b.extend(genes_a.iter().cloned());

                        if space.is_valid(&child_a) && space.is_valid(&child_b) {
                            return Ok((child_a, child_b));
                        }

                        if attempts >= MAX_CROSSOVER_ATTEMPTS {
                            trace!(attempts, "crossover budget exhausted, keeping parents");
                            return Ok((parent_a.to_vec(), parent_b.to_vec()));
                        }
                    }
                }
            }
        }

        trace!(attempts, "no admissible crossover, keeping parents");
        Ok((parent_a.to_vec(), parent_b.to_vec()))
    }
}

impl<G: Gene> CrossoverStrategy<G> for SubsetExchangeCrossover {
    fn mate(
        &self,
        pairs: Vec<(Chromosome<G>, Chromosome<G>)>,
        space: &SearchSpace<'_, G>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Chromosome<G>>> {
        let mut children = Vec::with_capacity(pairs.len() * 2);
        for (parent_a, parent_b) in pairs {
            let (child_a, child_b) = self.cross(&parent_a, &parent_b, space, rng)?;
            children.push(child_a);
            children.push(child_b);
        }
        Ok(children)
    }
}
