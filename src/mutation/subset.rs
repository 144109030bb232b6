use tracing::trace;

use super::{MutationMode, MutationStrategy};
use crate::chromosome::{genes_absent_from, without_genes, Chromosome, Gene, SearchSpace};
use crate::combinations::combinations;
use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// Number of candidate chromosomes checked before a mutation gives up.
pub const MAX_MUTATION_ATTEMPTS: usize = 1000;

/// Mutation by exchanging, adding or removing gene subsets.
///
/// Genes brought in come from the gene pool, minus the genes already present when
/// repetition is disallowed. Every candidate must pass the validity predicate; if
/// none does within [`MAX_MUTATION_ATTEMPTS`] candidates, the chromosome is
/// returned unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubsetMutation;

impl SubsetMutation {
    pub fn new() -> Self {
        Self
    }

    /// Genes a mutation may bring into `chromosome`.
    fn donor_genes<G: Gene>(&self, chromosome: &[G], space: &SearchSpace<'_, G>) -> Chromosome<G> {
        if space.repeated_genes_allowed {
            space.possible_genes.to_vec()
        } else {
            genes_absent_from(space.possible_genes, chromosome)
        }
    }

    /// Replaces between 1 and `max_genes_changed` genes, keeping the length.
    ///
    /// The removed genes are taken out of the chromosome and the new genes are
    /// appended at the end.
    pub fn substitute<G: Gene>(
        &self,
        chromosome: &[G],
        max_genes_changed: usize,
        space: &SearchSpace<'_, G>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Chromosome<G>> {
        let mut donor = self.donor_genes(chromosome, space);
        rng.shuffle(&mut donor);
        let mut present = chromosome.to_vec();
        rng.shuffle(&mut present);

        let max_size = max_genes_changed.min(donor.len()).min(chromosome.len());
        let mut attempts = 0;
        for size in rng.shuffled_sizes(max_size) {
            for genes_in in combinations(&donor, size)? {
                for genes_out in combinations(&present, size)? {
                    attempts += 1;

                    let mut candidate = without_genes(chromosome, &genes_out);
                    candidate.extend(genes_in.iter().cloned());
                    if space.is_valid(&candidate) {
                        return Ok(candidate);
                    }

                    if attempts >= MAX_MUTATION_ATTEMPTS {
                        trace!(attempts, "substitution budget exhausted");
                        return Ok(chromosome.to_vec());
                    }
                }
            }
        }

        Ok(chromosome.to_vec())
    }

    /// Adds or removes between 1 and `max_genes_changed` genes.
    ///
    /// A chromosome at the minimum length always grows and one at the maximum
    /// length always shrinks; otherwise the direction is a coin flip.
    pub fn resize<G: Gene>(
        &self,
        chromosome: &[G],
        max_genes_changed: usize,
        space: &SearchSpace<'_, G>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Chromosome<G>> {
        let length = chromosome.len();
        let grow = if length <= space.bounds.min {
            true
        } else if length >= space.bounds.max {
            false
        } else {
            rng.coin_flip()
        };

        if grow {
            self.add_genes(chromosome, max_genes_changed, space, rng)
        } else {
            self.remove_genes(chromosome, max_genes_changed, space, rng)
        }
    }

    fn add_genes<G: Gene>(
        &self,
        chromosome: &[G],
        max_genes_changed: usize,
        space: &SearchSpace<'_, G>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Chromosome<G>> {
        let mut donor = self.donor_genes(chromosome, space);
        rng.shuffle(&mut donor);

        let room = space.bounds.max.saturating_sub(chromosome.len());
        let max_size = max_genes_changed.min(donor.len()).min(room);
        let mut attempts = 0;
        for size in rng.shuffled_sizes(max_size) {
            for genes_in in combinations(&donor, size)? {
                attempts += 1;

                let mut candidate = chromosome.to_vec();
                candidate.extend(genes_in);
                if space.is_valid(&candidate) {
                    return Ok(candidate);
                }

                if attempts >= MAX_MUTATION_ATTEMPTS {
                    trace!(attempts, "growth budget exhausted");
                    return Ok(chromosome.to_vec());
                }
            }
        }

        Ok(chromosome.to_vec())
    }

    fn remove_genes<G: Gene>(
        &self,
        chromosome: &[G],
        max_genes_changed: usize,
        space: &SearchSpace<'_, G>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Chromosome<G>> {
        let mut present = chromosome.to_vec();
        rng.shuffle(&mut present);

        let slack = chromosome.len().saturating_sub(space.bounds.min);
        let max_size = max_genes_changed.min(slack);
        let mut attempts = 0;
        for size in rng.shuffled_sizes(max_size) {
            for genes_out in combinations(&present, size)? {
                attempts += 1;

                let candidate = without_genes(chromosome, &genes_out);
                if space.is_valid(&candidate) {
                    return Ok(candidate);
                }

                if attempts >= MAX_MUTATION_ATTEMPTS {
                    trace!(attempts, "shrink budget exhausted");
                    return Ok(chromosome.to_vec());
                }
            }
        }

        Ok(chromosome.to_vec())
    }
}

impl<G: Gene> MutationStrategy<G> for SubsetMutation {
    fn mutate(
        &self,
        chromosomes: Vec<Chromosome<G>>,
        mode: MutationMode,
        max_genes_changed: usize,
        space: &SearchSpace<'_, G>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Chromosome<G>>> {
        chromosomes
            .iter()
            .map(|chromosome| {
                let substitute = match mode {
                    MutationMode::Substitute => true,
                    MutationMode::Resize => false,
                    MutationMode::Either => rng.coin_flip(),
                };
                if substitute {
                    self.substitute(chromosome, max_genes_changed, space, rng)
                } else {
                    self.resize(chromosome, max_genes_changed, space, rng)
                }
            })
            .collect()
    }
}
