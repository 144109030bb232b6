use crate::error::{GeneticError, Result};
use crate::individual::{Individual, IndividualId};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that selects individuals through roulette wheel selection.
///
/// Roulette wheel selection (also known as fitness proportionate selection) selects
/// individuals with probability proportional to a weight. The weight is the
/// normalized fitness when maximizing and the inverse normalized fitness when
/// minimizing, so the best individual of the population always carries weight `1`.
/// Duplicates are allowed.
///
/// When every individual shares one fitness value all weights are `1` and the
/// selection is uniform.
///
/// # Examples
///
/// ```
/// use genevo::population::Population;
/// use genevo::rng::RandomNumberGenerator;
/// use genevo::selection::{RouletteWheelSelection, SelectionStrategy};
///
/// let mut population = Population::new();
/// for chromosome in [vec![1], vec![2], vec![3]] {
///     population.add(chromosome).unwrap();
/// }
/// population.evaluate(&|c: &[i32]| c[0] as f64).unwrap();
///
/// let mut rng = RandomNumberGenerator::new();
/// let selected = RouletteWheelSelection::new()
///     .select(population.individuals(), false, 10, &mut rng)
///     .unwrap();
/// assert_eq!(selected.len(), 10);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RouletteWheelSelection;

impl RouletteWheelSelection {
    /// Creates a new RouletteWheelSelection strategy.
    pub fn new() -> Self {
        Self
    }

    /// Collects the selection weight of every individual.
    ///
    /// # Errors
    ///
    /// Returns an error if any individual has not been normalized yet.
    fn calculate_weights<G>(&self, population: &[Individual<G>], minimize: bool) -> Result<Vec<f64>> {
        population
            .iter()
            .map(|individual| {
                let weight = if minimize {
                    individual.inverse_normalized_fitness()
                } else {
                    individual.normalized_fitness()
                };
                weight.ok_or_else(|| {
                    GeneticError::FitnessCalculation(format!(
                        "individual {} has no normalized fitness; evaluate the population before selection",
                        individual.id()
                    ))
                })
            })
            .collect()
    }

    /// Spins the wheel once and returns the index of the selected individual.
    fn select_individual(&self, weights: &[f64], total: f64, rng: &mut RandomNumberGenerator) -> usize {
        // All-zero weights cannot happen for normalized fitness; fall back to uniform.
        if total <= 0.0 {
            return rng.gen_range_inclusive(0, weights.len() - 1);
        }

        let target = rng.uniform(total);
        let mut cumulative = 0.0;
        for (i, &weight) in weights.iter().enumerate() {
            cumulative += weight;
            if target < cumulative {
                return i;
            }
        }

        // If we get here, it's due to floating-point errors, so return the last individual
        weights.len() - 1
    }
}

impl<G> SelectionStrategy<G> for RouletteWheelSelection {
    fn select(
        &self,
        population: &[Individual<G>],
        minimize: bool,
        count: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<IndividualId>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let weights = self.calculate_weights(population, minimize)?;
        let total: f64 = weights.iter().sum();

        Ok((0..count)
            .map(|_| population[self.select_individual(&weights, total, rng)].id())
            .collect())
    }
}
