use std::fmt::Debug;

use crate::error::Result;
use crate::individual::{Individual, IndividualId};
use crate::rng::RandomNumberGenerator;

/// Trait for selection strategies in genetic algorithms.
///
/// A selection strategy picks the parent candidates of the next generation from an
/// evaluated population. It returns individual identifiers; the same identifier may
/// appear several times.
///
/// # Examples
///
/// ```
/// use genevo::error::Result;
/// use genevo::individual::{Individual, IndividualId};
/// use genevo::rng::RandomNumberGenerator;
/// use genevo::selection::SelectionStrategy;
///
/// /// Always picks the first individual.
/// #[derive(Debug)]
/// struct FirstOnly;
///
/// impl<G> SelectionStrategy<G> for FirstOnly {
///     fn select(
///         &self,
///         population: &[Individual<G>],
///         _minimize: bool,
///         count: usize,
///         _rng: &mut RandomNumberGenerator,
///     ) -> Result<Vec<IndividualId>> {
///         Ok(population.first().map(|i| vec![i.id(); count]).unwrap_or_default())
///     }
/// }
///
/// let population = vec![Individual::new(IndividualId(7), vec![1, 2])];
/// let mut rng = RandomNumberGenerator::new();
/// let selected = FirstOnly.select(&population, false, 3, &mut rng).unwrap();
/// assert_eq!(selected, vec![IndividualId(7); 3]);
/// ```
pub trait SelectionStrategy<G>: Debug {
    /// Selects `count` individual identifiers from an evaluated population.
    ///
    /// # Arguments
    ///
    /// * `population` - The current population, normalized fitness already computed.
    /// * `minimize` - Whether lower fitness is better.
    /// * `count` - The number of identifiers to return.
    /// * `rng` - The random number generator driving the draws.
    ///
    /// # Errors
    ///
    /// Returns an error if the population is empty while `count > 0`, or if an
    /// individual lacks the fitness information the strategy relies on.
    fn select(
        &self,
        population: &[Individual<G>],
        minimize: bool,
        count: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<IndividualId>>;
}
