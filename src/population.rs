//! # Population
//!
//! The `Population` is a fixed arena of [`Individual`] slots. It is filled once at
//! the start of a run; every later generation overwrites the slots in place through
//! [`Population::reset_all`] instead of allocating new individuals.
//!
//! Ordering is only meaningful right after [`Population::sort`]: the best individual
//! is then at index `0`.
//!
//! ## Example
//!
//! ```rust
//! use genevo::population::Population;
//!
//! let mut population = Population::with_capacity_limit(2);
//! population.add(vec![1, 2]).unwrap();
//! population.add(vec![3, 4]).unwrap();
//! assert!(population.add(vec![5]).is_err());
//!
//! let sum = |c: &[i32]| c.iter().sum::<i32>() as f64;
//! population.evaluate(&sum).unwrap();
//! population.sort(false);
//! assert_eq!(population.best().unwrap().chromosome(), &[3, 4]);
//! ```

use std::cmp::Ordering;
use std::ops::Index;

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::evolution::Challenge;
use crate::individual::{Individual, IndividualId};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Population<G> {
    individuals: Vec<Individual<G>>,
    capacity: Option<usize>,
    next_id: u64,
}

impl<G> Population<G> {
    /// Creates an empty population without a size cap.
    pub fn new() -> Self {
        Self {
            individuals: Vec::new(),
            capacity: None,
            next_id: 0,
        }
    }

    /// Creates an empty population that refuses to grow past `capacity`.
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            individuals: Vec::with_capacity(capacity),
            capacity: Some(capacity),
            next_id: 0,
        }
    }

    /// Wraps `chromosome` in a new individual and appends it.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::CapacityExceeded` if the population is already full.
    pub fn add(&mut self, chromosome: Chromosome<G>) -> Result<IndividualId> {
        if let Some(capacity) = self.capacity {
            if self.individuals.len() >= capacity {
                return Err(GeneticError::CapacityExceeded { capacity });
            }
        }

        let id = IndividualId(self.next_id);
        self.next_id += 1;
        self.individuals.push(Individual::new(id, chromosome));
        Ok(id)
    }

    /// Overwrites every slot, in order, with the given chromosomes.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::ShapeMismatch` if `chromosomes` does not have exactly
    /// one entry per individual. The population is left untouched in that case.
    pub fn reset_all(&mut self, chromosomes: Vec<Chromosome<G>>) -> Result<()> {
        if chromosomes.len() != self.individuals.len() {
            return Err(GeneticError::ShapeMismatch {
                expected: self.individuals.len(),
                actual: chromosomes.len(),
            });
        }

        for (individual, chromosome) in self.individuals.iter_mut().zip(chromosomes) {
            individual.reset(chromosome);
        }
        Ok(())
    }

    /// Scores every individual whose fitness is stale, then recomputes the
    /// normalized fitness values over the whole population.
    pub fn evaluate(&mut self, challenge: &dyn Challenge<G>) -> Result<()> {
        if self.individuals.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        for individual in &mut self.individuals {
            individual.evaluate(challenge)?;
        }
        self.normalize()
    }

    fn normalize(&mut self) -> Result<()> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for individual in &self.individuals {
            let fitness = evaluated_fitness(individual)?;
            min = min.min(fitness);
            max = max.max(fitness);
        }

        let range = max - min;
        for individual in &mut self.individuals {
            if range > 0.0 {
                let normalized = (evaluated_fitness(individual)? - min) / range;
                individual.set_normalized_fitness(normalized, 1.0 - normalized);
            } else {
                individual.set_normalized_fitness(1.0, 1.0);
            }
        }
        Ok(())
    }

    /// Sorts best-first: ascending fitness when minimizing, descending otherwise.
    /// Unevaluated individuals sort last.
    pub fn sort(&mut self, minimize: bool) {
        self.individuals.sort_by(|a, b| match (a.fitness(), b.fitness()) {
            (Some(x), Some(y)) => {
                let ordering = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
                if minimize {
                    ordering
                } else {
                    ordering.reverse()
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
    }

    /// Evaluates, normalizes and sorts in one step.
    pub fn evaluate_and_sort(&mut self, challenge: &dyn Challenge<G>, minimize: bool) -> Result<()> {
        self.evaluate(challenge)?;
        self.sort(minimize);
        Ok(())
    }

    /// The individual in slot `0`; the best one after a sort.
    pub fn best(&self) -> Option<&Individual<G>> {
        self.individuals.first()
    }

    pub fn get(&self, id: IndividualId) -> Option<&Individual<G>> {
        self.individuals.iter().find(|individual| individual.id() == id)
    }

    pub fn individuals(&self) -> &[Individual<G>] {
        &self.individuals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual<G>> {
        self.individuals.iter()
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn capacity_limit(&self) -> Option<usize> {
        self.capacity
    }

    /// Clones every chromosome, in slot order.
    pub fn chromosomes(&self) -> Vec<Chromosome<G>>
    where
        G: Clone,
    {
        self.individuals
            .iter()
            .map(|individual| individual.chromosome().to_vec())
            .collect()
    }
}

fn evaluated_fitness<G>(individual: &Individual<G>) -> Result<f64> {
    individual.fitness().ok_or_else(|| {
        GeneticError::FitnessCalculation(format!(
            "individual {} has not been evaluated",
            individual.id()
        ))
    })
}

impl<G> Default for Population<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> Index<usize> for Population<G> {
    type Output = Individual<G>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.individuals[index]
    }
}

impl<'a, G> IntoIterator for &'a Population<G> {
    type Item = &'a Individual<G>;
    type IntoIter = std::slice::Iter<'a, Individual<G>>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(chromosome: &[i32]) -> f64 {
        chromosome.iter().sum::<i32>() as f64
    }

    fn population_of(chromosomes: Vec<Vec<i32>>) -> Population<i32> {
        let mut population = Population::with_capacity_limit(chromosomes.len());
        for chromosome in chromosomes {
            population.add(chromosome).unwrap();
        }
        population
    }

    #[test]
    fn test_add_respects_capacity() {
        let mut population = Population::with_capacity_limit(2);
        let first = population.add(vec![1]).unwrap();
        let second = population.add(vec![2]).unwrap();
        assert_ne!(first, second);

        match population.add(vec![3]) {
            Err(GeneticError::CapacityExceeded { capacity }) => assert_eq!(capacity, 2),
            other => panic!("Expected CapacityExceeded error, got {:?}", other),
        }
        assert_eq!(population.len(), 2);
    }

    #[test]
    fn test_uncapped_population_grows() {
        let mut population = Population::new();
        for i in 0..50 {
            population.add(vec![i]).unwrap();
        }
        assert_eq!(population.len(), 50);
        assert_eq!(population.capacity_limit(), None);
    }

    #[test]
    fn test_normalization() {
        let mut population = population_of(vec![vec![1], vec![3], vec![5]]);
        population.evaluate(&sum).unwrap();

        let normalized: Vec<f64> = population
            .iter()
            .map(|i| i.normalized_fitness().unwrap())
            .collect();
        assert_eq!(normalized, vec![0.0, 0.5, 1.0]);

        let inverse: Vec<f64> = population
            .iter()
            .map(|i| i.inverse_normalized_fitness().unwrap())
            .collect();
        assert_eq!(inverse, vec![1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_normalization_with_equal_fitness() {
        let mut population = population_of(vec![vec![2], vec![1, 1], vec![2, 0]]);
        population.evaluate(&sum).unwrap();

        for individual in &population {
            assert_eq!(individual.normalized_fitness(), Some(1.0));
            assert_eq!(individual.inverse_normalized_fitness(), Some(1.0));
        }
    }

    #[test]
    fn test_sort_direction() {
        let mut population = population_of(vec![vec![2], vec![9], vec![4]]);
        population.evaluate(&sum).unwrap();

        population.sort(false);
        assert_eq!(population.best().unwrap().fitness(), Some(9.0));

        population.sort(true);
        assert_eq!(population.best().unwrap().fitness(), Some(2.0));
        assert_eq!(population[2].fitness(), Some(9.0));
    }

    #[test]
    fn test_reset_all_keeps_ids_and_clears_fitness() {
        let mut population = population_of(vec![vec![1], vec![2]]);
        population.evaluate(&sum).unwrap();
        let ids: Vec<IndividualId> = population.iter().map(|i| i.id()).collect();

        population.reset_all(vec![vec![7], vec![8]]).unwrap();

        assert_eq!(population.chromosomes(), vec![vec![7], vec![8]]);
        assert!(population.iter().all(|i| i.fitness().is_none()));
        let after: Vec<IndividualId> = population.iter().map(|i| i.id()).collect();
        assert_eq!(ids, after);
    }

    #[test]
    fn test_reset_all_shape_mismatch() {
        let mut population = population_of(vec![vec![1], vec![2]]);

        match population.reset_all(vec![vec![1]]) {
            Err(GeneticError::ShapeMismatch { expected, actual }) => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("Expected ShapeMismatch error, got {:?}", other),
        }
        assert_eq!(population.chromosomes(), vec![vec![1], vec![2]]);
    }

    #[test]
    fn test_get_by_id() {
        let mut population = Population::new();
        let id = population.add(vec![4, 2]).unwrap();
        assert_eq!(population.get(id).unwrap().chromosome(), &[4, 2]);
        assert!(population.get(IndividualId(99)).is_none());
    }

    #[test]
    fn test_evaluate_empty_population() {
        let mut population: Population<i32> = Population::new();
        assert_eq!(population.evaluate(&sum), Err(GeneticError::EmptyPopulation));
    }

    #[test]
    fn test_evaluate_only_scores_stale_individuals() {
        use std::cell::Cell;

        let calls = Cell::new(0);
        let counting = |c: &[i32]| {
            calls.set(calls.get() + 1);
            c.len() as f64
        };

        let mut population = population_of(vec![vec![1], vec![2, 3]]);
        population.evaluate(&counting).unwrap();
        population.evaluate(&counting).unwrap();
        assert_eq!(calls.get(), 2);

        population.reset_all(vec![vec![1], vec![2]]).unwrap();
        population.evaluate(&counting).unwrap();
        assert_eq!(calls.get(), 4);
    }
}
