use std::collections::HashMap;
use std::fmt;

use tracing::{debug, info};

use super::{
    challenge::Challenge,
    options::{GaOptions, LogLevel},
};
use crate::{
    chromosome::{Chromosome, Gene, SearchSpace, Validity},
    crossover::CrossoverStrategy,
    diversity::DiversityMaintainer,
    error::{GeneticError, OptionExt, Result},
    generator::ChromosomeGenerator,
    individual::{Individual, IndividualId},
    mutation::MutationStrategy,
    pairing::PairingStrategy,
    population::Population,
    rng::RandomNumberGenerator,
    selection::SelectionStrategy,
};

/// The outcome of a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionResult<G> {
    /// The best individual of the final population.
    pub best: Individual<G>,
    /// The final population, sorted best-first.
    pub population: Population<G>,
    /// Best fitness after every completed generation, in generation order.
    pub best_fitness_per_generation: Vec<f64>,
    /// Number of completed generations.
    pub generations: usize,
}

impl<G> EvolutionResult<G> {
    pub fn best_chromosome(&self) -> &[G] {
        self.best.chromosome()
    }

    pub fn best_fitness(&self) -> Option<f64> {
        self.best.fitness()
    }
}

/// Counts describing one generation advance.
#[derive(Debug, Clone, Copy)]
struct GenerationSummary {
    elite: usize,
    offspring: usize,
    mutated: usize,
}

/// The steps of the generation state machine.
trait GenerationCycle<G: Gene> {
    /// Fills an empty population with seeds and valid random chromosomes.
    fn populate(
        &self,
        population: &mut Population<G>,
        space: &SearchSpace<'_, G>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()>;

    /// Produces the chromosomes of the next generation from an evaluated, sorted
    /// population.
    fn next_generation(
        &self,
        population: &Population<G>,
        space: &SearchSpace<'_, G>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Vec<Chromosome<G>>, GenerationSummary)>;

    /// Replaces duplicates and low-ranked individuals with fresh chromosomes.
    fn restore_diversity(
        &self,
        population: &mut Population<G>,
        space: &SearchSpace<'_, G>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()>;
}

/// Runs the genetic algorithm with a fixed configuration and set of operators.
///
/// Launchers are built with [`EvolutionLauncherBuilder`](super::builder::EvolutionLauncherBuilder).
/// A launcher holds no run state, so [`EvolutionLauncher::optimize`] can be called
/// repeatedly.
pub struct EvolutionLauncher<G: Gene> {
    pub(super) options: GaOptions<G>,
    pub(super) challenge: Box<dyn Challenge<G>>,
    pub(super) validity: Box<dyn Validity<G>>,
    pub(super) generator: Box<dyn ChromosomeGenerator<G>>,
    pub(super) selection: Box<dyn SelectionStrategy<G>>,
    pub(super) pairing: Box<dyn PairingStrategy>,
    pub(super) crossover: Box<dyn CrossoverStrategy<G>>,
    pub(super) mutation: Box<dyn MutationStrategy<G>>,
    pub(super) diversity: DiversityMaintainer<G>,
    pub(super) seeds: Vec<Chromosome<G>>,
}

impl<G: Gene> EvolutionLauncher<G> {
    pub fn options(&self) -> &GaOptions<G> {
        &self.options
    }

    /// Runs the algorithm until the termination criterion is met.
    ///
    /// # Arguments
    ///
    /// * `rng` - The random number generator driving every random decision of the run.
    ///
    /// # Returns
    ///
    /// The best individual, the final population and the per-generation history
    /// of best fitness values.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - A seed chromosome is out of bounds, invalid, or there are too many seeds
    /// - The fitness function returns a non-finite score
    /// - A custom operator returns identifiers or chromosome counts the population cannot use
    pub fn optimize(&self, rng: &mut RandomNumberGenerator) -> Result<EvolutionResult<G>> {
        let options = &self.options;
        let minimize = options.minimize();
        let space = SearchSpace::new(
            options.bounds(),
            options.possible_genes(),
            options.repeated_genes_allowed(),
            self.validity.as_ref(),
        );

        let mut population = Population::with_capacity_limit(options.population_size());
        self.populate(&mut population, &space, rng)?;
        population.evaluate_and_sort(self.challenge.as_ref(), minimize)?;

        let mut state = options.termination().initial_state(minimize);
        state.record(0, best_fitness(&population)?);

        let mut history = Vec::new();
        let mut generation = 0;
        while !state.is_met() {
            generation += 1;

            let (chromosomes, summary) = self.next_generation(&population, &space, rng)?;
            population.reset_all(chromosomes)?;

            if let Some(period) = options.keep_diversity() {
                if generation % period == 0 {
                    population.evaluate_and_sort(self.challenge.as_ref(), minimize)?;
                    self.restore_diversity(&mut population, &space, rng)?;
                }
            }

            population.evaluate_and_sort(self.challenge.as_ref(), minimize)?;
            let fitness = best_fitness(&population)?;
            history.push(fitness);
            state.record(generation, fitness);
            self.log_generation(generation, fitness, &population, summary);
        }

        population.evaluate_and_sort(self.challenge.as_ref(), minimize)?;
        let best = population
            .best()
            .cloned()
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)?;

        Ok(EvolutionResult {
            best,
            population,
            best_fitness_per_generation: history,
            generations: generation,
        })
    }

    fn log_generation(
        &self,
        generation: usize,
        fitness: f64,
        population: &Population<G>,
        summary: GenerationSummary,
    ) {
        match self.options.log_level() {
            LogLevel::None => {}
            LogLevel::Minimal => info!(generation, best_fitness = fitness, "generation complete"),
            LogLevel::Verbose => {
                info!(generation, best_fitness = fitness, "generation complete");
                debug!(
                    generation,
                    elite = summary.elite,
                    offspring = summary.offspring,
                    mutated = summary.mutated,
                    best = ?population.best().map(|individual| individual.chromosome()),
                    "generation details"
                );
            }
        }
    }

    fn parents_of(
        &self,
        population: &Population<G>,
        pairs: &[(IndividualId, IndividualId)],
    ) -> Result<Vec<(Chromosome<G>, Chromosome<G>)>> {
        let by_id: HashMap<IndividualId, &Individual<G>> = population
            .iter()
            .map(|individual| (individual.id(), individual))
            .collect();
        let lookup = |id: &IndividualId| {
            by_id
                .get(id)
                .map(|individual| individual.chromosome().to_vec())
                .ok_or_else_genetic(|| {
                    GeneticError::InvalidArgument(format!("no individual with id {}", id))
                })
        };

        pairs
            .iter()
            .map(|(a, b)| -> Result<_> { Ok((lookup(a)?, lookup(b)?)) })
            .collect()
    }
}

impl<G: Gene> GenerationCycle<G> for EvolutionLauncher<G> {
    fn populate(
        &self,
        population: &mut Population<G>,
        space: &SearchSpace<'_, G>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()> {
        for seed in &self.seeds {
            if !space.bounds.contains(seed.len()) {
                return Err(GeneticError::InvalidArgument(format!(
                    "seed chromosome {:?} has length {} outside [{}, {}]",
                    seed,
                    seed.len(),
                    space.bounds.min,
                    space.bounds.max
                )));
            }
            if !space.is_valid(seed) {
                return Err(GeneticError::InvalidArgument(format!(
                    "seed chromosome {:?} is rejected by the validity predicate",
                    seed
                )));
            }
            population.add(seed.clone())?;
        }

        while population.len() < self.options.population_size() {
            let chromosome = self.generator.generate(
                space.bounds,
                space.possible_genes,
                space.repeated_genes_allowed,
                rng,
            )?;
            if space.is_valid(&chromosome) {
                population.add(chromosome)?;
            }
        }
        Ok(())
    }

    fn next_generation(
        &self,
        population: &Population<G>,
        space: &SearchSpace<'_, G>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Vec<Chromosome<G>>, GenerationSummary)> {
        let size = population.len();
        let mut elite = (size as f64 * self.options.elitism_rate()).floor() as usize;
        let mut offspring = size - elite;
        if offspring % 2 == 1 {
            elite += 1;
            offspring -= 1;
        }

        let selected = self.selection.select(
            population.individuals(),
            self.options.minimize(),
            offspring,
            rng,
        )?;
        let pairs = self.pairing.pair(&selected, rng)?;
        let parents = self.parents_of(population, &pairs)?;
        let children = self.crossover.mate(parents, space, rng)?;

        let mut next: Vec<Chromosome<G>> = population.individuals()[..elite]
            .iter()
            .map(|individual| individual.chromosome().to_vec())
            .collect();
        next.extend(children);

        let mutable = next.len() - elite;
        let wanted = (size as f64 * self.options.mutation_rate()).floor() as usize;
        let mutated = wanted.min(mutable.saturating_sub(1));
        let indices: Vec<usize> = rng
            .sample_indices(mutable, mutated)
            .into_iter()
            .map(|index| index + elite)
            .collect();

        let batch = indices.iter().map(|&index| next[index].clone()).collect();
        let mutants = self.mutation.mutate(
            batch,
            self.options.mutation_mode(),
            self.options.max_genes_changed_per_mutation(),
            space,
            rng,
        )?;
        if mutants.len() != indices.len() {
            return Err(GeneticError::ShapeMismatch {
                expected: indices.len(),
                actual: mutants.len(),
            });
        }
        for (index, mutant) in indices.into_iter().zip(mutants) {
            next[index] = mutant;
        }

        Ok((
            next,
            GenerationSummary {
                elite,
                offspring,
                mutated,
            },
        ))
    }

    fn restore_diversity(
        &self,
        population: &mut Population<G>,
        space: &SearchSpace<'_, G>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()> {
        let repaired = self.diversity.repair(
            population.individuals(),
            self.generator.as_ref(),
            space,
            rng,
        )?;
        population.reset_all(repaired)
    }
}

impl<G: Gene> fmt::Debug for EvolutionLauncher<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvolutionLauncher")
            .field("options", &self.options)
            .field("generator", &self.generator)
            .field("selection", &self.selection)
            .field("pairing", &self.pairing)
            .field("crossover", &self.crossover)
            .field("mutation", &self.mutation)
            .field("seeds", &self.seeds)
            .finish_non_exhaustive()
    }
}

fn best_fitness<G>(population: &Population<G>) -> Result<f64> {
    population
        .best()
        .ok_or_else_genetic(|| GeneticError::EmptyPopulation)?
        .fitness()
        .ok_or_else_genetic(|| {
            GeneticError::FitnessCalculation("best individual has not been evaluated".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::builder::EvolutionLauncherBuilder;
    use crate::termination::TerminationCriterion;

    fn build_launcher(elitism_rate: f64, mutation_rate: f64) -> EvolutionLauncher<u32> {
        let options = GaOptions::builder()
            .population_size(11)
            .chromosome_length(1, 4)
            .possible_genes((0..12).collect())
            .elitism_rate(elitism_rate)
            .mutation_rate(mutation_rate)
            .minimize(false)
            .termination(TerminationCriterion::MaxGenerations(3))
            .build()
            .unwrap();
        EvolutionLauncherBuilder::new()
            .with_options(options)
            .with_challenge(|c: &[u32]| c.iter().sum::<u32>() as f64)
            .build()
            .unwrap()
    }

    fn evaluated(launcher: &EvolutionLauncher<u32>, rng: &mut RandomNumberGenerator) -> Population<u32> {
        let options = launcher.options();
        let space = SearchSpace::new(
            options.bounds(),
            options.possible_genes(),
            options.repeated_genes_allowed(),
            launcher.validity.as_ref(),
        );
        let mut population = Population::with_capacity_limit(options.population_size());
        launcher.populate(&mut population, &space, rng).unwrap();
        population
            .evaluate_and_sort(launcher.challenge.as_ref(), false)
            .unwrap();
        population
    }

    #[test]
    fn test_odd_offspring_count_moves_one_into_elite() {
        let mut rng = RandomNumberGenerator::from_seed(42);
        // floor(11 * 0.1) = 1 elite leaves 10 offspring: even, nothing moves.
        let launcher = build_launcher(0.1, 0.0);
        let population = evaluated(&launcher, &mut rng);
        let space = SearchSpace::new(
            launcher.options().bounds(),
            launcher.options().possible_genes(),
            false,
            launcher.validity.as_ref(),
        );
        let (next, summary) = launcher.next_generation(&population, &space, &mut rng).unwrap();
        assert_eq!((summary.elite, summary.offspring), (1, 10));
        assert_eq!(next.len(), 11);

        // floor(11 * 0.2) = 2 elite leaves 9 offspring: odd, so 3 elite and 8 offspring.
        let launcher = build_launcher(0.2, 0.0);
        let (next, summary) = launcher.next_generation(&population, &space, &mut rng).unwrap();
        assert_eq!((summary.elite, summary.offspring), (3, 8));
        assert_eq!(next.len(), 11);
        for (slot, individual) in next.iter().zip(population.iter()).take(3) {
            assert_eq!(slot.as_slice(), individual.chromosome());
        }
    }

    #[test]
    fn test_mutation_count_leaves_one_individual_untouched() {
        let mut rng = RandomNumberGenerator::from_seed(42);
        let launcher = build_launcher(0.1, 1.0);
        let population = evaluated(&launcher, &mut rng);
        let space = SearchSpace::new(
            launcher.options().bounds(),
            launcher.options().possible_genes(),
            false,
            launcher.validity.as_ref(),
        );
        let (next, summary) = launcher.next_generation(&population, &space, &mut rng).unwrap();
        assert_eq!(summary.mutated, 9);
        assert_eq!(next.len(), 11);
        assert_eq!(next[0].as_slice(), population[0].chromosome());
    }

    #[test]
    fn test_populate_respects_bounds() {
        let mut rng = RandomNumberGenerator::from_seed(42);
        let launcher = build_launcher(0.1, 0.3);
        let population = evaluated(&launcher, &mut rng);
        assert_eq!(population.len(), 11);
        assert!(population.iter().all(|i| (1..=4).contains(&i.len())));
    }
}
