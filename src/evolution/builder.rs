use crate::{
    chromosome::{AcceptAll, Chromosome, Gene, Validity},
    crossover::{CrossoverStrategy, SubsetExchangeCrossover},
    diversity::DiversityMaintainer,
    error::{GeneticError, Result},
    generator::{ChromosomeGenerator, RandomChromosomeGenerator},
    mutation::{MutationStrategy, SubsetMutation},
    pairing::{PairingStrategy, RandomPairing},
    selection::{RouletteWheelSelection, SelectionStrategy},
};

use super::{Challenge, EvolutionLauncher, GaOptions};

/// Assembles an [`EvolutionLauncher`].
///
/// Options and a challenge are required. Every other collaborator falls back to
/// the default operator: [`AcceptAll`], [`RandomChromosomeGenerator`],
/// [`RouletteWheelSelection`], [`RandomPairing`], [`SubsetExchangeCrossover`] and
/// [`SubsetMutation`].
///
/// # Example
///
/// ```rust
/// use genevo::evolution::{EvolutionLauncherBuilder, GaOptions};
/// use genevo::rng::RandomNumberGenerator;
/// use genevo::termination::TerminationCriterion;
///
/// let options = GaOptions::builder()
///     .population_size(20)
///     .chromosome_length(3, 3)
///     .possible_genes((1..=9).collect())
///     .minimize(false)
///     .termination(TerminationCriterion::MaxGenerations(15))
///     .build()
///     .unwrap();
///
/// let launcher = EvolutionLauncherBuilder::new()
///     .with_options(options)
///     .with_challenge(|c: &[u32]| c.iter().sum::<u32>() as f64)
///     .with_validity(|c: &[u32]| !c.contains(&9))
///     .build()
///     .unwrap();
///
/// let result = launcher.optimize(&mut RandomNumberGenerator::from_seed(42)).unwrap();
/// assert!(!result.best_chromosome().contains(&9));
/// ```
pub struct EvolutionLauncherBuilder<G: Gene> {
    options: Option<GaOptions<G>>,
    challenge: Option<Box<dyn Challenge<G>>>,
    validity: Option<Box<dyn Validity<G>>>,
    generator: Option<Box<dyn ChromosomeGenerator<G>>>,
    selection: Option<Box<dyn SelectionStrategy<G>>>,
    pairing: Option<Box<dyn PairingStrategy>>,
    crossover: Option<Box<dyn CrossoverStrategy<G>>>,
    mutation: Option<Box<dyn MutationStrategy<G>>>,
    seeds: Vec<Chromosome<G>>,
}

impl<G: Gene + 'static> EvolutionLauncherBuilder<G> {
    pub fn new() -> Self {
        Self {
            options: None,
            challenge: None,
            validity: None,
            generator: None,
            selection: None,
            pairing: None,
            crossover: None,
            mutation: None,
            seeds: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: GaOptions<G>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_challenge(mut self, challenge: impl Challenge<G> + 'static) -> Self {
        self.challenge = Some(Box::new(challenge));
        self
    }

    pub fn with_validity(mut self, validity: impl Validity<G> + 'static) -> Self {
        self.validity = Some(Box::new(validity));
        self
    }

    pub fn with_generator(mut self, generator: impl ChromosomeGenerator<G> + 'static) -> Self {
        self.generator = Some(Box::new(generator));
        self
    }

    pub fn with_selection_strategy(
        mut self,
        selection_strategy: impl SelectionStrategy<G> + 'static,
    ) -> Self {
        self.selection = Some(Box::new(selection_strategy));
        self
    }

    pub fn with_pairing_strategy(mut self, pairing_strategy: impl PairingStrategy + 'static) -> Self {
        self.pairing = Some(Box::new(pairing_strategy));
        self
    }

    pub fn with_crossover_strategy(
        mut self,
        crossover_strategy: impl CrossoverStrategy<G> + 'static,
    ) -> Self {
        self.crossover = Some(Box::new(crossover_strategy));
        self
    }

    pub fn with_mutation_strategy(
        mut self,
        mutation_strategy: impl MutationStrategy<G> + 'static,
    ) -> Self {
        self.mutation = Some(Box::new(mutation_strategy));
        self
    }

    /// Chromosomes placed in the initial population before random generation
    /// fills the remaining slots.
    pub fn with_seed_chromosomes(mut self, seeds: Vec<Chromosome<G>>) -> Self {
        self.seeds = seeds;
        self
    }

    pub fn build(self) -> Result<EvolutionLauncher<G>> {
        let options = self
            .options
            .ok_or_else(|| GeneticError::Configuration("Options not specified".to_string()))?;

        let challenge = self
            .challenge
            .ok_or_else(|| GeneticError::Configuration("Challenge not specified".to_string()))?;

        let diversity = DiversityMaintainer::new(options.chromosome_comparison().clone());

        Ok(EvolutionLauncher {
            options,
            challenge,
            validity: self.validity.unwrap_or_else(|| Box::new(AcceptAll)),
            generator: self
                .generator
                .unwrap_or_else(|| Box::new(RandomChromosomeGenerator)),
            selection: self
                .selection
                .unwrap_or_else(|| Box::new(RouletteWheelSelection)),
            pairing: self.pairing.unwrap_or_else(|| Box::new(RandomPairing)),
            crossover: self
                .crossover
                .unwrap_or_else(|| Box::new(SubsetExchangeCrossover)),
            mutation: self.mutation.unwrap_or_else(|| Box::new(SubsetMutation)),
            diversity,
            seeds: self.seeds,
        })
    }
}

impl<G: Gene + 'static> Default for EvolutionLauncherBuilder<G> {
    fn default() -> Self {
        Self::new()
    }
}
