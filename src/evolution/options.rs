//! # GaOptions
//!
//! The `GaOptions` struct holds the hyperparameters of a run: population size,
//! chromosome length bounds, gene pool, reproduction rates, optimization direction,
//! termination criterion, diversity period and logging level.
//!
//! Options are only constructed through [`GaOptionsBuilder`], which validates every
//! field and every cross-field rule eagerly, so a `GaOptions` value is always
//! consistent.
//!
//! ## Example
//!
//! ```rust
//! use genevo::evolution::options::{GaOptions, LogLevel};
//! use genevo::termination::TerminationCriterion;
//!
//! let options = GaOptions::builder()
//!     .population_size(50)
//!     .chromosome_length(2, 6)
//!     .possible_genes((0..20).collect())
//!     .minimize(false)
//!     .termination(TerminationCriterion::MaxGenerations(30))
//!     .log_level(LogLevel::Minimal)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.population_size(), 50);
//! assert_eq!(options.max_genes_changed_per_mutation(), 3);
//!
//! // Elitism of 1% on 50 individuals would not keep anyone.
//! let invalid = GaOptions::builder()
//!     .population_size(50)
//!     .chromosome_length(2, 6)
//!     .possible_genes((0..20).collect())
//!     .elitism_rate(0.01)
//!     .build();
//! assert!(invalid.is_err());
//! ```
//!
//! ## Defaults
//!
//! | option | default |
//! |---|---|
//! | `repeated_genes_allowed` | `false` |
//! | `elitism_rate` | `0.05` |
//! | `mutation_rate` | `0.3` |
//! | `mutation_mode` | `MutationMode::Either` |
//! | `max_genes_changed_per_mutation` | `max_length / 3 + 1` (see below) |
//! | `minimize` | `true` |
//! | `termination` | `TerminationCriterion::MaxGenerations(100)` |
//! | `keep_diversity` | disabled |
//! | `log_level` | `LogLevel::None` |
//! | `chromosome_comparison` | `ChromosomeComparison::Positional` |
//!
//! An explicit `max_genes_changed_per_mutation` must lie in `[1, max_length)`.
//! The default is exempt: with `max_length == 1` no explicit value is accepted,
//! and the default of `1` is the only breadth that still lets mutation act.

use crate::chromosome::{ChromosomeComparison, Gene, LengthBounds};
use crate::error::{GeneticError, Result};
use crate::mutation::MutationMode;
use crate::termination::TerminationCriterion;

/// How much progress information a run emits through `tracing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogLevel {
    /// Per-generation summary plus reproduction counts and the best chromosome.
    Verbose,
    /// One event per generation with the best fitness.
    Minimal,
    #[default]
    None,
}

#[derive(Debug, Clone)]
pub struct GaOptions<G> {
    population_size: usize,
    bounds: LengthBounds,
    possible_genes: Vec<G>,
    repeated_genes_allowed: bool,
    elitism_rate: f64,
    mutation_rate: f64,
    mutation_mode: MutationMode,
    max_genes_changed_per_mutation: usize,
    minimize: bool,
    termination: TerminationCriterion,
    keep_diversity: Option<usize>,
    log_level: LogLevel,
    chromosome_comparison: ChromosomeComparison<G>,
}

impl<G: Gene> GaOptions<G> {
    /// Returns a builder with every optional field at its default.
    pub fn builder() -> GaOptionsBuilder<G> {
        GaOptionsBuilder::default()
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn bounds(&self) -> LengthBounds {
        self.bounds
    }

    pub fn possible_genes(&self) -> &[G] {
        &self.possible_genes
    }

    pub fn repeated_genes_allowed(&self) -> bool {
        self.repeated_genes_allowed
    }

    pub fn elitism_rate(&self) -> f64 {
        self.elitism_rate
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn mutation_mode(&self) -> MutationMode {
        self.mutation_mode
    }

    pub fn max_genes_changed_per_mutation(&self) -> usize {
        self.max_genes_changed_per_mutation
    }

    pub fn minimize(&self) -> bool {
        self.minimize
    }

    pub fn termination(&self) -> TerminationCriterion {
        self.termination
    }

    /// Period, in generations, of diversity repair. `None` disables it.
    pub fn keep_diversity(&self) -> Option<usize> {
        self.keep_diversity
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn chromosome_comparison(&self) -> &ChromosomeComparison<G> {
        &self.chromosome_comparison
    }
}

/// Builder for `GaOptions`.
///
/// Provides a fluent interface; [`GaOptionsBuilder::build`] checks every rule.
#[derive(Debug, Clone)]
pub struct GaOptionsBuilder<G> {
    population_size: Option<usize>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    possible_genes: Option<Vec<G>>,
    repeated_genes_allowed: bool,
    elitism_rate: f64,
    mutation_rate: f64,
    mutation_mode: MutationMode,
    max_genes_changed_per_mutation: Option<usize>,
    minimize: bool,
    termination: TerminationCriterion,
    keep_diversity: Option<usize>,
    log_level: LogLevel,
    chromosome_comparison: ChromosomeComparison<G>,
}

impl<G> Default for GaOptionsBuilder<G> {
    fn default() -> Self {
        Self {
            population_size: None,
            min_length: None,
            max_length: None,
            possible_genes: None,
            repeated_genes_allowed: false,
            elitism_rate: 0.05,
            mutation_rate: 0.3,
            mutation_mode: MutationMode::Either,
            max_genes_changed_per_mutation: None,
            minimize: true,
            termination: TerminationCriterion::default(),
            keep_diversity: None,
            log_level: LogLevel::None,
            chromosome_comparison: ChromosomeComparison::Positional,
        }
    }
}

impl<G: Gene> GaOptionsBuilder<G> {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    /// Sets the inclusive chromosome length range.
    pub fn chromosome_length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    pub fn min_length_chromosome(mut self, value: usize) -> Self {
        self.min_length = Some(value);
        self
    }

    pub fn max_length_chromosome(mut self, value: usize) -> Self {
        self.max_length = Some(value);
        self
    }

    pub fn possible_genes(mut self, value: Vec<G>) -> Self {
        self.possible_genes = Some(value);
        self
    }

    pub fn repeated_genes_allowed(mut self, value: bool) -> Self {
        self.repeated_genes_allowed = value;
        self
    }

    /// Share of the population copied unchanged into the next generation.
    pub fn elitism_rate(mut self, value: f64) -> Self {
        self.elitism_rate = value;
        self
    }

    /// Share of the population mutated every generation.
    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = value;
        self
    }

    pub fn mutation_mode(mut self, value: MutationMode) -> Self {
        self.mutation_mode = value;
        self
    }

    /// Upper bound on genes touched by one mutation; must be in `[1, max_length)`.
    pub fn max_genes_changed_per_mutation(mut self, value: usize) -> Self {
        self.max_genes_changed_per_mutation = Some(value);
        self
    }

    /// `true` when lower fitness is better.
    pub fn minimize(mut self, value: bool) -> Self {
        self.minimize = value;
        self
    }

    pub fn termination(mut self, value: TerminationCriterion) -> Self {
        self.termination = value;
        self
    }

    /// Runs diversity repair every `period` generations.
    pub fn keep_diversity(mut self, period: usize) -> Self {
        self.keep_diversity = Some(period);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = value;
        self
    }

    pub fn chromosome_comparison(mut self, value: ChromosomeComparison<G>) -> Self {
        self.chromosome_comparison = value;
        self
    }

    /// Builds the `GaOptions` instance.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` naming the first missing field or the
    /// first rule that does not hold.
    pub fn build(self) -> Result<GaOptions<G>> {
        let population_size = required(self.population_size, "population_size")?;
        let min = required(self.min_length, "min_length_chromosome")?;
        let max = required(self.max_length, "max_length_chromosome")?;
        let possible_genes = required(self.possible_genes, "possible_genes")?;

        ensure(population_size > 0, || "population_size must be greater than 0".to_string())?;
        ensure(max >= 1, || "max_length_chromosome must be at least 1".to_string())?;
        ensure(min <= max, || {
            format!(
                "min_length_chromosome ({}) must not exceed max_length_chromosome ({})",
                min, max
            )
        })?;
        ensure(!possible_genes.is_empty(), || "possible_genes must not be empty".to_string())?;
        ensure(self.repeated_genes_allowed || possible_genes.len() >= max, || {
            format!(
                "{} possible genes cannot fill a chromosome of {} distinct genes",
                possible_genes.len(),
                max
            )
        })?;

        ensure((0.0..=1.0).contains(&self.elitism_rate), || {
            format!("elitism_rate must be in [0, 1], got {}", self.elitism_rate)
        })?;
        ensure(
            self.elitism_rate == 0.0 || self.elitism_rate * population_size as f64 >= 1.0,
            || {
                format!(
                    "elitism_rate {} keeps no individual of a population of {}",
                    self.elitism_rate, population_size
                )
            },
        )?;
        ensure((0.0..=1.0).contains(&self.mutation_rate), || {
            format!("mutation_rate must be in [0, 1], got {}", self.mutation_rate)
        })?;

        let max_genes_changed_per_mutation = match self.max_genes_changed_per_mutation {
            Some(value) => {
                ensure(value >= 1 && value < max, || {
                    format!(
                        "max_genes_changed_per_mutation must be in [1, {}), got {}",
                        max, value
                    )
                })?;
                value
            }
            // Below `max` whenever `max >= 2`; `max == 1` keeps a breadth of 1.
            None => max / 3 + 1,
        };

        if let TerminationCriterion::GoalFitness(goal) = self.termination {
            ensure(goal.is_finite(), || format!("goal fitness must be finite, got {}", goal))?;
        }
        if let Some(period) = self.keep_diversity {
            ensure(period >= 1, || "keep_diversity period must be at least 1".to_string())?;
        }

        Ok(GaOptions {
            population_size,
            bounds: LengthBounds::new(min, max),
            possible_genes,
            repeated_genes_allowed: self.repeated_genes_allowed,
            elitism_rate: self.elitism_rate,
            mutation_rate: self.mutation_rate,
            mutation_mode: self.mutation_mode,
            max_genes_changed_per_mutation,
            minimize: self.minimize,
            termination: self.termination,
            keep_diversity: self.keep_diversity,
            log_level: self.log_level,
            chromosome_comparison: self.chromosome_comparison,
        })
    }
}

fn required<T>(value: Option<T>, name: &str) -> Result<T> {
    value.ok_or_else(|| GeneticError::Configuration(format!("{} must be set", name)))
}

fn ensure<F>(condition: bool, message: F) -> Result<()>
where
    F: FnOnce() -> String,
{
    if condition {
        Ok(())
    } else {
        Err(GeneticError::Configuration(message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> GaOptionsBuilder<u8> {
        GaOptions::builder()
            .population_size(20)
            .chromosome_length(2, 4)
            .possible_genes((0..10).collect())
    }

    fn config_error(result: Result<GaOptions<u8>>) -> String {
        match result {
            Err(GeneticError::Configuration(message)) => message,
            other => panic!("expected a configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let options = base().build().unwrap();
        assert_eq!(options.population_size(), 20);
        assert_eq!(options.bounds(), LengthBounds::new(2, 4));
        assert!(!options.repeated_genes_allowed());
        assert_eq!(options.elitism_rate(), 0.05);
        assert_eq!(options.mutation_rate(), 0.3);
        assert_eq!(options.mutation_mode(), MutationMode::Either);
        assert_eq!(options.max_genes_changed_per_mutation(), 2);
        assert!(options.minimize());
        assert_eq!(options.termination(), TerminationCriterion::MaxGenerations(100));
        assert_eq!(options.keep_diversity(), None);
        assert_eq!(options.log_level(), LogLevel::None);
        assert!(matches!(options.chromosome_comparison(), ChromosomeComparison::Positional));
    }

    #[test]
    fn test_missing_required_fields() {
        let message = config_error(GaOptions::<u8>::builder().chromosome_length(1, 2).build());
        assert!(message.contains("population_size"));

        let message = config_error(
            GaOptions::<u8>::builder()
                .population_size(4)
                .chromosome_length(1, 2)
                .build(),
        );
        assert!(message.contains("possible_genes"));

        let message = config_error(
            GaOptions::builder()
                .population_size(4)
                .min_length_chromosome(1)
                .possible_genes(vec![1u8, 2])
                .build(),
        );
        assert!(message.contains("max_length_chromosome"));
    }

    #[test]
    fn test_length_rules() {
        config_error(base().chromosome_length(5, 4).build());
        config_error(base().chromosome_length(0, 0).build());
        assert!(base().chromosome_length(0, 1).build().is_ok());
    }

    #[test]
    fn test_gene_pool_rules() {
        config_error(base().possible_genes(vec![]).build());
        config_error(base().possible_genes(vec![1, 2, 3]).build());
        assert!(base()
            .possible_genes(vec![1, 2, 3])
            .repeated_genes_allowed(true)
            .build()
            .is_ok());
    }

    #[test]
    fn test_rate_rules() {
        config_error(base().population_size(0).build());
        config_error(base().elitism_rate(1.5).build());
        config_error(base().elitism_rate(0.04).build());
        assert!(base().elitism_rate(0.0).build().is_ok());
        assert!(base().elitism_rate(0.05).build().is_ok());
        config_error(base().mutation_rate(-0.1).build());
        config_error(base().mutation_rate(f64::NAN).build());
    }

    #[test]
    fn test_mutation_breadth_rules() {
        config_error(base().max_genes_changed_per_mutation(0).build());
        config_error(base().max_genes_changed_per_mutation(4).build());
        let options = base().max_genes_changed_per_mutation(3).build().unwrap();
        assert_eq!(options.max_genes_changed_per_mutation(), 3);
    }

    #[test]
    fn test_default_breadth_for_single_gene_chromosomes() {
        let options = base().chromosome_length(1, 1).build().unwrap();
        assert_eq!(options.max_genes_changed_per_mutation(), 1);
        config_error(base().chromosome_length(1, 1).max_genes_changed_per_mutation(1).build());

        for max in 2..=30 {
            let options = base()
                .chromosome_length(1, max)
                .repeated_genes_allowed(true)
                .build()
                .unwrap();
            assert!(options.max_genes_changed_per_mutation() < max);
        }
    }

    #[test]
    fn test_termination_and_diversity_rules() {
        config_error(base().termination(TerminationCriterion::GoalFitness(f64::INFINITY)).build());
        config_error(base().keep_diversity(0).build());
        let options = base().keep_diversity(5).build().unwrap();
        assert_eq!(options.keep_diversity(), Some(5));
    }
}
