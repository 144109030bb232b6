use std::collections::HashSet;

use genevo::{
    chromosome::ChromosomeComparison,
    evolution::{EvolutionLauncherBuilder, GaOptions, LogLevel},
    mutation::MutationMode,
    rng::RandomNumberGenerator,
    termination::TerminationCriterion,
};

const MAX_WEIGHT: u32 = 15;
const PENALTY_PER_UNIT: f64 = 10.0;

/// (name, price, weight)
const ITEMS: [(&str, u32, u32); 9] = [
    ("pen", 5, 3),
    ("pencil", 4, 2),
    ("food", 7, 6),
    ("rubber", 3, 1),
    ("book", 10, 9),
    ("scissors", 6, 3),
    ("glasses", 7, 5),
    ("case", 7, 7),
    ("sharpener", 2, 1),
];

fn item(name: &str) -> (u32, u32) {
    ITEMS
        .iter()
        .find(|(item, _, _)| *item == name)
        .map(|&(_, price, weight)| (price, weight))
        .unwrap_or((0, 0))
}

/// Total price, minus a penalty for every unit of weight over the limit.
fn knapsack_value(chromosome: &[&'static str]) -> f64 {
    let (price, weight) = chromosome
        .iter()
        .map(|name| item(name))
        .fold((0u32, 0u32), |(p, w), (price, weight)| (p + price, w + weight));
    let overweight = weight.saturating_sub(MAX_WEIGHT);
    price as f64 - PENALTY_PER_UNIT * overweight as f64
}

fn knapsack_options() -> GaOptions<&'static str> {
    GaOptions::builder()
        .population_size(50)
        .chromosome_length(1, 9)
        .possible_genes(ITEMS.iter().map(|(name, _, _)| *name).collect())
        .repeated_genes_allowed(false)
        .minimize(false)
        .elitism_rate(0.1)
        .mutation_rate(0.2)
        .mutation_mode(MutationMode::Either)
        .keep_diversity(5)
        .chromosome_comparison(ChromosomeComparison::ordered())
        .termination(TerminationCriterion::MaxGenerations(30))
        .log_level(LogLevel::Verbose)
        .build()
        .unwrap()
}

#[test]
fn test_knapsack() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    let mut rng = RandomNumberGenerator::from_seed(42);
    let launcher = EvolutionLauncherBuilder::new()
        .with_options(knapsack_options())
        .with_challenge(knapsack_value)
        .build()
        .unwrap();

    let result = launcher.optimize(&mut rng).unwrap();

    assert_eq!(result.generations, 30);
    assert_eq!(result.best_fitness_per_generation.len(), 30);
    assert_eq!(result.population.len(), 50);

    // Elitism and diversity repair both keep the best individual.
    assert!(result
        .best_fitness_per_generation
        .windows(2)
        .all(|w| w[0] <= w[1]));

    for individual in &result.population {
        let genes: HashSet<_> = individual.chromosome().iter().collect();
        assert_eq!(genes.len(), individual.len());
        assert!((1..=9).contains(&individual.len()));
        assert!(individual.fitness().is_some());
    }

    // The optimum is 27; anything at or above 20 is a reasonable packing.
    let best = result.best_fitness().unwrap();
    assert!(best >= 20.0, "best value {}", best);
    assert!(best <= 27.0);
    assert_eq!(knapsack_value(result.best_chromosome()), best);
}

#[test]
fn test_knapsack_respects_validity() {
    let mut rng = RandomNumberGenerator::from_seed(42);
    let within_weight = |c: &[&'static str]| {
        c.iter().map(|name| item(name).1).sum::<u32>() <= MAX_WEIGHT
    };
    let launcher = EvolutionLauncherBuilder::new()
        .with_options(knapsack_options())
        .with_challenge(knapsack_value)
        .with_validity(within_weight)
        .build()
        .unwrap();

    let result = launcher.optimize(&mut rng).unwrap();

    assert!(result
        .population
        .iter()
        .all(|individual| within_weight(individual.chromosome())));
    assert!(result.best_fitness().unwrap() >= 20.0);
}
