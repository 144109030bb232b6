use criterion::{black_box, criterion_group, criterion_main, Criterion};
use genevo::{
    chromosome::{AcceptAll, LengthBounds, SearchSpace},
    crossover::SubsetExchangeCrossover,
    evolution::{EvolutionLauncherBuilder, GaOptions},
    mutation::SubsetMutation,
    rng::RandomNumberGenerator,
    termination::TerminationCriterion,
};

fn bench_crossover(c: &mut Criterion) {
    let crossover = SubsetExchangeCrossover::new();
    let mut rng = RandomNumberGenerator::from_seed(42);

    let mut group = c.benchmark_group("subset_exchange_crossover");
    for length in [4usize, 16, 64].iter() {
        let genes: Vec<u32> = (0..(*length as u32 * 4)).collect();
        let space = SearchSpace::new(LengthBounds::new(1, *length * 2), &genes, false, &AcceptAll);
        let parent_a: Vec<u32> = (0..*length as u32).collect();
        let parent_b: Vec<u32> = (*length as u32 / 2..*length as u32 * 3 / 2).collect();

        group.bench_function(&format!("cross_{}", length), |b| {
            b.iter(|| {
                let result = crossover.cross(
                    black_box(&parent_a),
                    black_box(&parent_b),
                    &space,
                    black_box(&mut rng),
                );
                assert!(result.is_ok());
            })
        });
    }

    // Only the parents are valid, so every call exhausts the attempt budget.
    let genes: Vec<u32> = (0..64).collect();
    let reject_all = |_: &[u32]| false;
    let space = SearchSpace::new(LengthBounds::new(1, 64), &genes, false, &reject_all);
    let parent_a: Vec<u32> = (0..32).collect();
    let parent_b: Vec<u32> = (32..64).collect();
    group.bench_function("cross_exhausted_budget", |b| {
        b.iter(|| {
            let result = crossover.cross(black_box(&parent_a), black_box(&parent_b), &space, &mut rng);
            assert!(result.is_ok());
        })
    });
    group.finish();
}

fn bench_mutation(c: &mut Criterion) {
    let mutation = SubsetMutation::new();
    let mut rng = RandomNumberGenerator::from_seed(42);
    let genes: Vec<u32> = (0..100).collect();
    let space = SearchSpace::new(LengthBounds::new(5, 50), &genes, false, &AcceptAll);
    let chromosome: Vec<u32> = (0..25).collect();

    let mut group = c.benchmark_group("subset_mutation");
    group.bench_function("substitute", |b| {
        b.iter(|| {
            let result = mutation.substitute(black_box(&chromosome), 5, &space, &mut rng);
            assert!(result.is_ok());
        })
    });
    group.bench_function("resize", |b| {
        b.iter(|| {
            let result = mutation.resize(black_box(&chromosome), 5, &space, &mut rng);
            assert!(result.is_ok());
        })
    });
    group.finish();
}

fn bench_optimize(c: &mut Criterion) {
    let options = GaOptions::builder()
        .population_size(40)
        .chromosome_length(2, 8)
        .possible_genes((0..40).collect())
        .minimize(false)
        .termination(TerminationCriterion::MaxGenerations(20))
        .build()
        .unwrap();
    let launcher = EvolutionLauncherBuilder::new()
        .with_options(options)
        .with_challenge(|c: &[u32]| c.iter().sum::<u32>() as f64)
        .build()
        .unwrap();

    c.bench_function("optimize_sum_20_generations", |b| {
        b.iter(|| {
            let mut rng = RandomNumberGenerator::from_seed(42);
            let result = launcher.optimize(black_box(&mut rng));
            assert!(result.is_ok());
        })
    });
}

criterion_group!(benches, bench_crossover, bench_mutation, bench_optimize);
criterion_main!(benches);
