/// The fitness function of an optimisation problem.
///
/// Any `Fn(&[G]) -> f64` closure is a `Challenge`. Scores must be finite.
pub trait Challenge<G> {
    fn score(&self, chromosome: &[G]) -> f64;
}

impl<G, F> Challenge<G> for F
where
    F: Fn(&[G]) -> f64,
{
    fn score(&self, chromosome: &[G]) -> f64 {
        self(chromosome)
    }
}
