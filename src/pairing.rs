//! # Pairing
//!
//! Pairing turns the identifiers returned by selection into mating pairs.

use std::fmt::Debug;

use crate::error::Result;
use crate::individual::IndividualId;
use crate::rng::RandomNumberGenerator;

/// Groups selected identifiers into mating pairs.
pub trait PairingStrategy: Debug {
    fn pair(
        &self,
        ids: &[IndividualId],
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<(IndividualId, IndividualId)>>;
}

/// Random perfect matching of the selected identifiers.
///
/// With an odd number of identifiers one random identifier is left out. Since
/// selection may return duplicates, an individual can be paired with itself, which
/// simply carries it into the crossover stage unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPairing;

impl RandomPairing {
    pub fn new() -> Self {
        Self
    }
}

impl PairingStrategy for RandomPairing {
    fn pair(
        &self,
        ids: &[IndividualId],
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<(IndividualId, IndividualId)>> {
        let mut shuffled = ids.to_vec();
        rng.shuffle(&mut shuffled);
        if shuffled.len() % 2 == 1 {
            shuffled.pop();
        }

        Ok(shuffled
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .collect())
    }
}
