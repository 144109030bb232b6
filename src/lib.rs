pub mod chromosome;
pub mod combinations;
pub mod crossover;
pub mod diversity;
pub mod error;
pub mod evolution;
pub mod generator;
pub mod individual;
pub mod mutation;
pub mod pairing;
pub mod population;
pub mod rng;
pub mod selection;
pub mod termination;

// Re-export commonly used types for convenience
pub use chromosome::{Chromosome, ChromosomeComparison, Gene, LengthBounds, SearchSpace, Validity};
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{
    Challenge, EvolutionLauncher, EvolutionLauncherBuilder, EvolutionResult, GaOptions, LogLevel,
};
pub use individual::{Individual, IndividualId};
pub use mutation::MutationMode;
pub use population::Population;
pub use rng::RandomNumberGenerator;
pub use termination::TerminationCriterion;
