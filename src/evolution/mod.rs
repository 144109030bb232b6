//! # Evolution
//!
//! The run controller: fitness [`Challenge`], run options, the launcher that
//! drives the generation loop and the result it returns.
pub mod builder;
pub mod challenge;
pub mod launcher;
pub mod options;

pub use builder::EvolutionLauncherBuilder;
pub use challenge::Challenge;
pub use launcher::{EvolutionLauncher, EvolutionResult};
pub use options::{GaOptions, GaOptionsBuilder, LogLevel};
