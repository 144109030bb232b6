//! # Error Types
//!
//! This module defines the error type shared by every part of the engine.
//!
//! All variants describe programmer or configuration mistakes: a hyperparameter
//! that fails validation, a malformed call into one of the operators, or a
//! population that is asked to grow past its capacity. None of them are
//! retried. Running out of attempts while searching for a valid crossover or
//! mutation is *not* an error; those operators fall back to their input.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use genevo::error::{GeneticError, Result};
//!
//! fn check_rate(rate: f64) -> Result<f64> {
//!     if !(0.0..=1.0).contains(&rate) {
//!         return Err(GeneticError::Configuration(format!(
//!             "rate must lie in [0, 1], got {}",
//!             rate
//!         )));
//!     }
//!     Ok(rate)
//! }
//!
//! assert!(check_rate(0.5).is_ok());
//! assert!(check_rate(1.5).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use genevo::error::{GeneticError, OptionExt};
//!
//! fn best_score(scores: &[i32]) -> genevo::error::Result<i32> {
//!     scores.iter().max().cloned().ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//!
//! assert_eq!(best_score(&[1, 3, 2]).unwrap(), 3);
//! ```

use thiserror::Error;

/// Represents errors that can occur in the genetic algorithm engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneticError {
    /// A hyperparameter failed validation, or a required one was never set.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An operator was called with arguments outside its contract.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An insert would grow the population past its configured size.
    #[error("Capacity exceeded: population already holds {capacity} individuals")]
    CapacityExceeded { capacity: usize },

    /// A replacement collection does not match the size of the population it replaces.
    #[error("Shape mismatch: expected {expected} chromosomes, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when a fitness value is missing or not a finite number.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),
}

/// A specialized Result type for genetic algorithm operations.
///
/// This type is a convenience wrapper around `std::result::Result` with the error type
/// fixed to `GeneticError`.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
///
/// ## Examples
///
/// ```rust
/// use genevo::error::{GeneticError, OptionExt};
///
/// let missing: Option<u8> = None;
/// let result = missing.ok_or_else_genetic(|| GeneticError::EmptyPopulation);
/// assert_eq!(result, Err(GeneticError::EmptyPopulation));
/// ```
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = GeneticError::CapacityExceeded { capacity: 20 };
        assert_eq!(
            err.to_string(),
            "Capacity exceeded: population already holds 20 individuals"
        );

        let err = GeneticError::ShapeMismatch {
            expected: 4,
            actual: 3,
        };
        assert!(err.to_string().contains("expected 4"));
    }

    #[test]
    fn test_option_ext() {
        let some = Some(5).ok_or_else_genetic(|| GeneticError::EmptyPopulation);
        assert_eq!(some, Ok(5));

        let none: Option<i32> = None;
        match none.ok_or_else_genetic(|| GeneticError::InvalidArgument("nothing".to_string())) {
            Err(GeneticError::InvalidArgument(msg)) => assert_eq!(msg, "nothing"),
            other => panic!("Expected InvalidArgument error, got {:?}", other),
        }
    }
}
