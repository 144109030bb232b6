//! # Termination
//!
//! A run stops when its single active [`TerminationCriterion`] is met. The
//! controller keeps a [`TerminationState`] whose shape follows the criterion and
//! updates it once per generation; the checks themselves are pure functions.
//!
//! ## Example
//!
//! ```rust
//! use genevo::termination::TerminationCriterion;
//!
//! let mut state = TerminationCriterion::GoalFitness(10.0).initial_state(false);
//! state.record(1, 7.5);
//! assert!(!state.is_met());
//! state.record(2, 12.0);
//! assert!(state.is_met());
//! ```

use crate::error::{GeneticError, Result};

/// The stopping rule of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationCriterion {
    /// Stop once this many generations have been completed.
    MaxGenerations(usize),
    /// Stop once the best fitness reaches this value in the optimization direction.
    GoalFitness(f64),
}

impl TerminationCriterion {
    /// Builds a criterion from its tag name and numeric target.
    ///
    /// Recognized tags are `max_num_generation_reached` and `goal_fitness_reached`.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::InvalidArgument` for an unknown tag, or for a
    /// generation goal that is negative or not a whole number.
    pub fn from_tag(tag: &str, target: f64) -> Result<Self> {
        match tag {
            "max_num_generation_reached" => {
                if target < 0.0 || target.fract() != 0.0 || !target.is_finite() {
                    return Err(GeneticError::InvalidArgument(format!(
                        "generation goal must be a non-negative whole number, got {}",
                        target
                    )));
                }
                Ok(TerminationCriterion::MaxGenerations(target as usize))
            }
            "goal_fitness_reached" => Ok(TerminationCriterion::GoalFitness(target)),
            other => Err(GeneticError::InvalidArgument(format!(
                "unknown termination criterion '{}'",
                other
            ))),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            TerminationCriterion::MaxGenerations(_) => "max_num_generation_reached",
            TerminationCriterion::GoalFitness(_) => "goal_fitness_reached",
        }
    }

    /// The state of a run that has not completed any generation yet.
    pub fn initial_state(&self, minimize: bool) -> TerminationState {
        match *self {
            TerminationCriterion::MaxGenerations(generation_goal) => TerminationState::MaxGenerations {
                generation_count: 0,
                generation_goal,
            },
            TerminationCriterion::GoalFitness(goal_fitness) => TerminationState::GoalFitness {
                generation_fitness: None,
                goal_fitness,
                minimize,
            },
        }
    }
}

impl Default for TerminationCriterion {
    fn default() -> Self {
        TerminationCriterion::MaxGenerations(100)
    }
}

/// Progress of a run, as seen by its termination criterion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TerminationState {
    MaxGenerations {
        generation_count: usize,
        generation_goal: usize,
    },
    GoalFitness {
        /// Best fitness of the latest recorded generation; `None` before the first record.
        generation_fitness: Option<f64>,
        goal_fitness: f64,
        minimize: bool,
    },
}

impl TerminationState {
    /// Records the outcome of a generation.
    pub fn record(&mut self, generation: usize, best_fitness: f64) {
        match self {
            TerminationState::MaxGenerations { generation_count, .. } => *generation_count = generation,
            TerminationState::GoalFitness { generation_fitness, .. } => {
                *generation_fitness = Some(best_fitness)
            }
        }
    }

    pub fn is_met(&self) -> bool {
        check(self)
    }
}

/// Returns `true` once `generation_count` reaches `generation_goal`.
pub fn max_num_generation_reached(generation_count: usize, generation_goal: usize) -> bool {
    generation_count >= generation_goal
}

/// Returns `true` once `generation_fitness` is at least as good as `goal_fitness`.
pub fn goal_fitness_reached(generation_fitness: f64, goal_fitness: f64, minimize: bool) -> bool {
    if minimize {
        generation_fitness <= goal_fitness
    } else {
        generation_fitness >= goal_fitness
    }
}

/// Evaluates a termination state.
pub fn check(state: &TerminationState) -> bool {
    match *state {
        TerminationState::MaxGenerations {
            generation_count,
            generation_goal,
        } => max_num_generation_reached(generation_count, generation_goal),
        TerminationState::GoalFitness {
            generation_fitness,
            goal_fitness,
            minimize,
        } => generation_fitness.is_some_and(|fitness| goal_fitness_reached(fitness, goal_fitness, minimize)),
    }
}
