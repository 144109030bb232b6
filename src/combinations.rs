//! # Combinations
//!
//! Lazy enumeration of every `k`-subset of a sequence.
//!
//! Crossover and mutation search gene subsets and usually stop after the first few
//! candidates, so the subsets are produced one at a time from an index vector of
//! length `k` instead of being collected up front. Each subset keeps the relative
//! order of the positions it was drawn from.
//!
//! ## Example
//!
//! ```rust
//! use genevo::combinations::combinations;
//!
//! let subsets: Vec<Vec<char>> = combinations(&['a', 'b', 'c'], 2).unwrap().collect();
//! assert_eq!(
//!     subsets,
//!     vec![vec!['a', 'b'], vec!['a', 'c'], vec!['b', 'c']]
//! );
//! ```

use crate::error::{GeneticError, Result};

/// Iterator over the `k`-subsets of a slice, in lexicographic order of positions.
#[derive(Debug, Clone)]
pub struct Combinations<'a, T> {
    pool: &'a [T],
    indices: Vec<usize>,
    started: bool,
    exhausted: bool,
}

/// Creates an iterator over all subsets of size `size` drawn from `pool`.
///
/// # Errors
///
/// Returns `GeneticError::InvalidArgument` if `size` is zero or larger than `pool`.
pub fn combinations<T: Clone>(pool: &[T], size: usize) -> Result<Combinations<'_, T>> {
    if size == 0 || size > pool.len() {
        return Err(GeneticError::InvalidArgument(format!(
            "combination size must lie in [1, {}], got {}",
            pool.len(),
            size
        )));
    }

    Ok(Combinations {
        pool,
        indices: (0..size).collect(),
        started: false,
        exhausted: false,
    })
}

impl<T: Clone> Combinations<'_, T> {
    fn current(&self) -> Vec<T> {
        self.indices.iter().map(|&i| self.pool[i].clone()).collect()
    }

    /// Moves the index vector to the next combination. Returns `false` when none is left.
    fn advance(&mut self) -> bool {
        let size = self.indices.len();
        let offset = self.pool.len() - size;

        // Rightmost position that can still move forward.
        let Some(pivot) = (0..size).rev().find(|&i| self.indices[i] != i + offset) else {
            return false;
        };

        self.indices[pivot] += 1;
        for i in pivot + 1..size {
            self.indices[i] = self.indices[i - 1] + 1;
        }
        true
    }
}

impl<T: Clone> Iterator for Combinations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        if !self.started {
            self.started = true;
            return Some(self.current());
        }

        if self.advance() {
            Some(self.current())
        } else {
            self.exhausted = true;
            None
        }
    }
}
