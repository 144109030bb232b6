//! # Chromosomes and Genes
//!
//! A chromosome is an ordered sequence of genes. The gene type belongs to the
//! caller; the engine only needs to clone genes, print them and compare them for
//! equality (membership tests and duplicate detection).
//!
//! This module also holds the small records every operator shares:
//!
//! - [`LengthBounds`]: the inclusive `[min, max]` range a chromosome length must stay in.
//! - [`Validity`]: the user predicate deciding whether a chromosome is an acceptable individual.
//! - [`SearchSpace`]: bounds, gene pool, repetition flag and validity predicate bundled together.
//! - [`ChromosomeComparison`]: how chromosomes are canonicalized before duplicate detection.
//!
//! ## Example
//!
//! ```rust
//! use genevo::chromosome::{LengthBounds, SearchSpace, Validity};
//!
//! let genes = vec![1, 2, 3, 4];
//! let no_ones = |chromosome: &[i32]| !chromosome.contains(&1);
//! let space = SearchSpace::new(LengthBounds::new(1, 3), &genes, false, &no_ones);
//!
//! assert!(space.bounds.contains(2));
//! assert!(space.is_valid(&[2, 3]));
//! assert!(!space.is_valid(&[1, 3]));
//! ```

use std::cmp::Ordering;
use std::fmt::Debug;

/// Marker trait for gene types.
///
/// Implemented automatically for every type that is `Clone + Debug + PartialEq`.
pub trait Gene: Clone + Debug + PartialEq {}

impl<T> Gene for T where T: Clone + Debug + PartialEq {}

/// An ordered sequence of genes.
pub type Chromosome<G> = Vec<G>;

/// Inclusive length range for chromosomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

impl LengthBounds {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Returns `true` if `length` lies in `[min, max]`.
    pub fn contains(&self, length: usize) -> bool {
        self.min <= length && length <= self.max
    }
}

/// Predicate deciding whether a chromosome forms a valid individual.
///
/// Any `Fn(&[G]) -> bool` closure is a `Validity`.
pub trait Validity<G> {
    fn is_valid(&self, chromosome: &[G]) -> bool;
}

impl<G, F> Validity<G> for F
where
    F: Fn(&[G]) -> bool,
{
    fn is_valid(&self, chromosome: &[G]) -> bool {
        self(chromosome)
    }
}

/// The default validity predicate: every chromosome is valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl<G> Validity<G> for AcceptAll {
    fn is_valid(&self, _chromosome: &[G]) -> bool {
        true
    }
}

/// Everything an operator needs to know about where valid chromosomes live.
pub struct SearchSpace<'a, G> {
    pub bounds: LengthBounds,
    pub possible_genes: &'a [G],
    pub repeated_genes_allowed: bool,
    pub validity: &'a dyn Validity<G>,
}

impl<'a, G> SearchSpace<'a, G> {
    pub fn new(
        bounds: LengthBounds,
        possible_genes: &'a [G],
        repeated_genes_allowed: bool,
        validity: &'a dyn Validity<G>,
    ) -> Self {
        Self {
            bounds,
            possible_genes,
            repeated_genes_allowed,
            validity,
        }
    }

    pub fn is_valid(&self, chromosome: &[G]) -> bool {
        self.validity.is_valid(chromosome)
    }
}

impl<G> Clone for SearchSpace<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G> Copy for SearchSpace<'_, G> {}

/// How chromosomes are compared when looking for duplicates.
///
/// The choice is made once, at configuration time.
#[derive(Debug, Clone)]
pub enum ChromosomeComparison<G> {
    /// Chromosomes are compared gene by gene in their stored order.
    Positional,
    /// Chromosomes are stably sorted with the given order before comparison,
    /// so `[3, 1]` and `[1, 3]` count as the same individual.
    Sorted(fn(&G, &G) -> Ordering),
}

impl<G> ChromosomeComparison<G> {
    /// Canonical comparison for genes with a total order.
    pub fn ordered() -> Self
    where
        G: Ord,
    {
        ChromosomeComparison::Sorted(<G as Ord>::cmp)
    }

    /// Canonical comparison using a caller-supplied order, e.g. over a key of
    /// mapping-shaped genes.
    pub fn by(compare: fn(&G, &G) -> Ordering) -> Self {
        ChromosomeComparison::Sorted(compare)
    }

    /// Returns the canonical form of `chromosome` under this comparison.
    pub fn canonical(&self, chromosome: &[G]) -> Chromosome<G>
    where
        G: Clone,
    {
        let mut canonical = chromosome.to_vec();
        if let ChromosomeComparison::Sorted(compare) = self {
            canonical.sort_by(compare);
        }
        canonical
    }
}

impl<G> Default for ChromosomeComparison<G> {
    fn default() -> Self {
        ChromosomeComparison::Positional
    }
}

/// Genes of `source` that do not occur in `other`, in `source` order.
pub fn genes_absent_from<G: Gene>(source: &[G], other: &[G]) -> Chromosome<G> {
    source
        .iter()
        .filter(|gene| !other.contains(gene))
        .cloned()
        .collect()
}

/// Copy of `chromosome` with the first occurrence of each gene in `removed` taken out.
pub fn without_genes<G: Gene>(chromosome: &[G], removed: &[G]) -> Chromosome<G> {
    let mut remaining = chromosome.to_vec();
    for gene in removed {
        if let Some(position) = remaining.iter().position(|g| g == gene) {
            remaining.remove(position);
        }
    }
    remaining
}
