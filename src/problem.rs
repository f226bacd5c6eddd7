//! # Problem Model
//!
//! This module describes the bin packing instance the colony optimizes:
//! the item weight rule, the bin count and the per-path bin accumulators.
//!
//! Two benchmark instances are supported. The linear problem (driver
//! problem type 1) packs items of weight `i + 1` into 10 bins; the
//! quadratic problem (type 2) packs items of weight `(i + 1)^2` into
//! 50 bins. Both item counts and bin counts remain free parameters of the
//! builder, only the defaults are fixed.
//!
//! ## Example
//!
//! ```rust
//! use antpack::problem::{BinPacking, ProblemKind};
//!
//! let problem = BinPacking::new(500, 10, ProblemKind::Linear).unwrap();
//! assert_eq!(problem.total_weight(), 500 * 501 / 2);
//! ```

use crate::error::{AcoError, Result};

/// The item weight rule of a bin packing instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProblemKind {
    /// Item `i` weighs `i + 1`.
    Linear,
    /// Item `i` weighs `(i + 1)^2`.
    Quadratic,
}

impl ProblemKind {
    /// Maps a driver-facing problem type to a weight rule: type 1 is the
    /// linear problem, type 2 the quadratic one.
    ///
    /// ## Errors
    ///
    /// Returns a configuration error for any other problem type.
    pub fn from_problem_type(problem_type: u32) -> Result<Self> {
        match problem_type {
            1 => Ok(Self::Linear),
            2 => Ok(Self::Quadratic),
            other => Err(AcoError::Configuration(format!(
                "problem type must be 1 or 2, got {}",
                other
            ))),
        }
    }

    /// The bin count the reference scenario pairs with this weight rule:
    /// 10 bins for the linear problem, 50 for the quadratic one.
    pub fn default_num_bins(&self) -> usize {
        match self {
            Self::Linear => 10,
            Self::Quadratic => 50,
        }
    }

    /// The weight of item `item` (0-based) under this rule.
    pub fn item_weight(&self, item: usize) -> u64 {
        let base = item as u64 + 1;
        match self {
            Self::Linear => base,
            Self::Quadratic => base * base,
        }
    }
}

/// A bin packing instance: a fixed sequence of items to distribute over a
/// fixed number of bins, minimizing the spread between the heaviest and
/// lightest bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinPacking {
    num_items: usize,
    num_bins: usize,
    kind: ProblemKind,
}

impl BinPacking {
    /// Creates a new instance descriptor.
    ///
    /// ## Errors
    ///
    /// Returns a configuration error if `num_items` or `num_bins` is zero.
    pub fn new(num_items: usize, num_bins: usize, kind: ProblemKind) -> Result<Self> {
        if num_items == 0 {
            return Err(AcoError::Configuration(
                "number of items must be at least 1".to_string(),
            ));
        }
        if num_bins == 0 {
            return Err(AcoError::Configuration(
                "number of bins must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            num_items,
            num_bins,
            kind,
        })
    }

    pub fn num_items(&self) -> usize {
        self.num_items
    }

    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    pub fn kind(&self) -> ProblemKind {
        self.kind
    }

    /// The sum of all item weights. Every completed path distributes exactly
    /// this amount across the bins.
    pub fn total_weight(&self) -> u64 {
        (0..self.num_items).map(|i| self.kind.item_weight(i)).sum()
    }
}

/// The running weight accumulators for one path generation.
///
/// A `BinSet` is owned, resettable state: the construction graph carries one
/// for sequential use, and parallel ants each carry a private copy while
/// reading a shared pheromone table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinSet {
    weights: Vec<u64>,
}

impl BinSet {
    /// Creates a set of `num_bins` empty bins.
    pub fn new(num_bins: usize) -> Self {
        Self {
            weights: vec![0; num_bins],
        }
    }

    /// Adds `weight` to the 1-based `bin`.
    pub fn add(&mut self, bin: usize, weight: u64) {
        debug_assert!(bin >= 1 && bin <= self.weights.len());
        self.weights[bin - 1] += weight;
    }

    /// Zeroes every bin.
    pub fn reset(&mut self) {
        self.weights.fill(0);
    }

    /// The difference between the heaviest and lightest bin. Zero means the
    /// bins are perfectly balanced.
    pub fn spread(&self) -> u64 {
        let max = self.weights.iter().max().copied().unwrap_or(0);
        let min = self.weights.iter().min().copied().unwrap_or(0);
        max - min
    }

    /// The combined weight held across all bins.
    pub fn total(&self) -> u64 {
        self.weights.iter().sum()
    }

    /// The current per-bin weights, indexed by bin number minus one.
    pub fn weights(&self) -> &[u64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
