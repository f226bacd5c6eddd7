//! # Weighted Edge Selection
//!
//! This module provides the roulette-wheel primitive used during path
//! generation: given an ordered sequence of non-negative weights, it picks
//! an index with probability proportional to its weight.
//!
//! The procedure builds the cumulative sum of the weights in list order,
//! draws a uniform random value `r` in `[0, total)` and returns the index of
//! the first cumulative value that is greater than or equal to `r`
//! (a lower-bound search). It is kept decoupled from the construction graph
//! so it can be tested on its own.
//!
//! ## Example
//!
//! ```rust
//! use antpack::rng::RandomNumberGenerator;
//! use antpack::selection::roulette_wheel;
//!
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let weights = [0.5, 3.0, 1.5];
//! let index = roulette_wheel(weights.iter().copied(), &mut rng).unwrap();
//! assert!(index < 3);
//! ```

use crate::error::{AcoError, Result};
use crate::rng::RandomNumberGenerator;

/// Selects an index with probability proportional to its weight.
///
/// ## Arguments
///
/// * `weights` - An ordered sequence of non-negative finite weights.
/// * `rng` - A random number generator used for the draw.
///
/// ## Returns
///
/// The selected index. When every weight is zero the draw degenerates (the
/// cumulative total is zero), and the function falls back to a uniform
/// choice over all indices so that callers with fully evaporated pheromones
/// keep making progress.
///
/// ## Errors
///
/// Returns an error if `weights` is empty, or if any weight is negative,
/// NaN or infinite.
pub fn roulette_wheel<I>(weights: I, rng: &mut RandomNumberGenerator) -> Result<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut cumulative: Vec<f64> = Vec::new();
    let mut total = 0.0;

    for weight in weights {
        if !weight.is_finite() || weight < 0.0 {
            return Err(AcoError::InvalidNumericValue(format!(
                "selection weights must be non-negative and finite, got {}",
                weight
            )));
        }
        total += weight;
        cumulative.push(total);
    }

    if cumulative.is_empty() {
        return Err(AcoError::EmptySelection);
    }

    if total <= 0.0 {
        // Every weight has evaporated to zero; fall back to a uniform draw.
        return Ok(rng.index(cumulative.len()));
    }

    let r = rng.uniform(0.0, total);

    // partition_point is the lower-bound search: the first index whose
    // cumulative sum is >= r.
    Ok(cumulative.partition_point(|&sum| sum < r))
}
