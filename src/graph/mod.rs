//! # Construction Graph
//!
//! The layered directed graph whose root-to-sink paths enumerate every
//! complete bin assignment for a bin packing instance, together with the
//! pheromone-driven stochastic traversal that generates candidate
//! assignments.
//!
//! The graph has one root node (node 0), one layer of `num_bins` nodes per
//! item, and one sink node. The node for item layer `k` (0-based) and bin
//! choice `b` (1-based) has id `k * num_bins + b`; the sink id is
//! `num_items * num_bins + 1`. Choosing the layer-`k` node with bin `b`
//! assigns item `k` to bin `b`.

pub mod builder;
pub mod construction;

pub use builder::{Edge, GraphBuilder};
pub use construction::{ConstructionGraph, NodeId, Path};

use crate::error::Result;
use crate::problem::{BinPacking, ProblemKind};
use crate::rng::RandomNumberGenerator;

/// Builds a construction graph for the given problem parameters, with edge
/// pheromones initialized uniformly at random in `[0, 1)`.
///
/// This is the driver-facing constructor: `problem_type` 1 selects linear
/// item weights, 2 selects quadratic ones. The bin count is still explicit
/// so non-reference scenarios remain expressible; pass
/// [`ProblemKind::default_num_bins`] for the benchmark pairings
/// (10 bins for type 1, 50 for type 2).
///
/// ## Errors
///
/// Returns a configuration error if `problem_type` is not 1 or 2, or if
/// `num_items` or `num_bins` is zero.
///
/// ## Example
///
/// ```rust
/// use antpack::graph::build_graph;
/// use antpack::rng::RandomNumberGenerator;
///
/// let mut rng = RandomNumberGenerator::from_seed(42);
/// let graph = build_graph(3, 2, 1, &mut rng).unwrap();
/// assert_eq!(graph.num_nodes(), 8);
/// ```
pub fn build_graph(
    num_items: usize,
    num_bins: usize,
    problem_type: u32,
    rng: &mut RandomNumberGenerator,
) -> Result<ConstructionGraph> {
    let kind = ProblemKind::from_problem_type(problem_type)?;
    let problem = BinPacking::new(num_items, num_bins, kind)?;
    GraphBuilder::new(problem).build(rng)
}
