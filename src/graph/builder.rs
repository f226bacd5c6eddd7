//! # GraphBuilder
//!
//! Produces the edge set of the layered construction graph for a bin
//! packing instance. Three kinds of edges exist:
//!
//! - Root edges: node 0 to every layer-0 node, pheromone drawn uniformly in
//!   `[0, 1)`, `bin` set to the destination's bin choice.
//! - Interior edges: every layer-`k` node to every layer-`k + 1` node,
//!   pheromone drawn uniformly in `[0, 1)`, `bin` set to the source's own
//!   bin choice.
//! - Final-layer edges: exactly one forced edge per last-layer node to the
//!   sink, pheromone fixed at `1.0`, `bin` set to the source's bin choice.
//!
//! On every edge the `bin` field names the bin of the item whose placement
//! the traversal decides, so walking an edge out of layer `k` drops item `k`
//! into that edge's bin.

use crate::error::Result;
use crate::graph::construction::{ConstructionGraph, NodeId};
use crate::problem::BinPacking;
use crate::rng::RandomNumberGenerator;

/// A directed edge of the construction graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub source: NodeId,
    pub destination: NodeId,
    /// Learned preference for this edge; non-negative.
    pub pheromone: f64,
    /// The 1-based bin chosen by traversing this edge.
    pub bin: usize,
}

/// Builds the full edge set for a validated [`BinPacking`] instance.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    problem: BinPacking,
}

impl GraphBuilder {
    /// Creates a builder for `problem`. The instance is validated at
    /// construction, so building itself cannot fail on bad parameters.
    pub fn new(problem: BinPacking) -> Self {
        Self { problem }
    }

    /// Generates the edge set and assembles it into a [`ConstructionGraph`].
    pub fn build(self, rng: &mut RandomNumberGenerator) -> Result<ConstructionGraph> {
        let edges = self.edges(rng);
        ConstructionGraph::new(self.problem, edges)
    }

    /// Generates the raw edge set with freshly drawn pheromones.
    pub fn edges(&self, rng: &mut RandomNumberGenerator) -> Vec<Edge> {
        let num_items = self.problem.num_items();
        let num_bins = self.problem.num_bins();
        let sink = num_items * num_bins + 1;

        let interior_layers = num_items - 1;
        let mut edges =
            Vec::with_capacity(num_bins + interior_layers * num_bins * num_bins + num_bins);

        // Root edges: the bin field carries the destination's bin choice,
        // since the traversal decides where item 0 goes.
        let mut pheromones = rng.fetch_uniform(0.0, 1.0, num_bins);
        for bin in 1..=num_bins {
            edges.push(Edge {
                source: 0,
                destination: node_id(0, bin, num_bins),
                pheromone: pheromones.pop_front().unwrap_or(0.0),
                bin,
            });
        }

        // Interior edges: full bipartite connection between consecutive
        // layers, the bin field carrying the source's bin choice.
        for layer in 0..interior_layers {
            for bin in 1..=num_bins {
                let source = node_id(layer, bin, num_bins);
                let mut pheromones = rng.fetch_uniform(0.0, 1.0, num_bins);
                for next_bin in 1..=num_bins {
                    edges.push(Edge {
                        source,
                        destination: node_id(layer + 1, next_bin, num_bins),
                        pheromone: pheromones.pop_front().unwrap_or(0.0),
                        bin,
                    });
                }
            }
        }

        // Final-layer edges: one forced edge per node into the sink.
        for bin in 1..=num_bins {
            edges.push(Edge {
                source: node_id(num_items - 1, bin, num_bins),
                destination: sink,
                pheromone: 1.0,
                bin,
            });
        }

        edges
    }
}

/// The node id for layer `layer` (0-based) and bin choice `bin` (1-based).
fn node_id(layer: usize, bin: usize, num_bins: usize) -> NodeId {
    layer * num_bins + bin
}
