//! # ConstructionGraph
//!
//! Owns the adjacency representation of the layered construction graph and
//! the per-bin running weight accumulators, and exposes the four operations
//! the colony drives: path generation, fitness evaluation, pheromone
//! reinforcement and pheromone evaporation.
//!
//! Edges live in a single dense array grouped by source node, with a
//! per-node offset table; `outgoing(node)` is a contiguous slice and no
//! pointer structures are involved. Pheromones are mutated in place, only
//! through [`ConstructionGraph::update_pheromone`] and
//! [`ConstructionGraph::evaporate_pheromone`].
//!
//! ## Example
//!
//! ```rust
//! use antpack::graph::build_graph;
//! use antpack::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let mut graph = build_graph(3, 2, 1, &mut rng).unwrap();
//!
//! let path = graph.generate_path(&mut rng).unwrap();
//! let fitness = graph.fitness();
//!
//! graph.update_pheromone(&path, fitness).unwrap();
//! graph.evaporate_pheromone(0.9).unwrap();
//! ```

use crate::error::{AcoError, Result};
use crate::graph::builder::Edge;
use crate::problem::{BinPacking, BinSet};
use crate::rng::RandomNumberGenerator;
use crate::selection::roulette_wheel;

/// A node of the construction graph, identified by its dense index.
pub type NodeId = usize;

/// A generated path: the chosen node of every item layer in order, followed
/// by the sink. The root is implicit and never appears.
pub type Path = Vec<NodeId>;

/// The construction graph for a bin packing instance.
#[derive(Debug, Clone)]
pub struct ConstructionGraph {
    problem: BinPacking,
    /// All edges, grouped by source node.
    edges: Vec<Edge>,
    /// `edges[offsets[n]..offsets[n + 1]]` are the outgoing edges of node `n`.
    offsets: Vec<usize>,
    bins: BinSet,
}

impl ConstructionGraph {
    /// Assembles a graph from an edge set, typically one produced by
    /// [`GraphBuilder`](crate::graph::GraphBuilder).
    ///
    /// The relative order of edges sharing a source node is preserved; that
    /// order defines the list order the roulette wheel cumulates over.
    ///
    /// ## Errors
    ///
    /// Returns an error if any edge refers to a node outside the instance's
    /// node range, names a bin outside `[1, num_bins]`, or carries a
    /// negative or non-finite pheromone.
    pub fn new(problem: BinPacking, mut edges: Vec<Edge>) -> Result<Self> {
        let num_nodes = problem.num_items() * problem.num_bins() + 2;

        for edge in &edges {
            if edge.source >= num_nodes || edge.destination >= num_nodes {
                return Err(AcoError::Graph(format!(
                    "edge ({}, {}) is outside the {}-node graph",
                    edge.source, edge.destination, num_nodes
                )));
            }
            if edge.bin < 1 || edge.bin > problem.num_bins() {
                return Err(AcoError::Graph(format!(
                    "edge ({}, {}) names bin {} outside 1..={}",
                    edge.source,
                    edge.destination,
                    edge.bin,
                    problem.num_bins()
                )));
            }
            if !edge.pheromone.is_finite() || edge.pheromone < 0.0 {
                return Err(AcoError::InvalidNumericValue(format!(
                    "edge ({}, {}) has pheromone {}",
                    edge.source, edge.destination, edge.pheromone
                )));
            }
        }

        // Stable sort keeps the within-node edge order of the input.
        edges.sort_by_key(|edge| edge.source);

        let mut offsets = vec![0usize; num_nodes + 1];
        for edge in &edges {
            offsets[edge.source + 1] += 1;
        }
        for node in 0..num_nodes {
            offsets[node + 1] += offsets[node];
        }

        let bins = BinSet::new(problem.num_bins());

        Ok(Self {
            problem,
            edges,
            offsets,
            bins,
        })
    }

    /// The bin packing instance this graph was built for.
    pub fn problem(&self) -> &BinPacking {
        &self.problem
    }

    pub fn num_items(&self) -> usize {
        self.problem.num_items()
    }

    pub fn num_bins(&self) -> usize {
        self.problem.num_bins()
    }

    /// The total node count: root, one layer per item, sink.
    pub fn num_nodes(&self) -> usize {
        self.offsets.len() - 1
    }

    /// The sink node, reached after the last item is placed.
    pub fn sink(&self) -> NodeId {
        self.num_nodes() - 1
    }

    /// The outgoing edges of `node`, in roulette list order.
    ///
    /// ## Panics
    ///
    /// Panics if `node` is not a node of this graph.
    pub fn outgoing(&self, node: NodeId) -> &[Edge] {
        &self.edges[self.offsets[node]..self.offsets[node + 1]]
    }

    /// The bin weights accumulated by the most recent
    /// [`generate_path`](Self::generate_path) call.
    pub fn bin_weights(&self) -> &[u64] {
        self.bins.weights()
    }

    /// Zeroes the owned bin accumulators. `generate_path` does this
    /// implicitly before every walk.
    pub fn reset(&mut self) {
        self.bins.reset();
    }

    /// Generates one root-to-sink path, mutating the graph's own bin
    /// accumulators. Fitness for the walk is available from
    /// [`fitness`](Self::fitness) until the next call.
    pub fn generate_path(&mut self, rng: &mut RandomNumberGenerator) -> Result<Path> {
        let mut bins = std::mem::take(&mut self.bins);
        let result = self.generate_path_with(&mut bins, rng);
        self.bins = bins;
        result
    }

    /// Generates one root-to-sink path against caller-supplied bins,
    /// reading pheromones only. This is the entry point for parallel ants:
    /// each ant brings a private [`BinSet`] while sharing the graph
    /// immutably.
    ///
    /// The walk starts at the root, whose traversal only selects the
    /// layer-0 node; every later hop out of layer `k` places item `k` into
    /// the bin of the chosen edge. The returned path holds the chosen node
    /// of every layer plus the sink, `num_items + 1` nodes in total.
    ///
    /// ## Errors
    ///
    /// Returns an error if a non-sink node has no outgoing edges or a
    /// pheromone has been corrupted to a negative or non-finite value,
    /// neither of which can happen on a builder-produced graph.
    pub fn generate_path_with(
        &self,
        bins: &mut BinSet,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Path> {
        bins.reset();

        let sink = self.sink();
        let mut path = Vec::with_capacity(self.num_items() + 1);

        let root_choices = self.outgoing(0);
        let choice = roulette_wheel(root_choices.iter().map(|e| e.pheromone), rng)?;
        let mut current = root_choices[choice].destination;
        let mut item = 0;

        while current != sink {
            let choices = self.outgoing(current);
            // Final-layer nodes have a single forced edge; skip the wheel.
            let choice = if choices.len() == 1 {
                0
            } else {
                roulette_wheel(choices.iter().map(|e| e.pheromone), rng)?
            };
            let edge = &choices[choice];

            bins.add(edge.bin, self.problem.kind().item_weight(item));
            path.push(current);
            current = edge.destination;
            item += 1;
        }

        path.push(sink);
        Ok(path)
    }

    /// The fitness of the bins as left by the latest `generate_path` call:
    /// heaviest bin weight minus lightest bin weight. Lower is better and
    /// zero means perfectly balanced bins.
    pub fn fitness(&self) -> u64 {
        self.bins.spread()
    }

    /// Reinforces every edge along `path` with a deposit of
    /// `100.0 / fitness`. Pairs with the sink as source are skipped.
    ///
    /// A fitness of zero would divide by zero; it is treated as maximal
    /// reinforcement instead, clamping the divisor to one so a perfect
    /// solution keeps being rewarded.
    ///
    /// ## Errors
    ///
    /// Returns an error if a consecutive pair of `path` is not an edge of
    /// this graph. The whole path is resolved before anything is deposited,
    /// so a rejected path leaves every pheromone untouched.
    pub fn update_pheromone(&mut self, path: &[NodeId], fitness: u64) -> Result<()> {
        let sink = self.sink();
        let num_nodes = self.num_nodes();
        let deposit = 100.0 / fitness.max(1) as f64;

        let mut on_path = Vec::with_capacity(path.len().saturating_sub(1));

        for pair in path.windows(2) {
            let (source, next) = (pair[0], pair[1]);
            if source == sink {
                break;
            }
            if source >= num_nodes {
                return Err(AcoError::InvalidPath(format!(
                    "node {} is not in the graph",
                    source
                )));
            }

            let range = self.offsets[source]..self.offsets[source + 1];
            let edge = self.edges[range.clone()]
                .iter()
                .position(|edge| edge.destination == next);

            match edge {
                Some(position) => on_path.push(range.start + position),
                None => {
                    return Err(AcoError::InvalidPath(format!(
                        "no edge from {} to {}",
                        source, next
                    )))
                }
            }
        }

        for index in on_path {
            self.edges[index].pheromone += deposit;
        }

        Ok(())
    }

    /// Multiplies every edge pheromone in the graph by `rate`, the
    /// final-layer edges included. No floor is enforced: repeated
    /// evaporation without reinforcement decays a branch toward zero,
    /// which is the intended colony dynamic.
    ///
    /// ## Errors
    ///
    /// Returns an error if `rate` is negative, NaN or infinite.
    pub fn evaporate_pheromone(&mut self, rate: f64) -> Result<()> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(AcoError::InvalidNumericValue(format!(
                "evaporation rate must be non-negative and finite, got {}",
                rate
            )));
        }

        for edge in &mut self.edges {
            edge.pheromone *= rate;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;
    use crate::problem::ProblemKind;

    /// A 3-item, 2-bin graph with pheromones forcing the path
    /// `[1, 4, 5, 7]`: item 0 into bin 1, item 1 into bin 2, item 2 into
    /// bin 1.
    fn forced_graph() -> ConstructionGraph {
        let problem = BinPacking::new(3, 2, ProblemKind::Linear).unwrap();
        let edge = |source, destination, pheromone, bin| Edge {
            source,
            destination,
            pheromone,
            bin,
        };
        let edges = vec![
            edge(0, 1, 1.0, 1),
            edge(0, 2, 0.0, 2),
            edge(1, 3, 0.0, 1),
            edge(1, 4, 1.0, 1),
            edge(2, 3, 0.5, 2),
            edge(2, 4, 0.5, 2),
            edge(3, 5, 0.5, 1),
            edge(3, 6, 0.5, 1),
            edge(4, 5, 1.0, 2),
            edge(4, 6, 0.0, 2),
            edge(5, 7, 1.0, 1),
            edge(6, 7, 1.0, 2),
        ];
        ConstructionGraph::new(problem, edges).unwrap()
    }

    fn random_graph(num_items: usize, num_bins: usize, seed: u64) -> ConstructionGraph {
        let problem = BinPacking::new(num_items, num_bins, ProblemKind::Linear).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(seed);
        GraphBuilder::new(problem).build(&mut rng).unwrap()
    }

    #[test]
    fn test_node_layout() {
        let graph = forced_graph();
        assert_eq!(graph.num_nodes(), 8);
        assert_eq!(graph.sink(), 7);
        assert_eq!(graph.outgoing(0).len(), 2);
        assert_eq!(graph.outgoing(5).len(), 1);
        assert_eq!(graph.outgoing(7).len(), 0);
    }

    #[test]
    fn test_forced_path_and_fitness() {
        let mut graph = forced_graph();
        let mut rng = RandomNumberGenerator::from_seed(42);

        let path = graph.generate_path(&mut rng).unwrap();
        assert_eq!(path, vec![1, 4, 5, 7]);

        // Bin 1 holds items 0 and 2 (weights 1 and 3), bin 2 holds item 1
        // (weight 2).
        assert_eq!(graph.bin_weights(), &[4, 2]);
        assert_eq!(graph.fitness(), 2);
    }

    #[test]
    fn test_generated_paths_are_valid() {
        let mut graph = random_graph(10, 4, 99);
        let mut rng = RandomNumberGenerator::from_seed(3);
        let sink = graph.sink();

        for _ in 0..50 {
            let path = graph.generate_path(&mut rng).unwrap();

            assert_eq!(path.len(), 11);
            assert!((1..=4).contains(&path[0]), "first node not in layer 0");
            assert_eq!(*path.last().unwrap(), sink);

            for pair in path.windows(2) {
                assert!(
                    graph
                        .outgoing(pair[0])
                        .iter()
                        .any(|edge| edge.destination == pair[1]),
                    "({}, {}) is not an edge",
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn test_no_item_weight_is_lost_or_duplicated() {
        let mut graph = random_graph(20, 5, 17);
        let mut rng = RandomNumberGenerator::from_seed(4);
        let total = graph.problem().total_weight();

        for _ in 0..20 {
            graph.generate_path(&mut rng).unwrap();
            let routed: u64 = graph.bin_weights().iter().sum();
            assert_eq!(routed, total);
        }
    }

    #[test]
    fn test_single_item_path() {
        let mut graph = random_graph(1, 3, 5);
        let mut rng = RandomNumberGenerator::from_seed(5);

        let path = graph.generate_path(&mut rng).unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(*path.last().unwrap(), graph.sink());
        assert_eq!(graph.bin_weights().iter().sum::<u64>(), 1);
    }

    #[test]
    fn test_reset_zeroes_bins() {
        let mut graph = forced_graph();
        let mut rng = RandomNumberGenerator::from_seed(42);

        graph.generate_path(&mut rng).unwrap();
        assert!(graph.fitness() > 0);

        graph.reset();
        assert_eq!(graph.bin_weights(), &[0, 0]);
        assert_eq!(graph.fitness(), 0);
    }

    #[test]
    fn test_update_pheromone_deposits_exactly() {
        let mut graph = forced_graph();
        let path = vec![1, 4, 5, 7];

        let before: Vec<f64> = [(1, 4), (4, 5), (5, 7)]
            .iter()
            .map(|&(s, d)| pheromone_of(&graph, s, d))
            .collect();

        // Fitness 100 deposits exactly 1.0 per on-path edge.
        graph.update_pheromone(&path, 100).unwrap();
        for (i, &(s, d)) in [(1, 4), (4, 5), (5, 7)].iter().enumerate() {
            let after = pheromone_of(&graph, s, d);
            assert!((after - before[i] - 1.0).abs() < 1e-12);
        }

        // Fitness 50 deposits 2.0 more.
        graph.update_pheromone(&path, 50).unwrap();
        for (i, &(s, d)) in [(1, 4), (4, 5), (5, 7)].iter().enumerate() {
            let after = pheromone_of(&graph, s, d);
            assert!((after - before[i] - 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_update_pheromone_leaves_off_path_edges_alone() {
        let mut graph = forced_graph();
        let path = vec![1, 4, 5, 7];

        let off_path = [(0, 2), (1, 3), (2, 3), (2, 4), (3, 5), (3, 6), (4, 6), (6, 7)];
        let before: Vec<f64> = off_path
            .iter()
            .map(|&(s, d)| pheromone_of(&graph, s, d))
            .collect();

        graph.update_pheromone(&path, 10).unwrap();

        for (i, &(s, d)) in off_path.iter().enumerate() {
            assert_eq!(pheromone_of(&graph, s, d), before[i]);
        }
    }

    #[test]
    fn test_update_pheromone_clamps_zero_fitness() {
        let mut graph = forced_graph();
        let before = pheromone_of(&graph, 1, 4);

        graph.update_pheromone(&[1, 4], 0).unwrap();

        let after = pheromone_of(&graph, 1, 4);
        assert!((after - before - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_update_pheromone_rejects_unknown_edges() {
        let mut graph = forced_graph();

        let result = graph.update_pheromone(&[1, 6, 7], 10);
        assert!(matches!(result, Err(AcoError::InvalidPath(_))));

        let result = graph.update_pheromone(&[99, 7], 10);
        assert!(matches!(result, Err(AcoError::InvalidPath(_))));
    }

    #[test]
    fn test_update_pheromone_ignores_pairs_after_sink() {
        let mut graph = forced_graph();

        // The sink as a pair source ends the update.
        graph.update_pheromone(&[7, 1], 10).unwrap();
        graph.update_pheromone(&[7], 10).unwrap();
        graph.update_pheromone(&[], 10).unwrap();
    }

    #[test]
    fn test_evaporation_at_identity_rate_changes_nothing() {
        let mut graph = random_graph(5, 3, 11);
        let before: Vec<f64> = graph.edges.iter().map(|e| e.pheromone).collect();

        graph.evaporate_pheromone(1.0).unwrap();

        let after: Vec<f64> = graph.edges.iter().map(|e| e.pheromone).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_evaporation_decays_every_edge() {
        let mut graph = random_graph(5, 3, 11);
        let before: Vec<f64> = graph.edges.iter().map(|e| e.pheromone).collect();

        graph.evaporate_pheromone(0.5).unwrap();

        for (edge, &old) in graph.edges.iter().zip(&before) {
            assert!(edge.pheromone >= 0.0);
            assert!(edge.pheromone <= old);
            assert!((edge.pheromone - old * 0.5).abs() < 1e-12);
        }

        // Repeated evaporation keeps decreasing, never increases.
        let mid: Vec<f64> = graph.edges.iter().map(|e| e.pheromone).collect();
        graph.evaporate_pheromone(0.9).unwrap();
        for (edge, &old) in graph.edges.iter().zip(&mid) {
            assert!(edge.pheromone <= old);
            assert!(edge.pheromone >= 0.0);
        }
    }

    #[test]
    fn test_evaporation_rejects_invalid_rates() {
        let mut graph = forced_graph();

        assert!(graph.evaporate_pheromone(-0.1).is_err());
        assert!(graph.evaporate_pheromone(f64::NAN).is_err());
        assert!(graph.evaporate_pheromone(f64::INFINITY).is_err());
    }

    #[test]
    fn test_path_generation_survives_total_evaporation() {
        // Zeroing every pheromone degenerates the roulette; the uniform
        // fallback must keep the walk going.
        let mut graph = random_graph(4, 3, 13);
        graph.evaporate_pheromone(0.0).unwrap();

        let mut rng = RandomNumberGenerator::from_seed(21);
        let path = graph.generate_path(&mut rng).unwrap();

        assert_eq!(path.len(), 5);
        assert_eq!(*path.last().unwrap(), graph.sink());
    }

    #[test]
    fn test_graph_rejects_malformed_edge_sets() {
        let problem = BinPacking::new(3, 2, ProblemKind::Linear).unwrap();

        let out_of_range = vec![Edge {
            source: 0,
            destination: 99,
            pheromone: 0.5,
            bin: 1,
        }];
        assert!(matches!(
            ConstructionGraph::new(problem, out_of_range),
            Err(AcoError::Graph(_))
        ));

        let negative_pheromone = vec![Edge {
            source: 0,
            destination: 1,
            pheromone: -0.5,
            bin: 1,
        }];
        assert!(matches!(
            ConstructionGraph::new(problem, negative_pheromone),
            Err(AcoError::InvalidNumericValue(_))
        ));
    }

    #[test]
    fn test_graph_rejects_out_of_range_bins() {
        // A bin of 0 would underflow the 1-based accumulator index during
        // path generation; the constructor must refuse it up front.
        let problem = BinPacking::new(3, 2, ProblemKind::Linear).unwrap();
        let edge = |bin| Edge {
            source: 0,
            destination: 1,
            pheromone: 0.5,
            bin,
        };

        assert!(matches!(
            ConstructionGraph::new(problem, vec![edge(0)]),
            Err(AcoError::Graph(_))
        ));
        assert!(matches!(
            ConstructionGraph::new(problem, vec![edge(3)]),
            Err(AcoError::Graph(_))
        ));
        assert!(ConstructionGraph::new(problem, vec![edge(1)]).is_ok());
        assert!(ConstructionGraph::new(problem, vec![edge(2)]).is_ok());
    }

    #[test]
    fn test_rejected_path_deposits_nothing() {
        let mut graph = forced_graph();
        let before: Vec<f64> = graph.edges.iter().map(|e| e.pheromone).collect();

        // The first pair (1, 4) is a real edge, the second is not; the
        // failed update must not leave a partial deposit on (1, 4).
        let result = graph.update_pheromone(&[1, 4, 2], 10);
        assert!(matches!(result, Err(AcoError::InvalidPath(_))));

        let after: Vec<f64> = graph.edges.iter().map(|e| e.pheromone).collect();
        assert_eq!(before, after);
    }
    fn pheromone_of(graph: &ConstructionGraph, source: NodeId, destination: NodeId) -> f64 {
        graph
            .outgoing(source)
            .iter()
            .find(|edge| edge.destination == destination)
            .map(|edge| edge.pheromone)
            .unwrap()
    }
}
