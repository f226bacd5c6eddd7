//! # antpack
//!
//! An ant colony optimization (ACO) library for the bin packing problem:
//! distribute a fixed sequence of item weights across a fixed number of
//! bins so that the difference between the heaviest and lightest bin is
//! minimized.
//!
//! The core is the layered construction graph — one root node, one layer
//! of nodes per item (one node per bin choice), one sink — and its
//! pheromone-driven stochastic traversal. Ants walk the graph root to
//! sink, each hop assigning the next item to a bin; good walks reinforce
//! the pheromones along their edges and a uniform evaporation pass decays
//! the whole table once per iteration.
//!
//! ## Example
//!
//! ```rust
//! use antpack::colony::{Colony, ColonyOptions};
//! use antpack::graph::build_graph;
//! use antpack::rng::RandomNumberGenerator;
//!
//! fn main() -> antpack::Result<()> {
//!     let mut rng = RandomNumberGenerator::from_seed(42);
//!
//!     // Problem type 1: linear item weights. The reference scenario pairs
//!     // it with 10 bins and 500 items; any positive counts work.
//!     let graph = build_graph(50, 10, 1, &mut rng)?;
//!
//!     let options = ColonyOptions::builder()
//!         .num_ants(10)
//!         .num_iterations(100)
//!         .evaporation_rate(0.9)
//!         .build();
//!
//!     let mut colony = Colony::new(graph);
//!     let report = colony.run(&options, &mut rng)?;
//!
//!     println!("best fitness: {}", report.best_fitness);
//!     Ok(())
//! }
//! ```

pub mod colony;
pub mod error;
pub mod graph;
pub mod problem;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use colony::{Colony, ColonyOptions, ColonyReport};
pub use error::{AcoError, Result};
pub use graph::{build_graph, ConstructionGraph, Edge, GraphBuilder, NodeId, Path};
pub use problem::{BinPacking, BinSet, ProblemKind};
