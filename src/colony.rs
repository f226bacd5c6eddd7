//! # Colony
//!
//! The iteration runner for the ant colony. Each iteration sends a fixed
//! number of ants through the construction graph, collects their paths and
//! fitnesses, reinforces the pheromones of every collected path and then
//! applies a single evaporation pass — always in that order, so pheromone
//! reads during generation never race with writes.
//!
//! Below the parallel threshold the ants run sequentially on the graph's
//! own bin accumulators. At or above it they run on rayon workers, each
//! with a private [`BinSet`](crate::problem::BinSet) and its own random
//! number generator, sharing the pheromone table read-only.
//!
//! ## Example
//!
//! ```rust
//! use antpack::colony::{Colony, ColonyOptions};
//! use antpack::graph::build_graph;
//! use antpack::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let graph = build_graph(10, 3, 1, &mut rng).unwrap();
//!
//! let options = ColonyOptions::builder()
//!     .num_ants(10)
//!     .num_iterations(50)
//!     .evaporation_rate(0.9)
//!     .build();
//!
//! let mut colony = Colony::new(graph);
//! let report = colony.run(&options, &mut rng).unwrap();
//! println!("best fitness: {}", report.best_fitness);
//! ```

use rayon::prelude::*;

use crate::error::{AcoError, Result};
use crate::graph::{ConstructionGraph, Path};
use crate::problem::BinSet;
use crate::rng::RandomNumberGenerator;

/// Configuration options for a colony run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColonyOptions {
    num_ants: usize,
    evaporation_rate: f64,
    num_iterations: usize,
    /// Minimum number of ants per iteration to evaluate in parallel.
    parallel_threshold: usize,
}

impl ColonyOptions {
    pub fn new(num_ants: usize, evaporation_rate: f64, num_iterations: usize) -> Self {
        Self {
            num_ants,
            evaporation_rate,
            num_iterations,
            parallel_threshold: 1000,
        }
    }

    pub fn get_num_ants(&self) -> usize {
        self.num_ants
    }

    pub fn get_evaporation_rate(&self) -> f64 {
        self.evaporation_rate
    }

    pub fn get_num_iterations(&self) -> usize {
        self.num_iterations
    }

    /// Returns the minimum number of ants to evaluate in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Returns a builder for creating a `ColonyOptions` instance.
    pub fn builder() -> ColonyOptionsBuilder {
        ColonyOptionsBuilder::default()
    }
}

impl Default for ColonyOptions {
    fn default() -> Self {
        Self {
            num_ants: 10,
            evaporation_rate: 0.9,
            num_iterations: 100,
            parallel_threshold: 1000,
        }
    }
}

/// Builder for `ColonyOptions`.
///
/// Provides a fluent interface for constructing `ColonyOptions` instances.
#[derive(Debug, Clone, Default)]
pub struct ColonyOptionsBuilder {
    num_ants: Option<usize>,
    evaporation_rate: Option<f64>,
    num_iterations: Option<usize>,
    parallel_threshold: Option<usize>,
}

impl ColonyOptionsBuilder {
    /// Sets the number of ants per iteration.
    pub fn num_ants(mut self, value: usize) -> Self {
        self.num_ants = Some(value);
        self
    }

    /// Sets the evaporation rate applied once per iteration.
    pub fn evaporation_rate(mut self, value: f64) -> Self {
        self.evaporation_rate = Some(value);
        self
    }

    /// Sets the number of iterations.
    pub fn num_iterations(mut self, value: usize) -> Self {
        self.num_iterations = Some(value);
        self
    }

    /// Sets the parallel threshold.
    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Builds the `ColonyOptions` instance.
    pub fn build(self) -> ColonyOptions {
        ColonyOptions {
            num_ants: self.num_ants.unwrap_or(10),
            evaporation_rate: self.evaporation_rate.unwrap_or(0.9),
            num_iterations: self.num_iterations.unwrap_or(100),
            parallel_threshold: self.parallel_threshold.unwrap_or(1000),
        }
    }
}

/// The result of a colony run: the best (lowest) fitness observed across
/// all iterations, the path that achieved it, and the total number of
/// fitness evaluations performed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColonyReport {
    pub best_fitness: u64,
    pub best_path: Path,
    pub evaluations: usize,
}

/// Drives ants over a construction graph for a configured number of
/// iterations.
#[derive(Debug, Clone)]
pub struct Colony {
    graph: ConstructionGraph,
}

impl Colony {
    /// Creates a colony over the given construction graph.
    pub fn new(graph: ConstructionGraph) -> Self {
        Self { graph }
    }

    /// The graph in its current pheromone state.
    pub fn graph(&self) -> &ConstructionGraph {
        &self.graph
    }

    /// Consumes the colony, returning the graph.
    pub fn into_graph(self) -> ConstructionGraph {
        self.graph
    }

    /// Runs the configured number of iterations and reports the best
    /// fitness found.
    ///
    /// ## Errors
    ///
    /// This method will return an error if:
    /// - The number of ants or iterations in the options is zero
    /// - The evaporation rate is not finite and positive
    /// - Any ant fails to generate a path (only possible on a corrupt graph)
    pub fn run(
        &mut self,
        options: &ColonyOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<ColonyReport> {
        if options.get_num_ants() == 0 {
            return Err(AcoError::Configuration(
                "number of ants cannot be zero".to_string(),
            ));
        }
        if options.get_num_iterations() == 0 {
            return Err(AcoError::Configuration(
                "number of iterations cannot be zero".to_string(),
            ));
        }
        let rate = options.get_evaporation_rate();
        if !rate.is_finite() || rate <= 0.0 {
            return Err(AcoError::Configuration(format!(
                "evaporation rate must be positive and finite, got {}",
                rate
            )));
        }

        let mut best: Option<(u64, Path)> = None;
        let mut evaluations = 0usize;

        for iteration in 0..options.get_num_iterations() {
            let ants = if options.get_num_ants() >= options.get_parallel_threshold() {
                self.evaluate_parallel(options.get_num_ants())?
            } else {
                self.evaluate_sequential(options.get_num_ants(), rng)?
            };
            evaluations += ants.len();

            let iteration_best = ants.iter().map(|(_, fitness)| *fitness).min();

            for (path, fitness) in &ants {
                self.graph.update_pheromone(path, *fitness)?;
            }
            self.graph.evaporate_pheromone(rate)?;

            for (path, fitness) in ants {
                if best.as_ref().map_or(true, |(b, _)| fitness < *b) {
                    best = Some((fitness, path));
                }
            }

            tracing::debug!(
                iteration,
                iteration_best,
                best_fitness = best.as_ref().map(|(fitness, _)| *fitness),
                "iteration complete"
            );
        }

        let (best_fitness, best_path) = best.ok_or_else(|| {
            AcoError::Other("colony run finished without evaluating any ant".to_string())
        })?;

        tracing::info!(best_fitness, evaluations, "colony run complete");

        Ok(ColonyReport {
            best_fitness,
            best_path,
            evaluations,
        })
    }

    /// Sends the ants out one after another, reusing the graph's own bin
    /// accumulators.
    fn evaluate_sequential(
        &mut self,
        num_ants: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<(Path, u64)>> {
        let mut ants = Vec::with_capacity(num_ants);

        for _ in 0..num_ants {
            let path = self.graph.generate_path(rng)?;
            let fitness = self.graph.fitness();
            ants.push((path, fitness));
        }

        Ok(ants)
    }

    /// Sends the ants out on rayon workers. Each worker carries its own bin
    /// accumulators and RNG; the pheromone table is shared read-only, so no
    /// reinforcement happens until every ant has reported back.
    fn evaluate_parallel(&self, num_ants: usize) -> Result<Vec<(Path, u64)>> {
        let graph = &self.graph;

        (0..num_ants)
            .into_par_iter()
            .map_init(
                || (BinSet::new(graph.num_bins()), RandomNumberGenerator::new()),
                |state, _| {
                    let (bins, rng) = state;
                    let path = graph.generate_path_with(bins, rng)?;
                    let fitness = bins.spread();
                    Ok((path, fitness))
                },
            )
            .collect()
    }
}
