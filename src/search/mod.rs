//! Depth search over an encoding strategy
//!
//! The driver probes candidate depths with one solver call each and stops
//! at the smallest satisfiable one:
//! - Linear: every depth from the strategy's lower bound up to the node count
//! - Binary: bisection over the same range, probing `mid` and `mid - 1`
//!
//! Both modes reach the same depth since satisfiability is monotone. They
//! differ only in how many solver calls they spend.

pub mod config;
pub mod result;
pub mod worker;

pub use config::{SearchMode, SynthesisConfig};
pub use result::SynthesisResult;
pub use worker::synthesize_with_deadline;

use crate::encoding::{DepthEncoder, EncodingStrategy, LayerAssignment};
use crate::error::SynthesisError;
use crate::graph::Graph;
use crate::schedule::Schedule;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Minimal-depth layer assignment found by a [`DepthSearch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub depth: usize,
    pub assignment: LayerAssignment,
    pub solver_calls: usize,
}

/// Search state for one graph
///
/// Probe results are cached per depth, so binary search never pays twice
/// for the same bound.
pub struct DepthSearch<'a> {
    graph: &'a Graph,
    strategy: EncodingStrategy,
    symmetry_breaking: bool,
    solver_timeout: Option<Duration>,
    solver_calls: usize,
    probed: BTreeMap<usize, Option<LayerAssignment>>,
}

impl<'a> DepthSearch<'a> {
    pub fn new(graph: &'a Graph, config: &SynthesisConfig) -> Self {
        Self {
            graph,
            strategy: config.strategy,
            symmetry_breaking: config.symmetry_breaking,
            solver_timeout: config.solver_timeout,
            solver_calls: 0,
            probed: BTreeMap::new(),
        }
    }

    /// Solver calls made so far
    pub fn solver_calls(&self) -> usize {
        self.solver_calls
    }

    /// Depth range `[lower, upper]` searched by both modes
    pub fn bounds(&self) -> (usize, usize) {
        (self.strategy.lower_bound(self.graph), self.graph.node_count())
    }

    /// Whether a schedule of `depth` exists; cached
    fn probe(&mut self, depth: usize) -> Result<bool, SynthesisError> {
        if let Some(cached) = self.probed.get(&depth) {
            return Ok(cached.is_some());
        }

        let assignment = self.strategy.check(
            self.graph,
            depth,
            self.symmetry_breaking,
            self.solver_timeout,
        )?;
        self.solver_calls += 1;

        let satisfiable = assignment.is_some();
        debug!(
            strategy = %self.strategy,
            depth,
            satisfiable,
            solver_calls = self.solver_calls,
            "probed depth"
        );
        self.probed.insert(depth, assignment);
        Ok(satisfiable)
    }

    fn finish(mut self, depth: usize) -> Result<SearchOutcome, SynthesisError> {
        let assignment = self
            .probed
            .remove(&depth)
            .flatten()
            .ok_or(SynthesisError::NoScheduleWithinBound {
                max_depth: self.graph.node_count(),
            })?;
        Ok(SearchOutcome {
            depth,
            assignment,
            solver_calls: self.solver_calls,
        })
    }

    /// Probe every depth from the lower bound upwards
    pub fn linear(mut self) -> Result<SearchOutcome, SynthesisError> {
        let (lower, upper) = self.bounds();
        for depth in lower..=upper {
            if self.probe(depth)? {
                return self.finish(depth);
            }
        }
        Err(SynthesisError::NoScheduleWithinBound { max_depth: upper })
    }

    /// Bisect the depth range
    ///
    /// Each round probes `mid` and, unless `mid` is the low end, `mid - 1`.
    /// `mid` is the answer once it fits and `mid - 1` does not.
    pub fn binary(mut self) -> Result<SearchOutcome, SynthesisError> {
        let (mut low, mut high) = self.bounds();
        let max_depth = high;

        while low <= high {
            let mid = (low + high) / 2;
            let fits = self.probe(mid)?;
            let below_fits = if mid != low {
                self.probe(mid - 1)?
            } else {
                false
            };

            if !fits {
                low = mid + 1;
            } else if below_fits {
                high = mid - 1;
            } else {
                return self.finish(mid);
            }
        }

        Err(SynthesisError::NoScheduleWithinBound { max_depth })
    }

    pub fn run(self, mode: SearchMode) -> Result<SearchOutcome, SynthesisError> {
        match mode {
            SearchMode::Linear => self.linear(),
            SearchMode::Binary => self.binary(),
        }
    }
}

/// Find a minimal-depth schedule preparing `graph`'s graph state
///
/// Graphs without edges need no entangling layer and skip the solver
/// entirely: depth 0, no solver calls, zero runtime.
pub fn synthesize(
    graph: &Graph,
    config: &SynthesisConfig,
) -> Result<(Schedule, SynthesisResult), SynthesisError> {
    if graph.is_edgeless() {
        let schedule = Schedule::preparation_only(graph.node_count());
        let result = SynthesisResult::new(&schedule, 0, 0, Duration::ZERO);
        info!(nodes = graph.node_count(), depth = 0, "graph has no edges");
        return Ok((schedule, result));
    }

    let start = Instant::now();
    let outcome = DepthSearch::new(graph, config).run(config.search_mode)?;
    let runtime = start.elapsed();

    let schedule = Schedule::materialize(&outcome.assignment, graph.node_count());
    info!(
        strategy = %config.strategy,
        mode = %config.search_mode,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        depth = outcome.depth,
        solver_calls = outcome.solver_calls,
        "found minimal depth"
    );

    let result = SynthesisResult::new(&schedule, outcome.depth, outcome.solver_calls, runtime);
    Ok((schedule, result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path3() -> Graph {
        Graph::from_rows(&[[0, 1, 0], [1, 0, 1], [0, 1, 0]]).unwrap()
    }

    fn triangle() -> Graph {
        Graph::from_rows(&[[0, 1, 1], [1, 0, 1], [1, 1, 0]]).unwrap()
    }

    #[test]
    fn test_linear_and_binary_agree() {
        for strategy in [EncodingStrategy::EdgeColoring, EncodingStrategy::Scheduling] {
            let config = SynthesisConfig::default().with_strategy(strategy);
            let linear = DepthSearch::new(&triangle(), &config).linear().unwrap();
            let binary = DepthSearch::new(&triangle(), &config).binary().unwrap();
            assert_eq!(linear.depth, 3);
            assert_eq!(binary.depth, 3);
        }
    }

    #[test]
    fn test_linear_counts_every_probe() {
        let config = SynthesisConfig::default().with_strategy(EncodingStrategy::Scheduling);
        let outcome = DepthSearch::new(&path3(), &config).linear().unwrap();
        // depths 0, 1 fail and 2 fits
        assert_eq!(outcome.depth, 2);
        assert_eq!(outcome.solver_calls, 3);
    }

    #[test]
    fn test_binary_probes_mid_and_predecessor() {
        let config = SynthesisConfig::default().with_strategy(EncodingStrategy::Scheduling);
        let outcome = DepthSearch::new(&path3(), &config).binary().unwrap();
        // [0, 3]: mid 1 fails, 0 fails; [2, 3]: mid 2 fits, 1 is cached
        assert_eq!(outcome.depth, 2);
        assert_eq!(outcome.solver_calls, 3);
    }

    #[test]
    fn test_probe_is_cached() {
        let config = SynthesisConfig::default();
        let graph = path3();
        let mut search = DepthSearch::new(&graph, &config);
        assert!(search.probe(2).unwrap());
        assert!(search.probe(2).unwrap());
        assert!(!search.probe(1).unwrap());
        assert_eq!(search.solver_calls(), 2);
    }

    #[test]
    fn test_bounds() {
        let graph = triangle();
        let coloring = DepthSearch::new(&graph, &SynthesisConfig::default());
        assert_eq!(coloring.bounds(), (2, 3));

        let config = SynthesisConfig::default().with_strategy(EncodingStrategy::Scheduling);
        let scheduling = DepthSearch::new(&graph, &config);
        assert_eq!(scheduling.bounds(), (0, 3));
    }

    #[test]
    fn test_synthesize_edgeless_graph() {
        let graph = Graph::empty(4).unwrap();
        let (schedule, result) = synthesize(&graph, &SynthesisConfig::default()).unwrap();
        assert_eq!(result.depth(), 0);
        assert_eq!(result.solver_calls(), 0);
        assert_eq!(result.runtime(), Duration::ZERO);
        assert_eq!(result.total_ops(), 4);
        assert_eq!(schedule.layers().len(), 1);
    }

    #[test]
    fn test_synthesize_reports_counts() {
        let (schedule, result) = synthesize(&path3(), &SynthesisConfig::default()).unwrap();
        assert_eq!(result.depth(), 2);
        assert_eq!(result.single_node_ops(), 3);
        assert_eq!(result.pairwise_ops(), 2);
        assert_eq!(result.rendering(), schedule.to_string());
        assert_eq!(schedule.to_graph().unwrap(), path3());
    }
}
