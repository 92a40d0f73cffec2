//! Synthesis result record

use crate::schedule::Schedule;
use std::time::Duration;

/// Outcome of one synthesis call
///
/// Built once from the materialised schedule and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisResult {
    depth: usize,
    single_node_ops: usize,
    pairwise_ops: usize,
    solver_calls: usize,
    runtime: Duration,
    rendering: String,
}

impl SynthesisResult {
    /// Record a schedule found at `depth` after `solver_calls` solver calls
    pub fn new(schedule: &Schedule, depth: usize, solver_calls: usize, runtime: Duration) -> Self {
        Self {
            depth,
            single_node_ops: schedule.single_node_count(),
            pairwise_ops: schedule.pairwise_count(),
            solver_calls,
            runtime,
            rendering: schedule.to_string(),
        }
    }

    /// Number of entangling layers
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Single-node plus pairwise operations
    pub fn total_ops(&self) -> usize {
        self.single_node_ops + self.pairwise_ops
    }

    pub fn single_node_ops(&self) -> usize {
        self.single_node_ops
    }

    pub fn pairwise_ops(&self) -> usize {
        self.pairwise_ops
    }

    pub fn solver_calls(&self) -> usize {
        self.solver_calls
    }

    /// Wall-clock time of the depth search, materialisation excluded
    pub fn runtime(&self) -> Duration {
        self.runtime
    }

    /// Textual rendering of the schedule
    pub fn rendering(&self) -> &str {
        &self.rendering
    }

    /// Average wall-clock time per solver call
    pub fn time_per_call(&self) -> Duration {
        if self.solver_calls == 0 {
            Duration::ZERO
        } else {
            self.runtime / self.solver_calls as u32
        }
    }

    /// Format the counters as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Depth: {}\n", self.depth));
        s.push_str(&format!("Total operations: {}\n", self.total_ops()));
        s.push_str(&format!("Single-node operations: {}\n", self.single_node_ops));
        s.push_str(&format!("Pairwise operations: {}\n", self.pairwise_ops));
        s.push_str(&format!("Solver calls: {}\n", self.solver_calls));
        s.push_str(&format!("Time: {:.2?}\n", self.runtime));
        if self.solver_calls > 0 {
            s.push_str(&format!("Time per solver call: {:.2?}\n", self.time_per_call()));
        }
        s
    }
}

impl std::fmt::Display for SynthesisResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rendering)?;
        write!(f, "{}", self.format_summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::LayerAssignment;
    use crate::graph::Edge;

    fn single_edge_schedule() -> Schedule {
        let mut assignment = LayerAssignment::new();
        assignment.insert(0, vec![Edge::new(1, 0)]);
        Schedule::materialize(&assignment, 2)
    }

    #[test]
    fn test_counts_from_schedule() {
        let result = SynthesisResult::new(&single_edge_schedule(), 1, 1, Duration::from_millis(5));
        assert_eq!(result.depth(), 1);
        assert_eq!(result.single_node_ops(), 2);
        assert_eq!(result.pairwise_ops(), 1);
        assert_eq!(result.total_ops(), 3);
        assert_eq!(result.solver_calls(), 1);
        assert_eq!(result.runtime(), Duration::from_millis(5));
        assert_eq!(result.rendering(), "layer 0: H(0) H(1)\nlayer 1: CZ(1, 0)\n");
    }

    #[test]
    fn test_time_per_call() {
        let result = SynthesisResult::new(&single_edge_schedule(), 1, 4, Duration::from_secs(2));
        assert_eq!(result.time_per_call(), Duration::from_millis(500));

        let none = SynthesisResult::new(&Schedule::preparation_only(2), 0, 0, Duration::ZERO);
        assert_eq!(none.time_per_call(), Duration::ZERO);
    }

    #[test]
    fn test_summary_mentions_counters() {
        let result = SynthesisResult::new(&single_edge_schedule(), 1, 1, Duration::ZERO);
        let summary = result.format_summary();
        assert!(summary.contains("Depth: 1"));
        assert!(summary.contains("Total operations: 3"));
        assert!(summary.contains("Solver calls: 1"));

        let shown = result.to_string();
        assert!(shown.starts_with("layer 0: H(0) H(1)"));
        assert!(shown.contains("Pairwise operations: 1"));
    }
}
