//! Error types for graph construction and depth-optimal synthesis

use std::time::Duration;
use thiserror::Error;

/// A malformed adjacency matrix
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The matrix has no rows
    #[error("adjacency matrix is empty")]
    Empty,
    /// Row `row` does not have one entry per node
    #[error("adjacency matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    /// An entry other than 0 or 1
    #[error("invalid adjacency entry {value} at ({row}, {col}), expected 0 or 1")]
    InvalidEntry { row: usize, col: usize, value: u64 },
    /// A node connected to itself
    #[error("node {0} has a self-loop")]
    SelfLoop(usize),
    /// `adj(i, j) != adj(j, i)`
    #[error("adjacency matrix is not symmetric at ({row}, {col})")]
    NotSymmetric { row: usize, col: usize },
    /// An edge endpoint outside `0..node_count`
    #[error("node {node} is out of range for a graph with {node_count} nodes")]
    NodeOutOfRange { node: usize, node_count: usize },
    /// Textual input whose integer count is not `n * n`
    #[error("found {0} integers, which is not the size of a square matrix")]
    NotPerfectSquare(usize),
}

/// Failure of a synthesis call. No partial schedule is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    /// The solver could not decide the instance at `depth`
    #[error("solver returned unknown at depth {depth}: {reason}")]
    SolverUnknown { depth: usize, reason: String },
    /// The solver reported SAT but did not assign `variable`
    #[error("solver model has no value for {variable}")]
    IncompleteModel { variable: String },
    /// Every depth up to `max_depth` was unsatisfiable
    #[error("no schedule exists with depth at most {max_depth}")]
    NoScheduleWithinBound { max_depth: usize },
    /// The worker running the synthesis did not answer in time
    #[error("synthesis did not finish within {0:?}")]
    DeadlineExceeded(Duration),
    /// The worker running the synthesis exited without sending a result
    #[error("synthesis worker terminated without a result")]
    WorkerDisconnected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_error_messages() {
        let err = GraphError::NotSquare {
            row: 1,
            len: 3,
            expected: 2,
        };
        assert_eq!(
            err.to_string(),
            "adjacency matrix is not square: row 1 has 3 entries, expected 2"
        );
        assert_eq!(GraphError::SelfLoop(4).to_string(), "node 4 has a self-loop");
    }

    #[test]
    fn test_synthesis_error_messages() {
        let err = SynthesisError::SolverUnknown {
            depth: 3,
            reason: "timeout".to_string(),
        };
        assert_eq!(err.to_string(), "solver returned unknown at depth 3: timeout");
        assert_eq!(
            SynthesisError::NoScheduleWithinBound { max_depth: 5 }.to_string(),
            "no schedule exists with depth at most 5"
        );
    }
}
