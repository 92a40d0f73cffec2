//! Graph state plus trailing local corrections
//!
//! A stabilizer state is a graph state followed by single-node gates. The
//! translator producing this pair lives outside the crate; only its output
//! is modeled here.

use crate::error::{GraphError, SynthesisError};
use crate::graph::Graph;
use crate::schedule::{LocalGate, Schedule};
use crate::search::{SynthesisConfig, SynthesisResult, synthesize};

/// The graph of a stabilizer state and the corrections applied after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStateDecomposition {
    graph: Graph,
    corrections: Vec<(usize, LocalGate)>,
}

impl GraphStateDecomposition {
    /// Pair `graph` with ordered corrections; every node must exist in the graph
    pub fn new(graph: Graph, corrections: Vec<(usize, LocalGate)>) -> Result<Self, GraphError> {
        let node_count = graph.node_count();
        if let Some(&(node, _)) = corrections.iter().find(|(node, _)| *node >= node_count) {
            return Err(GraphError::NodeOutOfRange { node, node_count });
        }
        Ok(Self { graph, corrections })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn corrections(&self) -> &[(usize, LocalGate)] {
        &self.corrections
    }
}

/// Schedule the graph at minimal depth, then re-apply the corrections
///
/// The returned [`SynthesisResult`] describes the graph-state part only.
pub fn synthesize_decomposition(
    decomposition: &GraphStateDecomposition,
    config: &SynthesisConfig,
) -> Result<(Schedule, SynthesisResult), SynthesisError> {
    let (schedule, result) = synthesize(&decomposition.graph, config)?;
    Ok((schedule.with_corrections(&decomposition.corrections), result))
}
