//! Layered schedules of graph-state preparation operations
//!
//! A schedule starts with one layer applying `H` to every node, followed by
//! one layer of `CZ` operations per colour class of the edge assignment.
//! Operations within a layer act on pairwise-disjoint nodes, so their order
//! inside the layer is immaterial; it is kept sorted so that materialising
//! the same assignment twice yields identical schedules.

use crate::encoding::LayerAssignment;
use crate::error::GraphError;
use crate::graph::{Edge, Graph};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

/// Single-node Clifford gates used for preparation and corrections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LocalGate {
    X,
    Y,
    Z,
    H,
    S,
}

impl fmt::Display for LocalGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LocalGate::X => "X",
            LocalGate::Y => "Y",
            LocalGate::Z => "Z",
            LocalGate::H => "H",
            LocalGate::S => "S",
        };
        write!(f, "{}", name)
    }
}

/// Error type for parsing gates and correction lists
#[derive(Debug, Clone, PartialEq)]
pub struct ParseGateError {
    pub message: String,
}

impl fmt::Display for ParseGateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParseGateError: {}", self.message)
    }
}

impl std::error::Error for ParseGateError {}

impl FromStr for LocalGate {
    type Err = ParseGateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "X" => Ok(LocalGate::X),
            "Y" => Ok(LocalGate::Y),
            "Z" => Ok(LocalGate::Z),
            "H" => Ok(LocalGate::H),
            "S" => Ok(LocalGate::S),
            _ => Err(ParseGateError {
                message: format!("unknown gate '{}'. Valid options: X, Y, Z, H, S", s.trim()),
            }),
        }
    }
}

/// Parse a correction list such as `"0:H, 1:S 2:X"`
pub fn parse_corrections(s: &str) -> Result<Vec<(usize, LocalGate)>, ParseGateError> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (node, gate) = part.split_once(':').ok_or_else(|| ParseGateError {
                message: format!("expected '<node>:<gate>', got '{}'", part),
            })?;
            let node = node.parse::<usize>().map_err(|_| ParseGateError {
                message: format!("invalid node index '{}'", node),
            })?;
            Ok((node, gate.parse()?))
        })
        .collect()
}

/// One scheduled operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    /// A single-node gate
    Local { gate: LocalGate, node: usize },
    /// A `CZ` between the endpoints of an edge
    Entangle(Edge),
}

impl Operation {
    /// Nodes the operation acts on
    pub fn nodes(&self) -> Vec<usize> {
        match self {
            Operation::Local { node, .. } => vec![*node],
            Operation::Entangle(edge) => vec![edge.high(), edge.low()],
        }
    }

    pub fn is_pairwise(&self) -> bool {
        matches!(self, Operation::Entangle(_))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Local { gate, node } => write!(f, "{}({})", gate, node),
            Operation::Entangle(edge) => write!(f, "CZ({}, {})", edge.high(), edge.low()),
        }
    }
}

/// An ordered sequence of layers, optionally followed by local corrections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    node_count: usize,
    layers: Vec<Vec<Operation>>,
    corrections: Vec<Operation>,
}

impl Schedule {
    /// Turn a colour assignment into a schedule
    ///
    /// Colour classes are emitted in increasing colour order. An empty
    /// assignment yields only the preparation layer.
    pub fn materialize(assignment: &LayerAssignment, node_count: usize) -> Self {
        let mut layers = Vec::with_capacity(assignment.len() + 1);
        layers.push(
            (0..node_count)
                .map(|node| Operation::Local {
                    gate: LocalGate::H,
                    node,
                })
                .collect(),
        );

        for edges in assignment.values() {
            let mut layer: Vec<Operation> = edges.iter().copied().map(Operation::Entangle).collect();
            layer.sort();
            layers.push(layer);
        }

        Self {
            node_count,
            layers,
            corrections: Vec::new(),
        }
    }

    /// The schedule of the edgeless graph state on `node_count` nodes
    pub fn preparation_only(node_count: usize) -> Self {
        Self::materialize(&LayerAssignment::new(), node_count)
    }

    /// Append single-node corrections, applied in the given order after all layers
    pub fn with_corrections(mut self, corrections: &[(usize, LocalGate)]) -> Self {
        self.corrections.extend(
            corrections
                .iter()
                .map(|&(node, gate)| Operation::Local { gate, node }),
        );
        self
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// All layers, the preparation layer first
    pub fn layers(&self) -> &[Vec<Operation>] {
        &self.layers
    }

    pub fn corrections(&self) -> &[Operation] {
        &self.corrections
    }

    /// Number of layers containing `CZ` operations
    pub fn entangling_layers(&self) -> usize {
        self.layers
            .iter()
            .filter(|layer| layer.iter().any(Operation::is_pairwise))
            .count()
    }

    fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.layers.iter().flatten().chain(self.corrections.iter())
    }

    /// Number of single-node operations, corrections included
    pub fn single_node_count(&self) -> usize {
        self.operations().filter(|op| !op.is_pairwise()).count()
    }

    /// Number of `CZ` operations
    pub fn pairwise_count(&self) -> usize {
        self.operations().filter(|op| op.is_pairwise()).count()
    }

    pub fn operation_count(&self) -> usize {
        self.single_node_count() + self.pairwise_count()
    }

    /// The node pairs entangled by the schedule
    pub fn entangled_pairs(&self) -> BTreeSet<Edge> {
        self.operations()
            .filter_map(|op| match op {
                Operation::Entangle(edge) => Some(*edge),
                Operation::Local { .. } => None,
            })
            .collect()
    }

    /// Rebuild the graph whose state this schedule prepares
    pub fn to_graph(&self) -> Result<Graph, GraphError> {
        Graph::from_edges(
            self.node_count,
            self.entangled_pairs().iter().map(Edge::endpoints),
        )
    }

    /// Whether no layer uses a node twice
    pub fn layers_are_disjoint(&self) -> bool {
        self.layers.iter().all(|layer| {
            let mut seen = HashSet::new();
            layer
                .iter()
                .flat_map(Operation::nodes)
                .all(|node| seen.insert(node))
        })
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, layer) in self.layers.iter().enumerate() {
            let ops: Vec<String> = layer.iter().map(|op| op.to_string()).collect();
            writeln!(f, "layer {}: {}", idx, ops.join(" "))?;
        }
        if !self.corrections.is_empty() {
            let ops: Vec<String> = self.corrections.iter().map(|op| op.to_string()).collect();
            writeln!(f, "corrections: {}", ops.join(" "))?;
        }
        Ok(())
    }
}
