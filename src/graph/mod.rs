//! Undirected simple graphs backing a graph state
//!
//! A [`Graph`] is an immutable, validated adjacency matrix. Edges are never
//! stored on their own; they are derived from the matrix in a fixed order
//! (higher endpoint ascending, then lower endpoint ascending) so that solver
//! variable names and constraint order are identical from run to run.

pub mod random;

use crate::error::GraphError;
use std::fmt;
use std::str::FromStr;

/// An unordered pair of distinct nodes, stored as `(high, low)` with `high > low`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    high: usize,
    low: usize,
}

impl Edge {
    /// Create the pair `{a, b}`; the endpoints may be given in either order
    pub fn new(a: usize, b: usize) -> Self {
        debug_assert_ne!(a, b, "an edge needs two distinct endpoints");
        if a > b {
            Self { high: a, low: b }
        } else {
            Self { high: b, low: a }
        }
    }

    /// The endpoint with the larger index
    pub fn high(&self) -> usize {
        self.high
    }

    /// The endpoint with the smaller index
    pub fn low(&self) -> usize {
        self.low
    }

    /// Both endpoints, larger first
    pub fn endpoints(&self) -> (usize, usize) {
        (self.high, self.low)
    }

    /// Whether `node` is one of the endpoints
    pub fn touches(&self, node: usize) -> bool {
        self.high == node || self.low == node
    }

    /// Whether the two pairs have an endpoint in common
    pub fn shares_node_with(&self, other: &Edge) -> bool {
        self.touches(other.high) || self.touches(other.low)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.high, self.low)
    }
}

/// A finite simple undirected graph on nodes `0..n`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    node_count: usize,
    /// Row-major `node_count * node_count` matrix
    adjacency: Vec<bool>,
}

impl Graph {
    /// Build a graph from the rows of a 0/1 adjacency matrix
    ///
    /// The matrix must be non-empty, square, symmetric and have a zero
    /// diagonal.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GraphError> {
        let node_count = rows.len();
        let mut entries = Vec::with_capacity(node_count * node_count);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != node_count {
                return Err(GraphError::NotSquare {
                    row,
                    len: values.len(),
                    expected: node_count,
                });
            }
            entries.extend(values.iter().map(|&v| u64::from(v)));
        }
        Self::from_entries(node_count, &entries)
    }

    /// Build a graph on `node_count` nodes from a list of node pairs
    ///
    /// Duplicate pairs are merged.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        if node_count == 0 {
            return Err(GraphError::Empty);
        }
        let mut adjacency = vec![false; node_count * node_count];
        for (a, b) in edges {
            for node in [a, b] {
                if node >= node_count {
                    return Err(GraphError::NodeOutOfRange { node, node_count });
                }
            }
            if a == b {
                return Err(GraphError::SelfLoop(a));
            }
            adjacency[a * node_count + b] = true;
            adjacency[b * node_count + a] = true;
        }
        Ok(Self {
            node_count,
            adjacency,
        })
    }

    /// A graph on `node_count` nodes without any edge
    pub fn empty(node_count: usize) -> Result<Self, GraphError> {
        Self::from_edges(node_count, std::iter::empty())
    }

    fn from_entries(node_count: usize, entries: &[u64]) -> Result<Self, GraphError> {
        if node_count == 0 {
            return Err(GraphError::Empty);
        }
        debug_assert_eq!(entries.len(), node_count * node_count);

        let mut adjacency = Vec::with_capacity(entries.len());
        for (idx, &value) in entries.iter().enumerate() {
            let (row, col) = (idx / node_count, idx % node_count);
            let connected = match value {
                0 => false,
                1 => true,
                _ => return Err(GraphError::InvalidEntry { row, col, value }),
            };
            if connected && row == col {
                return Err(GraphError::SelfLoop(row));
            }
            adjacency.push(connected);
        }

        for row in 0..node_count {
            for col in 0..row {
                if adjacency[row * node_count + col] != adjacency[col * node_count + row] {
                    return Err(GraphError::NotSymmetric { row, col });
                }
            }
        }

        Ok(Self {
            node_count,
            adjacency,
        })
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Whether `a` and `b` are joined by an edge
    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        a < self.node_count && b < self.node_count && self.adjacency[a * self.node_count + b]
    }

    /// Whether `edge` is present in the graph
    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.is_adjacent(edge.high, edge.low)
    }

    /// All edges in canonical order
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.pairs().filter(|e| self.contains_edge(e))
    }

    /// All node pairs without an edge, in canonical order
    pub fn non_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.pairs().filter(|e| !self.contains_edge(e))
    }

    fn pairs(&self) -> impl Iterator<Item = Edge> {
        let n = self.node_count;
        (0..n).flat_map(|high| (0..high).map(move |low| Edge { high, low }))
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Whether the adjacency matrix is all zeros
    pub fn is_edgeless(&self) -> bool {
        !self.adjacency.iter().any(|&a| a)
    }

    /// Neighbours of `node` in ascending order
    pub fn neighbours(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.node_count).filter(move |&other| self.is_adjacent(node, other))
    }

    /// Edges incident to `node`, ordered by the other endpoint
    pub fn incident_edges(&self, node: usize) -> impl Iterator<Item = Edge> + '_ {
        self.neighbours(node).map(move |other| Edge::new(node, other))
    }

    /// Number of neighbours of `node`
    pub fn degree(&self, node: usize) -> usize {
        self.neighbours(node).count()
    }

    /// Largest degree of any node
    pub fn max_degree(&self) -> usize {
        (0..self.node_count)
            .map(|node| self.degree(node))
            .max()
            .unwrap_or(0)
    }

    /// The lowest-indexed node of maximum degree
    pub fn densest_node(&self) -> usize {
        let mut best = 0;
        for node in 1..self.node_count {
            if self.degree(node) > self.degree(best) {
                best = node;
            }
        }
        best
    }

    /// Largest number of neighbours a node has among lower-indexed nodes
    ///
    /// Never exceeds [`Graph::max_degree`], so it is a valid (if loose) lower
    /// bound on the number of colours of a proper edge colouring.
    pub fn max_lower_degree(&self) -> usize {
        (0..self.node_count)
            .map(|node| (0..node).filter(|&other| self.is_adjacent(node, other)).count())
            .max()
            .unwrap_or(0)
    }

    /// The matrix as rows of 0/1 values
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.adjacency
            .chunks(self.node_count)
            .map(|row| row.iter().map(|&a| u8::from(a)).collect())
            .collect()
    }
}

impl FromStr for Graph {
    type Err = GraphError;

    /// Read every unsigned integer in `s` as one matrix entry, row-major
    ///
    /// Any non-digit characters separate entries, so `"[[0, 1], [1, 0]]"`
    /// and `"0 1; 1 0"` describe the same graph.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let entries: Vec<u64> = s
            .split(|c: char| !c.is_ascii_digit())
            .filter(|token| !token.is_empty())
            .map(|token| token.parse::<u64>().unwrap_or(u64::MAX))
            .collect();

        if entries.is_empty() {
            return Err(GraphError::Empty);
        }

        let node_count = entries.len().isqrt();
        if node_count * node_count != entries.len() {
            return Err(GraphError::NotPerfectSquare(entries.len()));
        }

        Self::from_entries(node_count, &entries)
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self
            .to_rows()
            .iter()
            .map(|row| {
                let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
                format!("[{}]", cells.join(", "))
            })
            .collect();
        write!(f, "[{}]", rows.join(", "))
    }
}
