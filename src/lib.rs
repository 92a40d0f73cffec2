//! Depth-optimal preparation of graph states
//!
//! A graph state is prepared by an `H` on every node followed by one `CZ`
//! per edge. `CZ`s on disjoint node pairs run in the same layer, so the
//! fewest layers is the graph's edge-chromatic number. This crate finds
//! that number and a matching schedule with Z3, one satisfiability check
//! per candidate depth.
//!
//! ```no_run
//! use graphstate_depth::{Graph, SynthesisConfig, synthesize};
//!
//! let graph: Graph = "[[0, 1, 1], [1, 0, 1], [1, 1, 0]]".parse()?;
//! let (schedule, result) = synthesize(&graph, &SynthesisConfig::default())?;
//! assert_eq!(result.depth(), 3);
//! print!("{}", schedule);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod decomposition;
pub mod encoding;
pub mod error;
pub mod graph;
pub mod schedule;
pub mod search;

pub use decomposition::{GraphStateDecomposition, synthesize_decomposition};
pub use encoding::{DepthEncoder, EncodingStrategy, LayerAssignment};
pub use error::{GraphError, SynthesisError};
pub use graph::{Edge, Graph};
pub use schedule::{LocalGate, Operation, Schedule};
pub use search::{
    DepthSearch, SearchMode, SynthesisConfig, SynthesisResult, synthesize,
    synthesize_with_deadline,
};
