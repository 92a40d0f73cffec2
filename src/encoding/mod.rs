//! SMT encodings of depth-bounded graph-state scheduling
//!
//! Each strategy turns a graph and a depth bound `d` into a set of integer
//! constraints whose models are schedules with at most `d` entangling
//! layers:
//! 1. Declare one layer variable per edge, bounded to `[0, d)`
//! 2. Require edges that share a node to use different layers
//! 3. Optionally add symmetry-breaking constraints
//! 4. Ask Z3 for a model and group the edges by their layer
//!
//! Satisfiability is monotone in `d`: a model for `d` is also a model for
//! any larger bound, since only the layer domains grow.

pub mod coloring;
pub mod scheduling;
pub mod symmetry;
pub mod variables;

pub use coloring::EdgeColoringEncoder;
pub use scheduling::SchedulingEncoder;
pub use variables::VariableTable;

use crate::error::SynthesisError;
use crate::graph::{Edge, Graph};
use std::collections::BTreeMap;
use std::time::Duration;
use z3::ast::{Bool, Int};
use z3::{Params, SatResult, Solver};

/// Edges grouped by the layer they were assigned to
pub type LayerAssignment = BTreeMap<usize, Vec<Edge>>;

/// A variable reference inside an [`Encoding`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The layer at which an edge's `CZ` fires
    Layer(Edge),
    /// The idle placeholder of a node pair without an edge
    Idle(Edge),
}

/// One satisfiability instance for a fixed depth bound
pub struct Encoding {
    depth: usize,
    solver: Solver,
    layers: VariableTable,
    idle: VariableTable,
    constraints: usize,
}

impl Encoding {
    /// Create an empty instance for `depth` layers
    pub fn new(depth: usize, layer_prefix: &'static str, idle_prefix: &'static str) -> Self {
        Self {
            depth,
            solver: Solver::new(),
            layers: VariableTable::new(layer_prefix),
            idle: VariableTable::new(idle_prefix),
            constraints: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of assertions added so far
    pub fn constraint_count(&self) -> usize {
        self.constraints
    }

    pub fn layer_variables(&self) -> &VariableTable {
        &self.layers
    }

    pub fn idle_variables(&self) -> &VariableTable {
        &self.idle
    }

    fn assert(&mut self, constraint: &Bool) {
        self.solver.assert(constraint);
        self.constraints += 1;
    }

    fn var(&self, slot: Slot) -> &Int {
        match slot {
            Slot::Layer(edge) => &self.layers[&edge],
            Slot::Idle(pair) => &self.idle[&pair],
        }
    }

    /// Declare the layer variable of `edge` with domain `[0, depth)`
    pub fn declare_layer(&mut self, edge: Edge) {
        let var = self.layers.declare(edge).clone();
        let lower = var.ge(&Int::from_i64(0));
        let upper = var.lt(&Int::from_u64(self.depth as u64));
        self.assert(&lower);
        self.assert(&upper);
    }

    /// Declare the idle placeholder of `pair` with domain `[0, inf)`
    pub fn declare_idle(&mut self, pair: Edge) {
        let var = self.idle.declare(pair).clone();
        let lower = var.ge(&Int::from_i64(0));
        self.assert(&lower);
    }

    /// `a != b`
    pub fn require_distinct(&mut self, a: Slot, b: Slot) {
        let constraint = self.var(a).eq(self.var(b)).not();
        self.assert(&constraint);
    }

    /// `a < b`
    pub fn require_before(&mut self, a: Slot, b: Slot) {
        let constraint = self.var(a).lt(self.var(b));
        self.assert(&constraint);
    }

    /// `a == value`
    pub fn require_value(&mut self, a: Slot, value: usize) {
        let constraint = self.var(a).eq(&Int::from_u64(value as u64));
        self.assert(&constraint);
    }

    /// Check the instance and decode a model into layers
    ///
    /// Returns `Ok(None)` when no schedule fits the depth bound. An
    /// `unknown` answer from the solver is an error, never a retry.
    pub fn solve(self, solver_timeout: Option<Duration>) -> Result<Option<LayerAssignment>, SynthesisError> {
        if let Some(timeout) = solver_timeout {
            let mut params = Params::new();
            params.set_u32("timeout", timeout.as_millis().min(u32::MAX as u128) as u32);
            self.solver.set_params(&params);
        }

        tracing::trace!(
            depth = self.depth,
            layer_vars = self.layers.len(),
            idle_vars = self.idle.len(),
            constraints = self.constraints,
            "checking encoding"
        );

        match self.solver.check() {
            SatResult::Unsat => Ok(None),
            SatResult::Unknown => Err(SynthesisError::SolverUnknown {
                depth: self.depth,
                reason: self
                    .solver
                    .get_reason_unknown()
                    .unwrap_or_else(|| "no reason given".to_string()),
            }),
            SatResult::Sat => {
                let model = self.solver.get_model().ok_or_else(|| {
                    SynthesisError::IncompleteModel {
                        variable: "<model>".to_string(),
                    }
                })?;

                let mut assignment = LayerAssignment::new();
                for (edge, var) in self.layers.iter() {
                    let layer = model
                        .eval(var, true)
                        .and_then(|value| value.as_i64())
                        .and_then(|value| usize::try_from(value).ok())
                        .ok_or_else(|| SynthesisError::IncompleteModel {
                            variable: self.layers.name_of(edge),
                        })?;
                    assignment.entry(layer).or_default().push(*edge);
                }
                Ok(Some(assignment))
            }
        }
    }
}

/// A way of encoding "this graph has a schedule of depth `d`"
pub trait DepthEncoder {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Smallest depth worth probing
    fn lower_bound(&self, graph: &Graph) -> usize;

    /// Build the instance for `depth`
    fn encode(&self, graph: &Graph, depth: usize, symmetry_breaking: bool) -> Encoding;

    /// Build and solve the instance for `depth`; one solver call
    fn check(
        &self,
        graph: &Graph,
        depth: usize,
        symmetry_breaking: bool,
        solver_timeout: Option<Duration>,
    ) -> Result<Option<LayerAssignment>, SynthesisError> {
        self.encode(graph, depth, symmetry_breaking)
            .solve(solver_timeout)
    }
}

/// Encoding strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingStrategy {
    /// One colour per edge, adjacent edges differ
    #[default]
    EdgeColoring,
    /// Per-edge firing layer plus idle placeholders for non-edges
    Scheduling,
}

impl EncodingStrategy {
    fn encoder(&self) -> &dyn DepthEncoder {
        match self {
            EncodingStrategy::EdgeColoring => &EdgeColoringEncoder,
            EncodingStrategy::Scheduling => &SchedulingEncoder,
        }
    }
}

impl DepthEncoder for EncodingStrategy {
    fn name(&self) -> &'static str {
        self.encoder().name()
    }

    fn lower_bound(&self, graph: &Graph) -> usize {
        self.encoder().lower_bound(graph)
    }

    fn encode(&self, graph: &Graph, depth: usize, symmetry_breaking: bool) -> Encoding {
        self.encoder().encode(graph, depth, symmetry_breaking)
    }
}

impl std::fmt::Display for EncodingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for EncodingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "edge-coloring" | "edge-colouring" | "coloring" | "colouring" => {
                Ok(EncodingStrategy::EdgeColoring)
            }
            "scheduling" | "sat" | "direct" => Ok(EncodingStrategy::Scheduling),
            _ => Err(format!(
                "Unknown encoding strategy: '{}'. Valid options: edge-coloring, scheduling",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path3() -> Graph {
        Graph::from_rows(&[[0, 1, 0], [1, 0, 1], [0, 1, 0]]).unwrap()
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!(
            "edge-coloring".parse::<EncodingStrategy>().unwrap(),
            EncodingStrategy::EdgeColoring
        );
        assert_eq!(
            "colouring".parse::<EncodingStrategy>().unwrap(),
            EncodingStrategy::EdgeColoring
        );
        assert_eq!(
            "scheduling".parse::<EncodingStrategy>().unwrap(),
            EncodingStrategy::Scheduling
        );
        assert!("greedy".parse::<EncodingStrategy>().is_err());
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(EncodingStrategy::EdgeColoring.to_string(), "edge-coloring");
        assert_eq!(EncodingStrategy::Scheduling.to_string(), "scheduling");
    }

    #[test]
    fn test_strategy_lower_bounds() {
        let g = path3();
        assert_eq!(EncodingStrategy::EdgeColoring.lower_bound(&g), 1);
        assert_eq!(EncodingStrategy::Scheduling.lower_bound(&g), 0);
    }

    #[test]
    fn test_check_unsat_and_sat() {
        let g = path3();
        for strategy in [EncodingStrategy::EdgeColoring, EncodingStrategy::Scheduling] {
            assert_eq!(strategy.check(&g, 1, false, None), Ok(None));

            let assignment = strategy.check(&g, 2, false, None).unwrap().unwrap();
            assert_eq!(assignment.len(), 2);
            assert_eq!(assignment.values().map(Vec::len).sum::<usize>(), 2);
        }
    }

    #[test]
    fn test_zero_depth_is_unsat_with_edges() {
        assert_eq!(
            EncodingStrategy::Scheduling.check(&path3(), 0, false, None),
            Ok(None)
        );
    }

    #[test]
    fn test_encoding_counts_constraints() {
        let mut encoding = Encoding::new(2, "edge", "I");
        encoding.declare_layer(Edge::new(1, 0));
        encoding.declare_layer(Edge::new(2, 1));
        encoding.require_distinct(Slot::Layer(Edge::new(1, 0)), Slot::Layer(Edge::new(2, 1)));
        assert_eq!(encoding.constraint_count(), 5);
        assert_eq!(encoding.layer_variables().len(), 2);
        assert!(encoding.idle_variables().is_empty());
    }

    #[test]
    fn test_fixed_values_are_respected() {
        let mut encoding = Encoding::new(3, "edge", "I");
        let a = Edge::new(1, 0);
        let b = Edge::new(2, 1);
        encoding.declare_layer(a);
        encoding.declare_layer(b);
        encoding.require_distinct(Slot::Layer(a), Slot::Layer(b));
        encoding.require_value(Slot::Layer(a), 2);
        encoding.require_value(Slot::Layer(b), 0);

        let assignment = encoding.solve(None).unwrap().unwrap();
        assert_eq!(assignment[&2], vec![a]);
        assert_eq!(assignment[&0], vec![b]);
    }

    #[test]
    fn test_contradictory_order_is_unsat() {
        let mut encoding = Encoding::new(2, "edge", "I");
        let e = Edge::new(1, 0);
        let p = Edge::new(2, 0);
        encoding.declare_layer(e);
        encoding.declare_idle(p);
        encoding.require_before(Slot::Layer(e), Slot::Idle(p));
        encoding.require_value(Slot::Idle(p), 0);
        assert_eq!(encoding.solve(None), Ok(None));
    }
}
