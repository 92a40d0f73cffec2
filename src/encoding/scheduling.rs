//! Direct scheduling encoding with idle placeholders
//!
//! Every edge gets the layer at which its `CZ` fires, bounded by the depth.
//! Every node pair without an edge gets an unbounded, non-negative idle
//! variable. A `CZ` must not fire in the same layer as any other pair
//! sharing a node with it, whether that pair is a real edge or an idle
//! placeholder. Idle variables can always be pushed past every layer, so
//! they never change which depths are satisfiable.

use crate::encoding::symmetry::order_before_idle_slots;
use crate::encoding::{DepthEncoder, Encoding, Slot};
use crate::graph::{Edge, Graph};

/// Direct layer assignment with idle slots for non-edges
#[derive(Debug, Clone, Copy, Default)]
pub struct SchedulingEncoder;

/// Node pairs checked against `edge` (`high > low`)
///
/// These are the pairs `(high, k)` for `k < low` and the pairs `(low, k)`
/// for `k < high, k != low`. Pairs at `high` with `low < k` are not listed
/// here; they are reached from the other edge's side when it is an edge,
/// and never when it is idle.
pub(crate) fn neighbour_pairs(edge: Edge) -> impl Iterator<Item = Edge> {
    let (high, low) = edge.endpoints();
    let at_high = (0..low).map(move |k| Edge::new(high, k));
    let at_low = (0..high).filter(move |&k| k != low).map(move |k| Edge::new(low, k));
    at_high.chain(at_low)
}

/// The slot of a neighbouring pair: its layer if it is an edge, else its idle variable
pub(crate) fn slot_of(graph: &Graph, pair: Edge) -> Slot {
    if graph.contains_edge(&pair) {
        Slot::Layer(pair)
    } else {
        Slot::Idle(pair)
    }
}

impl DepthEncoder for SchedulingEncoder {
    fn name(&self) -> &'static str {
        "scheduling"
    }

    fn lower_bound(&self, _graph: &Graph) -> usize {
        0
    }

    fn encode(&self, graph: &Graph, depth: usize, symmetry_breaking: bool) -> Encoding {
        let mut encoding = Encoding::new(depth, "CZ", "I");

        for edge in graph.edges() {
            encoding.declare_layer(edge);
        }
        for pair in graph.non_edges() {
            encoding.declare_idle(pair);
        }

        for edge in graph.edges() {
            for pair in neighbour_pairs(edge) {
                encoding.require_distinct(Slot::Layer(edge), slot_of(graph, pair));
            }
        }

        if symmetry_breaking {
            order_before_idle_slots(graph, &mut encoding);
        }

        encoding
    }
}
