//! Symmetry-breaking constraints
//!
//! These only remove models that are relabelings of other models. They
//! never change the set of depths at which an encoding is satisfiable.

use crate::encoding::scheduling::{neighbour_pairs, slot_of};
use crate::encoding::{Encoding, Slot};
use crate::graph::Graph;

/// Pin the colours of the densest node's edges to `0, 1, 2, ...`
///
/// Edges are taken in order of their other endpoint. Any proper colouring
/// can be permuted into one satisfying this, so completeness is kept; when
/// the depth is below the node's degree the instance becomes trivially
/// unsatisfiable, as it already was.
pub fn fix_densest_star(graph: &Graph, encoding: &mut Encoding) {
    let centre = graph.densest_node();
    for (colour, edge) in graph.incident_edges(centre).enumerate() {
        encoding.require_value(Slot::Layer(edge), colour);
    }
}

/// Order every edge's layer strictly below the idle slots next to it
///
/// Only the idle pairs returned by [`neighbour_pairs`] are constrained.
/// Idle pairs `(high, k)` with `low < k` stay unordered.
pub fn order_before_idle_slots(graph: &Graph, encoding: &mut Encoding) {
    for edge in graph.edges() {
        for pair in neighbour_pairs(edge) {
            let slot = slot_of(graph, pair);
            if matches!(slot, Slot::Idle(_)) {
                encoding.require_before(Slot::Layer(edge), slot);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{DepthEncoder, EdgeColoringEncoder, SchedulingEncoder};
    use crate::graph::Edge;

    #[test]
    fn test_densest_star_constraint_count() {
        let g = Graph::from_rows(&[[0, 1, 1, 0], [1, 0, 1, 1], [1, 1, 0, 1], [0, 1, 1, 0]]).unwrap();
        let mut encoding = EdgeColoringEncoder.encode(&g, 3, false);
        let before = encoding.constraint_count();
        fix_densest_star(&g, &mut encoding);
        assert_eq!(encoding.constraint_count(), before + 3);
    }

    #[test]
    fn test_densest_star_prunes_low_depths() {
        let g = Graph::from_edges(4, [(1, 0), (1, 2), (1, 3)]).unwrap();
        let mut encoding = EdgeColoringEncoder.encode(&g, 2, false);
        fix_densest_star(&g, &mut encoding);
        assert_eq!(encoding.solve(None), Ok(None));
    }

    #[test]
    fn test_idle_ordering_keeps_satisfiability() {
        let g = Graph::from_edges(4, [(1, 0), (2, 1), (3, 2)]).unwrap();
        let mut encoding = SchedulingEncoder.encode(&g, 2, false);
        order_before_idle_slots(&g, &mut encoding);
        let assignment = encoding.solve(None).unwrap().unwrap();
        assert_eq!(assignment.values().map(Vec::len).sum::<usize>(), 3);
        assert!(assignment
            .values()
            .all(|edges| !edges.contains(&Edge::new(1, 0)) || !edges.contains(&Edge::new(2, 1))));
    }
}
