//! Edge-colouring encoding
//!
//! One integer per edge holds its colour (its layer). Any two edges meeting
//! at a node get different colours, which is exactly a proper edge
//! colouring with at most `depth` colours.

use crate::encoding::symmetry::fix_densest_star;
use crate::encoding::{DepthEncoder, Encoding, Slot};
use crate::graph::{Edge, Graph};

/// Proper edge colouring with `depth` colours
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeColoringEncoder;

impl DepthEncoder for EdgeColoringEncoder {
    fn name(&self) -> &'static str {
        "edge-coloring"
    }

    fn lower_bound(&self, graph: &Graph) -> usize {
        graph.max_lower_degree()
    }

    fn encode(&self, graph: &Graph, depth: usize, symmetry_breaking: bool) -> Encoding {
        let mut encoding = Encoding::new(depth, "edge", "idle");

        for edge in graph.edges() {
            encoding.declare_layer(edge);
        }

        for node in 0..graph.node_count() {
            let incident: Vec<Edge> = graph.incident_edges(node).collect();
            for (idx, &a) in incident.iter().enumerate() {
                for &b in &incident[..idx] {
                    encoding.require_distinct(Slot::Layer(a), Slot::Layer(b));
                }
            }
        }

        if symmetry_breaking {
            fix_densest_star(graph, &mut encoding);
        }

        encoding
    }
}
