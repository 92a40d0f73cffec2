//! Reproducible random graphs for benchmarking

use crate::error::GraphError;
use crate::graph::Graph;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Create the RNG used for graph generation
///
/// A fixed seed gives the same sequence of graphs on every platform.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Sample a graph where each node pair is connected with probability `density`
///
/// `density` is clamped to `[0, 1]`.
pub fn random_graph<R: Rng + ?Sized>(
    node_count: usize,
    density: f64,
    rng: &mut R,
) -> Result<Graph, GraphError> {
    let density = if density.is_nan() {
        0.0
    } else {
        density.clamp(0.0, 1.0)
    };

    let mut edges = Vec::new();
    for high in 0..node_count {
        for low in 0..high {
            if rng.random_bool(density) {
                edges.push((high, low));
            }
        }
    }

    Graph::from_edges(node_count, edges)
}
