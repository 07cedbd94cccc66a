//! Degree counts.
//!
//! Degree is the number of incident edges, ignoring weights. A self-loop
//! touches its node twice and therefore adds 2.

use crate::graph::EdgeGraph;

/// Degree per node, indexed by node position (insertion order).
#[must_use]
pub fn degrees(g: &EdgeGraph) -> Vec<usize> {
    let mut deg = vec![0; g.node_count()];
    for (a, b, _) in g.edge_endpoints() {
        deg[a] += 1;
        deg[b] += 1;
    }
    deg
}

/// Density of a simple undirected graph: `2m / (n (n - 1))`.
///
/// Returns 0.0 for graphs with fewer than 2 nodes.
#[must_use]
pub fn density(g: &EdgeGraph) -> f64 {
    let n = g.node_count();
    if n < 2 {
        return 0.0;
    }
    let loops = g.edge_endpoints().filter(|(a, b, _)| a == b).count();
    let m = (g.edge_count() - loops) as f64;
    let n = n as f64;
    2.0 * m / (n * (n - 1.0))
}
