//! Eigenvector centrality via power iteration.
//!
//! # Overview
//!
//! Eigenvector centrality scores nodes on the idea that connections to
//! high-scoring nodes contribute more to a node's score. It is the dominant
//! eigenvector of the adjacency matrix.
//!
//! # Algorithm
//!
//! Power iteration on `A + I`:
//!
//! 1. Start from the uniform vector `1/n`.
//! 2. `x ← x_last + A · x_last` (the identity shift keeps bipartite graphs
//!    from oscillating between two states; it does not move the eigenvector).
//! 3. Normalize `x` to unit L2 norm.
//! 4. Stop once `Σ |x - x_last| < n · tolerance`.
//!
//! Running out of iterations is an error rather than a partial result.

use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::graph::EdgeGraph;

/// Result of eigenvector centrality computation.
#[derive(Debug, Clone)]
pub struct EigenvectorResult {
    /// Scores indexed by node position, unit L2 norm.
    pub scores: Vec<f64>,
    /// Number of iterations performed.
    pub iterations: usize,
}

/// Compute eigenvector centrality for every node.
///
/// A self-loop contributes its node's own score once per iteration. When
/// `weighted` is set, neighbor contributions are scaled by edge weight.
///
/// # Errors
///
/// [`Error::EmptyGraph`] when the graph has no nodes, and
/// [`Error::Convergence`] if the tolerance is not reached within `max_iter`
/// iterations.
#[instrument(skip(g), fields(nodes = g.node_count()))]
pub fn eigenvector_centrality(
    g: &EdgeGraph,
    weighted: bool,
    max_iter: usize,
    tolerance: f64,
) -> Result<EigenvectorResult> {
    let n = g.node_count();
    if n == 0 {
        return Err(Error::EmptyGraph);
    }

    let adj = g.adjacency(true);
    let threshold = n as f64 * tolerance;

    let mut scores: Vec<f64> = vec![1.0 / n as f64; n];

    for iter in 0..max_iter {
        let last = scores.clone();

        for (v, nbrs) in adj.iter().enumerate() {
            for &(u, w) in nbrs {
                let w = if weighted { w } else { 1.0 };
                scores[u] += last[v] * w;
            }
        }

        let norm = scores.iter().map(|x| x * x).sum::<f64>().sqrt();
        let norm = if norm > 0.0 { norm } else { 1.0 };
        for x in &mut scores {
            *x /= norm;
        }

        let diff: f64 = scores
            .iter()
            .zip(&last)
            .map(|(a, b)| (a - b).abs())
            .sum();

        if diff < threshold {
            debug!(iterations = iter + 1, "eigenvector centrality converged");
            return Ok(EigenvectorResult {
                scores,
                iterations: iter + 1,
            });
        }
    }

    Err(Error::Convergence {
        iterations: max_iter,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
