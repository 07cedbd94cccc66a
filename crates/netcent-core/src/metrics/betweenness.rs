//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a node lies on shortest paths
//! between other pairs of nodes. High-betweenness nodes are bridges:
//! removing them would lengthen or cut many paths.
//!
//! # Algorithm
//!
//! Brandes (2001):
//!
//! 1. For each source node `s`, compute shortest-path counts and distances
//!    (BFS when unweighted, Dijkstra when weights are edge lengths).
//! 2. Accumulate dependency scores in reverse discovery order.
//! 3. Sum the dependency scores across all source nodes.
//!
//! Complexity: O(V * E) unweighted, O(V * E log V) weighted.
//!
//! # Normalization
//!
//! Every unordered pair is visited from both ends, so the raw sum counts
//! each pair twice. Scores are multiplied by `1 / ((n-1)(n-2))`, which maps
//! them into [0, 1]. Graphs with `n <= 2` are left unscaled (all zero).

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use tracing::instrument;

use crate::graph::EdgeGraph;

/// Compute normalized betweenness centrality for every node.
///
/// When `weighted` is false, every edge has length 1 and the `Weight`
/// column is ignored. When true, weights are used as (non-negative) edge
/// lengths.
///
/// # Returns
///
/// Scores indexed by node position (insertion order). Isolated nodes and
/// nodes on no shortest path receive 0.0.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
pub fn betweenness_centrality(g: &EdgeGraph, weighted: bool) -> Vec<f64> {
    let n = g.node_count();
    if n == 0 {
        return Vec::new();
    }

    // Self-loops never lie on a shortest path.
    let adj = g.adjacency(false);

    let mut cb: Vec<f64> = vec![0.0; n];

    for s in 0..n {
        let paths = if weighted {
            dijkstra_paths(&adj, s)
        } else {
            bfs_paths(&adj, s)
        };
        accumulate(&paths, s, &mut cb);
    }

    if n > 2 {
        let scale = 1.0 / ((n as f64 - 1.0) * (n as f64 - 2.0));
        for score in &mut cb {
            *score *= scale;
        }
    }

    cb
}

/// Single-source shortest-path structure used by the accumulation phase.
struct ShortestPaths {
    /// Nodes in non-decreasing distance from the source.
    order: Vec<usize>,
    /// `predecessors[w]`: nodes immediately preceding `w` on shortest paths.
    predecessors: Vec<Vec<usize>>,
    /// `sigma[t]`: number of shortest paths from the source to `t`.
    sigma: Vec<f64>,
}

fn bfs_paths(adj: &[Vec<(usize, f64)>], s: usize) -> ShortestPaths {
    let n = adj.len();
    let mut order = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0; n];
    sigma[s] = 1.0;

    // -1 = unvisited.
    let mut dist: Vec<i64> = vec![-1; n];
    dist[s] = 0;

    let mut queue = VecDeque::new();
    queue.push_back(s);

    while let Some(v) = queue.pop_front() {
        order.push(v);

        for &(w, _) in &adj[v] {
            if dist[w] < 0 {
                dist[w] = dist[v] + 1;
                queue.push_back(w);
            }

            if dist[w] == dist[v] + 1 {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    ShortestPaths {
        order,
        predecessors,
        sigma,
    }
}

/// Min-heap entry ordered by distance, then node position.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Frontier {
    dist: f64,
    node: usize,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[allow(clippy::float_cmp)]
fn dijkstra_paths(adj: &[Vec<(usize, f64)>], s: usize) -> ShortestPaths {
    let n = adj.len();
    let mut order = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0; n];
    sigma[s] = 1.0;

    let mut seen: Vec<Option<f64>> = vec![None; n];
    let mut settled = vec![false; n];
    seen[s] = Some(0.0);

    let mut heap = BinaryHeap::new();
    heap.push(Frontier { dist: 0.0, node: s });

    while let Some(Frontier { dist, node: v }) = heap.pop() {
        if settled[v] {
            continue;
        }
        settled[v] = true;
        order.push(v);

        for &(w, len) in &adj[v] {
            let candidate = dist + len;
            match seen[w] {
                Some(best) if settled[w] || candidate > best => {}
                Some(best) if candidate == best => {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
                _ => {
                    seen[w] = Some(candidate);
                    sigma[w] = sigma[v];
                    predecessors[w].clear();
                    predecessors[w].push(v);
                    heap.push(Frontier {
                        dist: candidate,
                        node: w,
                    });
                }
            }
        }
    }

    ShortestPaths {
        order,
        predecessors,
        sigma,
    }
}

fn accumulate(paths: &ShortestPaths, s: usize, cb: &mut [f64]) {
    let mut delta = vec![0.0; cb.len()];

    for &w in paths.order.iter().rev() {
        for &v in &paths.predecessors[w] {
            if paths.sigma[w] > 0.0 {
                delta[v] += (paths.sigma[v] / paths.sigma[w]) * (1.0 + delta[w]);
            }
        }

        if w != s {
            cb[w] += delta[w];
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
