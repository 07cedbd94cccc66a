//! Fruchterman–Reingold spring layout.
//!
//! # Algorithm
//!
//! 1. Place nodes uniformly at random in the unit square.
//! 2. Each iteration, every pair repels with `k² / d` and every edge pulls
//!    its endpoints together with `d² / k`, where `k = sqrt(1 / n)`.
//! 3. Each node moves along its net force by at most the current
//!    temperature, which starts at a tenth of the initial extent and cools
//!    linearly to zero.
//! 4. Stop early once the mean displacement drops below `1e-4`.
//!
//! The result is centered on the origin and scaled so the largest
//! coordinate magnitude is 1. Edge weights are not used.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::config::LayoutConfig;
use crate::graph::EdgeGraph;

const MIN_DISTANCE: f64 = 0.01;
const STOP_THRESHOLD: f64 = 1.0e-4;

/// A 2D position in layout space.
pub type Point = (f64, f64);

/// Compute node positions, indexed by node position, within [-1, 1]².
#[must_use]
#[instrument(skip_all, fields(nodes = g.node_count(), seed = ?config.seed))]
pub fn spring_layout(g: &EdgeGraph, config: &LayoutConfig) -> Vec<Point> {
    let n = g.node_count();
    match n {
        0 => return Vec::new(),
        1 => return vec![(0.0, 0.0)],
        _ => {}
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut pos: Vec<Point> = (0..n)
        .map(|_| (rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
        .collect();

    let neighbors = g.adjacency(false);

    let k = (1.0 / n as f64).sqrt();
    let mut temperature = extent(&pos) * 0.1;
    let cooling = temperature / (config.iterations as f64 + 1.0);

    for iter in 0..config.iterations {
        let moves: Vec<Point> = forces(&pos, &neighbors, k)
            .into_iter()
            .map(|(fx, fy)| {
                let length = fx.hypot(fy);
                let length = if length < MIN_DISTANCE { 0.1 } else { length };
                (fx * temperature / length, fy * temperature / length)
            })
            .collect();

        let mut total = 0.0;
        for (p, m) in pos.iter_mut().zip(&moves) {
            p.0 += m.0;
            p.1 += m.1;
            total += m.0 * m.0 + m.1 * m.1;
        }
        temperature -= cooling;

        if total.sqrt() / (n as f64) < STOP_THRESHOLD {
            debug!(iterations = iter + 1, "layout settled early");
            break;
        }
    }

    rescale(&mut pos);
    pos
}

/// Net force on each node: every other node repels, neighbors attract.
fn forces(pos: &[Point], neighbors: &[Vec<(usize, f64)>], k: f64) -> Vec<Point> {
    (0..pos.len())
        .map(|i| {
            let (mut fx, mut fy) = (0.0, 0.0);
            for (j, &other) in pos.iter().enumerate() {
                if i == j {
                    continue;
                }
                let (dx, dy, d) = offset(pos[i], other);
                let repel = k * k / (d * d);
                fx += dx * repel;
                fy += dy * repel;
            }
            for &(j, _) in &neighbors[i] {
                let (dx, dy, d) = offset(pos[i], pos[j]);
                let attract = d / k;
                fx -= dx * attract;
                fy -= dy * attract;
            }
            (fx, fy)
        })
        .collect()
}

/// Vector from `b` to `a` and its length, floored at `MIN_DISTANCE`.
fn offset(a: Point, b: Point) -> (f64, f64, f64) {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx, dy, dx.hypot(dy).max(MIN_DISTANCE))
}

fn extent(pos: &[Point]) -> f64 {
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in pos {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    (max_x - min_x).max(max_y - min_y)
}

/// Center on the origin and scale the largest magnitude to 1.
fn rescale(pos: &mut [Point]) {
    let n = pos.len() as f64;
    let cx = pos.iter().map(|p| p.0).sum::<f64>() / n;
    let cy = pos.iter().map(|p| p.1).sum::<f64>() / n;

    let mut lim: f64 = 0.0;
    for p in pos.iter_mut() {
        p.0 -= cx;
        p.1 -= cy;
        lim = lim.max(p.0.abs()).max(p.1.abs());
    }

    if lim > 0.0 {
        for p in pos.iter_mut() {
            p.0 /= lim;
            p.1 /= lim;
        }
    }
}
