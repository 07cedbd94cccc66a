//! Per-node centrality metrics.
//!
//! # Overview
//!
//! Each metric answers a different question about a node:
//!
//! - **Degree** (`basic`): how many edges touch it?
//! - **Betweenness** (`betweenness`): how often does it bridge other pairs?
//! - **Eigenvector** (`eigenvector`): is it connected to other central nodes?
//!
//! All three are unweighted unless [`MetricsConfig::weighted`] is set, in
//! which case betweenness treats weights as edge lengths and eigenvector
//! centrality scales neighbor contributions by weight.
//!
//! # Usage
//!
//! ```rust,ignore
//! use netcent_core::config::MetricsConfig;
//! use netcent_core::metrics::{compute_metrics, write_metrics_csv};
//!
//! let rows = compute_metrics(&graph, &MetricsConfig::default())?;
//! write_metrics_csv(&rows, "output/toy_df.csv".as_ref())?;
//! ```

pub mod basic;
pub mod betweenness;
pub mod eigenvector;
pub mod table;

pub use table::{METRICS_HEADER, MetricsRow, write_metrics, write_metrics_csv};

use tracing::instrument;

use crate::config::MetricsConfig;
use crate::error::Result;
use crate::graph::EdgeGraph;

/// Build the metrics table: one row per node, in node insertion order.
///
/// # Errors
///
/// Fails when eigenvector centrality is undefined (empty graph) or does not
/// converge within the configured budget.
#[instrument(skip_all, fields(nodes = g.node_count(), weighted = config.weighted))]
pub fn compute_metrics(g: &EdgeGraph, config: &MetricsConfig) -> Result<Vec<MetricsRow>> {
    let degrees = basic::degrees(g);
    let bc = betweenness::betweenness_centrality(g, config.weighted);
    let ev = eigenvector::eigenvector_centrality(
        g,
        config.weighted,
        config.max_iter,
        config.tolerance,
    )?;

    let rows = g
        .names()
        .zip(degrees)
        .zip(bc.into_iter().zip(ev.scores))
        .map(|((name, degrees), (betweenness, eigenvector))| MetricsRow {
            names: name.to_string(),
            degrees,
            betweenness,
            eigenvector,
        })
        .collect();

    Ok(rows)
}
