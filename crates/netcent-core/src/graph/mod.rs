//! Weighted undirected graph built from a tab-separated edge table.
//!
//! # Overview
//!
//! Each input file is a TSV table with a header row naming exactly the
//! columns `Source`, `Target` and `Weight`. Every row becomes one undirected
//! edge; the node set is the union of all `Source` and `Target` values.
//!
//! ## Pipeline
//!
//! ```text
//! in/<name>.csv (TSV)
//!        ↓  build::EdgeGraph::from_tsv_path()
//! EdgeGraph (UnGraph<String, f64>, insertion-ordered nodes)
//!        ├─ render::render_png()         → output/<name>_net.png
//!        └─ metrics::compute_metrics()   → output/<name>_df.csv
//! ```
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use netcent_core::graph::EdgeGraph;
//!
//! let g = EdgeGraph::from_tsv_path("in/toy.csv".as_ref())?;
//! println!("nodes={} edges={}", g.node_count(), g.edge_count());
//! ```

pub mod build;

pub use build::{EdgeGraph, EdgeRecord, REQUIRED_COLUMNS};
