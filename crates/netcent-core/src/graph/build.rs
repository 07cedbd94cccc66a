//! Graph construction from a tab-separated edge table.
//!
//! # Overview
//!
//! Rows are deserialized with `csv` + `serde` into [`EdgeRecord`]s and folded
//! into a [`petgraph`] undirected graph.
//!
//! ## Node Order
//!
//! Nodes are added the first time an identifier appears, scanning rows top
//! to bottom and `Source` before `Target`. Every downstream table follows
//! this order.
//!
//! ## Duplicate Edges
//!
//! The graph is simple: a repeated pair (in either orientation) updates the
//! existing edge's weight, so the last row wins. A self-loop is stored as a
//! single edge from the node to itself.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Deserializer};
use tracing::{debug, instrument};

use crate::error::{Error, Result};

/// Header names every edge table must carry, case-sensitive.
pub const REQUIRED_COLUMNS: [&str; 3] = ["Source", "Target", "Weight"];

/// One row of the edge table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EdgeRecord {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Target")]
    pub target: String,
    /// An empty cell reads as NaN. Weights only matter in weighted mode.
    #[serde(rename = "Weight", deserialize_with = "empty_as_nan")]
    pub weight: f64,
}

fn empty_as_nan<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl EdgeRecord {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }
}

// ---------------------------------------------------------------------------
// EdgeGraph
// ---------------------------------------------------------------------------

/// An undirected weighted graph keyed by node name.
#[derive(Debug, Clone, Default)]
pub struct EdgeGraph {
    /// Nodes are identifiers; edge weights come from the `Weight` column.
    pub graph: UnGraph<String, f64>,
    /// Mapping from node name to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
}

impl EdgeGraph {
    /// Build a graph from already-parsed edge records.
    pub fn from_edges(records: impl IntoIterator<Item = EdgeRecord>) -> Self {
        let mut g = Self::default();
        for record in records {
            g.insert_edge(record);
        }
        g
    }

    /// Read a tab-separated edge table from `path`.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be opened, [`Error::MissingColumn`]
    /// if a required header is absent, and [`Error::Schema`] for any row
    /// the parser rejects.
    #[instrument]
    pub fn from_tsv_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let g = Self::from_reader(file, path)?;
        debug!(
            nodes = g.node_count(),
            edges = g.edge_count(),
            "loaded edge table"
        );
        Ok(g)
    }

    /// Read a tab-separated edge table from any reader. `origin` is only
    /// used to label errors.
    ///
    /// # Errors
    ///
    /// See [`EdgeGraph::from_tsv_path`].
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| Error::schema(origin, e))?
            .clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(Error::MissingColumn {
                    path: origin.to_path_buf(),
                    column,
                });
            }
        }

        let mut g = Self::default();
        for row in reader.deserialize::<EdgeRecord>() {
            let record = row.map_err(|e| Error::schema(origin, e))?;
            g.insert_edge(record);
        }
        Ok(g)
    }

    fn intern(&mut self, name: String) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(&name) {
            return idx;
        }
        let idx = self.graph.add_node(name.clone());
        self.node_map.insert(name, idx);
        idx
    }

    fn insert_edge(&mut self, record: EdgeRecord) {
        let EdgeRecord {
            source,
            target,
            weight,
        } = record;
        let a = self.intern(source);
        let b = self.intern(target);

        if let Some(edge) = self.graph.find_edge(a, b) {
            self.graph[edge] = weight;
        } else {
            self.graph.add_edge(a, b, weight);
        }
    }

    /// Return the number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of distinct edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up the `NodeIndex` for a node name.
    #[must_use]
    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(name).copied()
    }

    /// Node names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// Weight of the edge between two named nodes, if any.
    #[must_use]
    pub fn weight(&self, a: &str, b: &str) -> Option<f64> {
        let edge = self.graph.find_edge(self.node_index(a)?, self.node_index(b)?)?;
        self.graph.edge_weight(edge).copied()
    }

    /// Edge endpoints as dense node positions (`NodeIndex::index`).
    pub fn edge_endpoints(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index(), *e.weight()))
    }

    /// Adjacency lists indexed by node position.
    ///
    /// Each undirected edge appears in both endpoints' lists. A self-loop is
    /// listed once under its node when `include_loops` is set, and dropped
    /// otherwise.
    #[must_use]
    pub fn adjacency(&self, include_loops: bool) -> Vec<Vec<(usize, f64)>> {
        let mut adj = vec![Vec::new(); self.node_count()];
        for (a, b, w) in self.edge_endpoints() {
            if a == b {
                if include_loops {
                    adj[a].push((a, w));
                }
                continue;
            }
            adj[a].push((b, w));
            adj[b].push((a, w));
        }
        adj
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
