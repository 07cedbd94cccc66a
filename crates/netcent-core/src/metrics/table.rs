//! The per-node metrics table and its CSV encoding.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{Error, Result};

/// Column names of the written table, in order.
pub const METRICS_HEADER: [&str; 4] = ["names", "degrees", "betweenness", "eigenvector"];

/// One output row. Field names are the CSV header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRow {
    pub names: String,
    pub degrees: usize,
    pub betweenness: f64,
    pub eigenvector: f64,
}

/// Write rows as comma-separated values with a header line.
///
/// Floats are written in shortest round-trip form.
///
/// # Errors
///
/// Propagates any write error from `writer`.
pub fn write_metrics<W: Write>(rows: &[MetricsRow], writer: W) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    // Written explicitly so an empty table still carries its header.
    wtr.write_record(METRICS_HEADER)?;
    for row in rows {
        wtr.write_record([
            row.names.clone(),
            row.degrees.to_string(),
            format_float(row.betweenness),
            format_float(row.eigenvector),
        ])?;
    }
    wtr.flush()
}

/// Write the metrics table to `path`, replacing any existing file.
///
/// # Errors
///
/// [`Error::Io`] if the file cannot be created or written.
#[instrument(skip(rows), fields(rows = rows.len()))]
pub fn write_metrics_csv(rows: &[MetricsRow], path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    write_metrics(rows, file).map_err(|e| Error::io(path, e))
}

/// Shortest representation that parses back to the same `f64`, always with
/// a fractional part or exponent (`1.0`, not `1`).
///
/// Exponents carry a sign and at least two digits (`1e-07`, `1e+16`), and
/// NaN is an empty cell.
fn format_float(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    let text = format!("{value:?}");
    match text.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = exp.strip_prefix('-').map_or(("+", exp), |d| ("-", d));
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}
