//! Error types for the netcent library.

use std::io;
use std::path::PathBuf;

/// Convenience alias used throughout the library.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while loading, rendering or scoring a graph.
///
/// None of these are recovered by the pipeline: the first error aborts the
/// batch and is surfaced to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input or output path could not be read, listed or written.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The edge table is malformed or lacks `Source`/`Target`/`Weight`.
    #[error("malformed edge table {}: {source}", path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required header (`Source`, `Target` or `Weight`) is absent.
    #[error("edge table {} has no `{column}` column", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    /// Power iteration did not converge within the iteration budget.
    #[error("eigenvector centrality failed to converge in {iterations} iterations")]
    Convergence { iterations: usize },

    /// Centrality is undefined on a graph without nodes.
    #[error("cannot compute centrality of an empty graph")]
    EmptyGraph,

    /// The drawing backend rejected the generated figure.
    #[error("render failed: {0}")]
    Render(String),

    /// The configuration file could not be parsed.
    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn schema(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Schema {
            path: path.into(),
            source,
        }
    }
}
