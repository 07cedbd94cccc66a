//! One pipeline for every input: load → render → metrics.
//!
//! [`Pipeline::run_file`] handles a single edge table; [`Pipeline::run_batch`]
//! calls it for each resolved input in order. There is no per-file error
//! isolation: the first failure stops the batch and is returned, leaving
//! any earlier outputs on disk.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::graph::EdgeGraph;
use crate::input::InputFile;
use crate::metrics::basic::density;
use crate::metrics::{compute_metrics, write_metrics_csv};
use crate::render::Renderer;
use crate::timing::{Stage, StageTimings};

/// What one input produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub input: PathBuf,
    pub image: PathBuf,
    pub table: PathBuf,
    pub nodes: usize,
    pub edges: usize,
    pub timings: StageTimings,
}

/// Progress notification sent before each file of a batch.
#[derive(Debug, Clone, Copy)]
pub struct BatchProgress<'a> {
    /// 1-based position in the batch.
    pub position: usize,
    pub total: usize,
    pub input: &'a InputFile,
}

#[derive(Debug)]
pub struct Pipeline {
    config: Config,
    renderer: Renderer,
}

impl Pipeline {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            renderer: Renderer::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// `<output_root>/<basename>_net.png`
    #[must_use]
    pub fn image_path(&self, basename: &str) -> PathBuf {
        self.config.output_root.join(format!("{basename}_net.png"))
    }

    /// `<output_root>/<basename>_df.csv`
    #[must_use]
    pub fn table_path(&self, basename: &str) -> PathBuf {
        self.config.output_root.join(format!("{basename}_df.csv"))
    }

    /// Create the output root if it does not exist yet.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the directory cannot be created.
    pub fn ensure_output_root(&self) -> Result<()> {
        let root: &Path = &self.config.output_root;
        std::fs::create_dir_all(root).map_err(|e| Error::io(root, e))
    }

    /// Load, draw and score one edge table.
    ///
    /// # Errors
    ///
    /// Any load, render, metrics or write error, unchanged.
    #[instrument(skip(self), fields(basename = %input.basename))]
    pub fn run_file(&self, input: &InputFile) -> Result<FileReport> {
        let mut timings = StageTimings::default();
        let graph = timings.measure(Stage::Load, || EdgeGraph::from_tsv_path(&input.path))?;

        let image = self.image_path(&input.basename);
        timings.measure(Stage::Render, || {
            self.renderer
                .render_png(&graph, &image, &self.config.render, &self.config.layout)
        })?;

        let table = self.table_path(&input.basename);
        timings.measure(Stage::Metrics, || {
            let rows = compute_metrics(&graph, &self.config.metrics)?;
            write_metrics_csv(&rows, &table)
        })?;

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            density = density(&graph),
            elapsed_ms = timings.total().as_millis(),
            image = %image.display(),
            table = %table.display(),
            "processed edge table"
        );

        Ok(FileReport {
            input: input.path.clone(),
            image,
            table,
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            timings,
        })
    }

    /// Run every input in order, stopping at the first error.
    ///
    /// # Errors
    ///
    /// The first error from [`Pipeline::ensure_output_root`] or
    /// [`Pipeline::run_file`].
    pub fn run_batch<F>(&self, inputs: &[InputFile], mut on_progress: F) -> Result<Vec<FileReport>>
    where
        F: FnMut(BatchProgress<'_>),
    {
        self.ensure_output_root()?;

        let total = inputs.len();
        let mut reports = Vec::with_capacity(total);
        for (i, input) in inputs.iter().enumerate() {
            on_progress(BatchProgress {
                position: i + 1,
                total,
                input,
            });
            reports.push(self.run_file(input)?);
        }
        Ok(reports)
    }
}
