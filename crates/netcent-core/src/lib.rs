#![forbid(unsafe_code)]
//! netcent library: turn weighted edge lists into network images and
//! centrality tables.
//!
//! # Conventions
//!
//! - **Errors**: fallible functions return [`error::Result`]; nothing is
//!   retried or recovered inside the library.
//! - **Logging**: Use `tracing` macros (`info!`, `debug!`); entry points
//!   carry `#[instrument]` spans.

pub mod config;
pub mod error;
pub mod graph;
pub mod input;
pub mod metrics;
pub mod pipeline;
pub mod render;
pub mod timing;

pub use config::{Config, LayoutConfig, MetricsConfig, RenderConfig, load_config};
pub use error::{Error, Result};
pub use graph::{EdgeGraph, EdgeRecord};
pub use input::{InputFile, InputMode, input_mode, resolve_inputs};
pub use metrics::{MetricsRow, compute_metrics, write_metrics_csv};
pub use pipeline::{BatchProgress, FileReport, Pipeline};
pub use render::Renderer;
