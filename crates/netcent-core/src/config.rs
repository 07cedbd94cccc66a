use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File name looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "netcent.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_input_root")]
    pub input_root: PathBuf,
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_root: default_input_root(),
            output_root: default_output_root(),
            render: RenderConfig::default(),
            layout: LayoutConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

/// Figure geometry and styling. Sizes follow the plotting convention:
/// inches for the figure, points for text, points² for marker area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_figure_inches")]
    pub width_in: f64,
    #[serde(default = "default_figure_inches")]
    pub height_in: f64,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    #[serde(default = "default_node_size")]
    pub node_size: f64,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_true")]
    pub with_labels: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width_in: default_figure_inches(),
            height_in: default_figure_inches(),
            dpi: default_dpi(),
            node_size: default_node_size(),
            font_size: default_font_size(),
            with_labels: default_true(),
        }
    }
}

impl RenderConfig {
    /// Pixel dimensions of the output image.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        let w = (self.width_in * dpi).round().max(1.0) as u32;
        let h = (self.height_in * dpi).round().max(1.0) as u32;
        (w, h)
    }

    /// Pixels per typographic point at the configured DPI.
    #[must_use]
    pub fn px_per_pt(&self) -> f64 {
        f64::from(self.dpi) / 72.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_layout_iterations")]
    pub iterations: usize,
    /// Fixes the initial positions. Unseeded layouts differ between runs.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: default_layout_iterations(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Use the `Weight` column as edge length/strength in centrality.
    #[serde(default)]
    pub weighted: bool,
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            weighted: false,
            max_iter: default_max_iter(),
            tolerance: default_tolerance(),
        }
    }
}

/// Load the config at `path`, or defaults when the file does not exist.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file exists but cannot be read, and
/// [`Error::Config`] if it is not valid TOML for [`Config`].
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    toml::from_str::<Config>(&content).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn default_input_root() -> PathBuf {
    PathBuf::from("in")
}

fn default_output_root() -> PathBuf {
    PathBuf::from("output")
}

const fn default_figure_inches() -> f64 {
    20.0
}

const fn default_dpi() -> u32 {
    100
}

const fn default_node_size() -> f64 {
    20.0
}

const fn default_font_size() -> f64 {
    10.0
}

const fn default_true() -> bool {
    true
}

const fn default_layout_iterations() -> usize {
    50
}

const fn default_max_iter() -> usize {
    100
}

const fn default_tolerance() -> f64 {
    1.0e-6
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let cfg = load_config(&dir.path().join(CONFIG_FILE_NAME)).expect("load");
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.input_root, PathBuf::from("in"));
        assert_eq!(cfg.output_root, PathBuf::from("output"));
        assert_eq!(cfg.render.pixel_size(), (2000, 2000));
        assert!(!cfg.metrics.weighted);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "output_root = \"out\"\n[layout]\nseed = 7\n[render]\ndpi = 50\n",
        )
        .expect("write config");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.output_root, PathBuf::from("out"));
        assert_eq!(cfg.input_root, PathBuf::from("in"));
        assert_eq!(cfg.layout.seed, Some(7));
        assert_eq!(cfg.layout.iterations, 50);
        assert_eq!(cfg.render.pixel_size(), (1000, 1000));
        assert!((cfg.render.font_size - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[metrics\nweighted = yes").expect("write config");

        let err = load_config(&path).expect_err("should fail");
        assert!(matches!(err, Error::Config { .. }), "got {err:?}");
    }
}
