//! Network drawing.
//!
//! # Overview
//!
//! [`Renderer::render_png`] lays the graph out with
//! [`layout::spring_layout`], draws it onto a fresh [`figure::Figure`]
//! (edges, then nodes, then labels), rasterizes the SVG with `resvg`, and
//! writes a PNG. The renderer itself only holds the loaded font database;
//! every call gets its own figure and pixmap, both dropped before it
//! returns.
//!
//! Sizes follow the plotting convention used by the config: the figure in
//! inches at `dpi`, fonts in points, and `node_size` as marker area in
//! points², so a node's diameter is `sqrt(node_size)` points.

pub mod figure;
pub mod layout;

use std::path::Path;

use resvg::{tiny_skia, usvg};
use tracing::{debug, instrument};

use crate::config::{LayoutConfig, RenderConfig};
use crate::error::{Error, Result};
use crate::graph::EdgeGraph;

use figure::Figure;
use layout::Point;

/// Edge stroke width in points.
const EDGE_WIDTH_PT: f64 = 1.0;
/// Blank border around the drawing, as a fraction of the smaller side.
const MARGIN_FRACTION: f64 = 0.05;

pub struct Renderer {
    options: usvg::Options<'static>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("fonts", &self.options.fontdb.len())
            .finish()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a renderer with the system fonts loaded for labels.
    #[must_use]
    pub fn new() -> Self {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        debug!(fonts = options.fontdb.len(), "loaded system fonts");
        Self { options }
    }

    /// Lay out `g`, draw it, and write a PNG to `path`.
    ///
    /// # Errors
    ///
    /// [`Error::Render`] if the figure cannot be rasterized or encoded, and
    /// [`Error::Io`] if the file cannot be written.
    #[instrument(skip(self, g, render, layout), fields(nodes = g.node_count()))]
    pub fn render_png(
        &self,
        g: &EdgeGraph,
        path: &Path,
        render: &RenderConfig,
        layout: &LayoutConfig,
    ) -> Result<()> {
        let positions = layout::spring_layout(g, layout);
        let svg = draw(g, &positions, render).finish();
        let png = self.rasterize(&svg)?;
        std::fs::write(path, png).map_err(|e| Error::io(path, e))
    }

    /// Rasterize an SVG document into PNG bytes.
    ///
    /// # Errors
    ///
    /// [`Error::Render`] if the document is invalid or has zero size.
    pub fn rasterize(&self, svg: &str) -> Result<Vec<u8>> {
        let tree =
            usvg::Tree::from_str(svg, &self.options).map_err(|e| Error::Render(e.to_string()))?;
        let size = tree.size().to_int_size();

        let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).ok_or_else(|| {
            Error::Render(format!(
                "cannot allocate {}x{} canvas",
                size.width(),
                size.height()
            ))
        })?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| Error::Render(e.to_string()))
    }
}

/// Draw `g` at `positions` (layout space, [-1, 1]²) onto a new figure.
#[must_use]
pub fn draw(g: &EdgeGraph, positions: &[Point], config: &RenderConfig) -> Figure {
    let (width, height) = config.pixel_size();
    let mut fig = Figure::new(width, height);

    let px_per_pt = config.px_per_pt();
    let radius = config.node_size.max(0.0).sqrt() / 2.0 * px_per_pt;
    let font = config.font_size * px_per_pt;

    let (w, h) = (f64::from(width), f64::from(height));
    let pad = (w.min(h) * MARGIN_FRACTION).max(radius + font);
    let to_px = |(x, y): Point| -> Point {
        // Layout y grows upward; image y grows downward.
        let px = pad + (x + 1.0) / 2.0 * (w - 2.0 * pad);
        let py = pad + (1.0 - y) / 2.0 * (h - 2.0 * pad);
        (px, py)
    };

    for (a, b, _) in g.edge_endpoints() {
        if a != b {
            fig.edge(to_px(positions[a]), to_px(positions[b]), EDGE_WIDTH_PT * px_per_pt);
        }
    }
    for &p in positions {
        fig.node(to_px(p), radius);
    }
    if config.with_labels {
        for (name, &p) in g.names().zip(positions) {
            fig.label(to_px(p), name, font);
        }
    }

    fig
}
