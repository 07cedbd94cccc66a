//! An in-memory SVG figure.
//!
//! A [`Figure`] is created per drawing and consumed by [`Figure::finish`];
//! nothing about one figure survives into the next.

use std::fmt::Write as _;

const NODE_COLOR: &str = "#1f78b4";
const EDGE_COLOR: &str = "#000000";
const LABEL_COLOR: &str = "#000000";
const FONT_FAMILY: &str = "DejaVu Sans, Bitstream Vera Sans, Arial, sans-serif";

#[derive(Debug)]
pub struct Figure {
    width: u32,
    height: u32,
    edges: String,
    nodes: String,
    labels: String,
}

impl Figure {
    /// Start a blank figure of `width` × `height` pixels on a white ground.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            edges: String::new(),
            nodes: String::new(),
            labels: String::new(),
        }
    }

    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn edge(&mut self, from: (f64, f64), to: (f64, f64), stroke_px: f64) {
        let _ = writeln!(
            self.edges,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{EDGE_COLOR}" stroke-width="{stroke_px:.2}"/>"#,
            from.0, from.1, to.0, to.1
        );
    }

    pub fn node(&mut self, at: (f64, f64), radius_px: f64) {
        let _ = writeln!(
            self.nodes,
            r#"<circle cx="{:.2}" cy="{:.2}" r="{radius_px:.2}" fill="{NODE_COLOR}"/>"#,
            at.0, at.1
        );
    }

    pub fn label(&mut self, at: (f64, f64), text: &str, font_px: f64) {
        let _ = writeln!(
            self.labels,
            r#"<text x="{:.2}" y="{:.2}" dy="0.35em" font-size="{font_px:.2}" font-family="{FONT_FAMILY}" text-anchor="middle" fill="{LABEL_COLOR}">{}</text>"#,
            at.0,
            at.1,
            escape(text)
        );
    }

    /// Serialize the figure. Edges are drawn under nodes, labels on top.
    #[must_use]
    pub fn finish(self) -> String {
        let Self {
            width,
            height,
            edges,
            nodes,
            labels,
        } = self;
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
             viewBox=\"0 0 {width} {height}\">\n\
             <rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n\
             <g id=\"edges\">\n{edges}</g>\n\
             <g id=\"nodes\">\n{nodes}</g>\n\
             <g id=\"labels\">\n{labels}</g>\n\
             </svg>\n"
        )
    }
}

/// Escape markup and drop characters XML 1.0 cannot carry at all.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\t' | '\n' | '\r' => out.push(c),
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => {}
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
