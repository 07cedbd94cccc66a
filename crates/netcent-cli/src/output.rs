//! Output layer: human status lines or a JSON run summary on stdout,
//! progress on stderr.
//!
//! Human mode prints the same `[INFO]` lines for every run so scripts that
//! grep for `Job complete` keep working. JSON mode prints nothing until the
//! batch is done, then one pretty-printed [`RunSummary`].

use std::io::{self, Write};

use netcent_core::{BatchProgress, FileReport, InputMode};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Machine-readable result of a whole run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub input: String,
    pub mode: InputMode,
    pub files: Vec<FileReport>,
}

pub fn render_start(mode: OutputMode, w: &mut dyn Write) -> io::Result<()> {
    if mode.is_json() {
        return Ok(());
    }
    writeln!(w, "[INFO] Drawing networks...")
}

pub fn render_finish(mode: OutputMode, summary: &RunSummary, w: &mut dyn Write) -> io::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *w, summary)?;
            writeln!(w)
        }
        OutputMode::Human => writeln!(w, "[INFO] Job complete"),
    }
}

/// One progress line per file, e.g. `[2/5] toy`.
pub fn render_progress(progress: &BatchProgress<'_>, w: &mut dyn Write) -> io::Result<()> {
    writeln!(
        w,
        "[{}/{}] {}",
        progress.position, progress.total, progress.input.basename
    )
}

/// Best-effort progress: a failed write is logged, never fatal.
pub fn report_progress(progress: &BatchProgress<'_>, w: &mut dyn Write) {
    if let Err(e) = render_progress(progress, w) {
        debug!(error = %e, position = progress.position, "failed to write progress line");
    }
}
