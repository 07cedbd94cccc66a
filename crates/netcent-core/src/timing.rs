//! Wall-clock time spent in each pipeline stage.
//!
//! Every [`FileReport`](crate::pipeline::FileReport) carries the
//! [`StageTimings`] of its input. [`summarize`] folds a batch of them into
//! one [`StageSummary`] per stage for the `--timing` report.

use std::fmt::Write as _;
use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};

/// The three steps each input goes through, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Load,
    Render,
    Metrics,
}

impl Stage {
    pub const ALL: [Self; 3] = [Self::Load, Self::Render, Self::Metrics];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Render => "render",
            Self::Metrics => "metrics",
        }
    }
}

/// Time spent per stage on one input. Serialized in microseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageTimings {
    #[serde(rename = "load_us", serialize_with = "as_micros")]
    pub load: Duration,
    #[serde(rename = "render_us", serialize_with = "as_micros")]
    pub render: Duration,
    #[serde(rename = "metrics_us", serialize_with = "as_micros")]
    pub metrics: Duration,
}

impl StageTimings {
    /// Run `f` and add its elapsed time to `stage`.
    pub fn measure<R>(&mut self, stage: Stage, f: impl FnOnce() -> R) -> R {
        let started = Instant::now();
        let out = f();
        *self.slot(stage) += started.elapsed();
        out
    }

    #[must_use]
    pub const fn get(&self, stage: Stage) -> Duration {
        match stage {
            Stage::Load => self.load,
            Stage::Render => self.render,
            Stage::Metrics => self.metrics,
        }
    }

    #[must_use]
    pub fn total(&self) -> Duration {
        self.load + self.render + self.metrics
    }

    const fn slot(&mut self, stage: Stage) -> &mut Duration {
        match stage {
            Stage::Load => &mut self.load,
            Stage::Render => &mut self.render,
            Stage::Metrics => &mut self.metrics,
        }
    }
}

fn as_micros<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(d.as_micros()).unwrap_or(u64::MAX))
}

/// One stage aggregated over a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSummary {
    pub stage: Stage,
    pub files: u32,
    pub total: Duration,
    pub slowest: Duration,
}

impl StageSummary {
    #[must_use]
    pub fn mean(&self) -> Duration {
        self.total.checked_div(self.files).unwrap_or_default()
    }
}

/// Aggregate per-file timings into one row per stage, in execution order.
pub fn summarize<'a>(timings: impl IntoIterator<Item = &'a StageTimings>) -> Vec<StageSummary> {
    let mut rows = Stage::ALL.map(|stage| StageSummary {
        stage,
        files: 0,
        total: Duration::ZERO,
        slowest: Duration::ZERO,
    });
    for t in timings {
        for row in &mut rows {
            let spent = t.get(row.stage);
            row.files = row.files.saturating_add(1);
            row.total += spent;
            row.slowest = row.slowest.max(spent);
        }
    }
    rows.to_vec()
}

/// Fixed-width table of stage summaries, durations in milliseconds.
#[must_use]
pub fn format_summary(rows: &[StageSummary]) -> String {
    let mut out = format!(
        "{:<8} {:>5} {:>12} {:>12} {:>12}\n",
        "stage", "files", "total ms", "mean ms", "slowest ms"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<8} {:>5} {:>12.3} {:>12.3} {:>12.3}",
            row.stage.as_str(),
            row.files,
            millis(row.total),
            millis(row.mean()),
            millis(row.slowest)
        );
    }
    out
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn measure_accumulates_into_stage() {
        let mut t = StageTimings::default();
        let value = t.measure(Stage::Render, || {
            std::thread::sleep(ms(1));
            7_u8
        });
        t.measure(Stage::Render, || std::thread::sleep(ms(1)));

        assert_eq!(value, 7);
        assert!(t.render >= ms(2));
        assert_eq!(t.load, Duration::ZERO);
        assert_eq!(t.total(), t.render);
    }

    #[test]
    fn summary_aggregates_per_stage() {
        let a = StageTimings {
            load: ms(1),
            render: ms(10),
            metrics: ms(3),
        };
        let b = StageTimings {
            load: ms(3),
            render: ms(20),
            metrics: ms(1),
        };

        let rows = summarize([&a, &b]);
        assert_eq!(
            rows.iter().map(|r| r.stage).collect::<Vec<_>>(),
            Stage::ALL
        );
        let render = rows[1];
        assert_eq!(render.files, 2);
        assert_eq!(render.total, ms(30));
        assert_eq!(render.mean(), ms(15));
        assert_eq!(render.slowest, ms(20));

        let text = format_summary(&rows);
        assert!(text.starts_with("stage"));
        assert!(text.contains("render       2       30.000       15.000       20.000"), "{text}");
    }

    #[test]
    fn empty_batch_has_zero_rows() {
        let rows = summarize(&Vec::<StageTimings>::new());
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.files == 0 && r.mean() == Duration::ZERO));
    }

    #[test]
    fn serializes_as_microseconds() {
        let t = StageTimings {
            load: Duration::from_micros(1_500),
            render: ms(2),
            metrics: Duration::ZERO,
        };
        let json = serde_json::to_value(t).expect("serialize");
        assert_eq!(json["load_us"], 1_500);
        assert_eq!(json["render_us"], 2_000);
        assert_eq!(json["metrics_us"], 0);
    }
}
