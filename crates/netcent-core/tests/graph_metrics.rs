//! Known-topology regression tests for the metrics table.
//!
//! Each test uses a hand-crafted edge table with known properties. Expected
//! values are computed analytically and hardcoded.

use std::path::Path;

use netcent_core::config::MetricsConfig;
use netcent_core::graph::EdgeGraph;
use netcent_core::metrics::{MetricsRow, compute_metrics, write_metrics};

fn load(text: &str) -> EdgeGraph {
    EdgeGraph::from_reader(text.as_bytes(), Path::new("inline.csv")).expect("valid table")
}

fn rows(text: &str) -> Vec<MetricsRow> {
    compute_metrics(&load(text), &MetricsConfig::default()).expect("metrics")
}

fn row<'a>(rows: &'a [MetricsRow], name: &str) -> &'a MetricsRow {
    rows.iter()
        .find(|r| r.names == name)
        .unwrap_or_else(|| panic!("no row for {name}"))
}

#[test]
fn toy_scenario() {
    let rows = rows("Source\tTarget\tWeight\nA\tB\t1\nB\tC\t2\n");

    assert_eq!(rows.len(), 3);
    assert_eq!(row(&rows, "A").degrees, 1);
    assert_eq!(row(&rows, "B").degrees, 2);
    assert_eq!(row(&rows, "C").degrees, 1);

    assert!((row(&rows, "B").betweenness - 1.0).abs() < 1e-12);
    assert!((row(&rows, "A").eigenvector - 0.5).abs() < 1e-4);
    assert!((row(&rows, "B").eigenvector - 0.5_f64.sqrt()).abs() < 1e-4);
}

#[test]
fn one_row_per_distinct_endpoint() {
    let rows = rows(
        "Source\tTarget\tWeight\n\
         Ada\tBob\t1\n\
         Bob\tAda\t3\n\
         Cy\tAda\t1\n\
         Cy\tCy\t2\n\
         Dee\tBob\t1\n",
    );
    let names: Vec<_> = rows.iter().map(|r| r.names.as_str()).collect();
    assert_eq!(names, ["Ada", "Bob", "Cy", "Dee"]);
}

#[test]
fn self_loop_degree_counts_twice() {
    let rows = rows("Source\tTarget\tWeight\nA\tA\t1\nA\tB\t1\nB\tC\t1\n");
    assert_eq!(row(&rows, "A").degrees, 3);
    assert_eq!(row(&rows, "B").degrees, 2);
}

#[test]
fn barbell_bridge_nodes_dominate_betweenness() {
    // Two triangles joined by the edge C - D.
    let rows = rows(
        "Source\tTarget\tWeight\n\
         A\tB\t1\nB\tC\t1\nC\tA\t1\n\
         C\tD\t1\n\
         D\tE\t1\nE\tF\t1\nF\tD\t1\n",
    );

    // C lies on every {A,B} × {D,E,F} path: 6 of the C(5,2) = 10 pairs.
    assert!((row(&rows, "C").betweenness - 0.6).abs() < 1e-12);
    assert!((row(&rows, "D").betweenness - 0.6).abs() < 1e-12);
    assert!(row(&rows, "A").betweenness.abs() < 1e-12);

    let c = row(&rows, "C").eigenvector;
    let a = row(&rows, "A").eigenvector;
    assert!(c > a, "bridge endpoint should outrank triangle corner");
}

#[test]
fn weighted_opt_in_changes_betweenness_only_when_asked() {
    let g = load(
        "Source\tTarget\tWeight\n\
         A\tB\t1\nB\tC\t1\nA\tC\t5\n",
    );

    let plain = compute_metrics(&g, &MetricsConfig::default()).expect("metrics");
    assert!(plain.iter().all(|r| r.betweenness.abs() < 1e-12));

    let weighted = compute_metrics(
        &g,
        &MetricsConfig {
            weighted: true,
            ..MetricsConfig::default()
        },
    )
    .expect("metrics");
    assert!((row(&weighted, "B").betweenness - 1.0).abs() < 1e-12);
}

#[test]
fn written_table_matches_expected_text() {
    let rows = rows("Source\tTarget\tWeight\nA\tB\t1\n");
    let mut buf = Vec::new();
    write_metrics(&rows, &mut buf).expect("write");
    let text = String::from_utf8(buf).expect("utf8");

    // Two nodes: no pair to bridge, equal eigenvector scores of 1/√2.
    assert_eq!(
        text,
        "names,degrees,betweenness,eigenvector\n\
         A,1,0.0,0.7071067811865476\n\
         B,1,0.0,0.7071067811865476\n"
    );
}

#[test]
fn empty_weight_cell_does_not_affect_default_metrics() {
    let gaps = rows("Source\tTarget\tWeight\nA\tB\t\nB\tC\t2\n");
    let full = rows("Source\tTarget\tWeight\nA\tB\t1\nB\tC\t2\n");
    assert_eq!(gaps, full);
}
