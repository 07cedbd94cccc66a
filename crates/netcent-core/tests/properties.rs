//! Property tests over random edge lists.

use std::collections::BTreeSet;

use netcent_core::config::MetricsConfig;
use netcent_core::graph::{EdgeGraph, EdgeRecord};
use netcent_core::metrics::compute_metrics;
use proptest::prelude::*;

fn name(i: usize) -> String {
    format!("n{i}")
}

/// Arbitrary edge lists over up to 12 node names, self-loops and repeats allowed.
fn edge_lists() -> impl Strategy<Value = Vec<(usize, usize, u8)>> {
    prop::collection::vec((0usize..12, 0usize..12, 1u8..10), 1..40)
}

/// Connected graphs: a random spanning tree plus extra random edges.
fn connected_edge_lists() -> impl Strategy<Value = Vec<(usize, usize)>> {
    (2usize..12)
        .prop_flat_map(|n| {
            let parents: Vec<_> = (1..n).map(|i| 0..i).collect();
            let extra = prop::collection::vec((0..n, 0..n), 0..15);
            (parents, extra)
        })
        .prop_map(|(parents, extra)| {
            parents
                .into_iter()
                .enumerate()
                .map(|(i, p)| (i + 1, p))
                .chain(extra)
                .collect()
        })
}

fn build(edges: &[(usize, usize, u8)]) -> EdgeGraph {
    EdgeGraph::from_edges(
        edges
            .iter()
            .map(|&(a, b, w)| EdgeRecord::new(name(a), name(b), f64::from(w))),
    )
}

proptest! {
    #[test]
    fn one_row_per_distinct_node(edges in edge_lists()) {
        let g = build(&edges);
        let expected: BTreeSet<String> = edges
            .iter()
            .flat_map(|&(a, b, _)| [name(a), name(b)])
            .collect();

        // Centrality may fail to converge on odd inputs; row identity is the
        // property under test, so only check tables that were produced.
        if let Ok(rows) = compute_metrics(&g, &MetricsConfig::default()) {
            prop_assert_eq!(rows.len(), expected.len());
            let names: BTreeSet<String> = rows.into_iter().map(|r| r.names).collect();
            prop_assert_eq!(names, expected);
        }
    }

    #[test]
    fn degree_sum_is_twice_edge_count(edges in edge_lists()) {
        let g = build(&edges);
        let total: usize = netcent_core::metrics::basic::degrees(&g).iter().sum();
        prop_assert_eq!(total, 2 * g.edge_count());
    }

    #[test]
    fn betweenness_in_unit_interval_when_connected(edges in connected_edge_lists()) {
        let g = EdgeGraph::from_edges(
            edges.iter().map(|&(a, b)| EdgeRecord::new(name(a), name(b), 1.0)),
        );
        for weighted in [false, true] {
            let bc = netcent_core::metrics::betweenness::betweenness_centrality(&g, weighted);
            for score in bc {
                prop_assert!((-1e-12..=1.0 + 1e-12).contains(&score), "score {}", score);
            }
        }
    }

    #[test]
    fn metrics_are_deterministic(edges in connected_edge_lists()) {
        let g = EdgeGraph::from_edges(
            edges.iter().map(|&(a, b)| EdgeRecord::new(name(a), name(b), 1.0)),
        );
        let first = compute_metrics(&g, &MetricsConfig::default());
        let second = compute_metrics(&g, &MetricsConfig::default());
        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
            _ => prop_assert!(false, "runs disagree on success"),
        }
    }
}
