//! Group and graph statistics

use petgraph::algo::connected_components;
use serde::Serialize;
use statrs::statistics::Statistics;

use crate::data::BinaryMatrix;
use crate::graph::GroupGraph;
use crate::group::{Collections, Group};

/// Summary statistics for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSummary {
    pub member_count: usize,
    pub item_count: usize,
    pub collection_count: usize,
    pub group_count: usize,
    pub edge_count: usize,
    pub component_count: usize,
    pub largest_group_members: usize,
    pub avg_signature_len: f64,
    pub std_dev_signature_len: f64,
    pub avg_edge_weight: f64,
    pub max_edge_weight: u32,
}

/// Calculate summary statistics over the groups and their graph
pub fn calculate_summary(
    matrix: &BinaryMatrix,
    collections: &Collections,
    groups: &[Group],
    graph: &GroupGraph,
) -> GraphSummary {
    let signature_lens: Vec<f64> = groups.iter().map(|g| g.signature.len() as f64).collect();
    let weights: Vec<f64> = graph.edges().map(|(_, _, w)| f64::from(w)).collect();

    GraphSummary {
        member_count: matrix.member_count(),
        item_count: matrix.item_count(),
        collection_count: collections.len(),
        group_count: groups.len(),
        edge_count: graph.edge_count(),
        component_count: connected_components(graph.inner()),
        largest_group_members: groups.iter().map(|g| g.members.len()).max().unwrap_or(0),
        avg_signature_len: mean_or_zero(&signature_lens),
        std_dev_signature_len: std_dev_or_zero(&signature_lens),
        avg_edge_weight: mean_or_zero(&weights),
        max_edge_weight: graph.edges().map(|(_, _, w)| w).max().unwrap_or(0),
    }
}

// statrs yields NaN for empty input
fn mean_or_zero(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.mean()
    }
}

fn std_dev_or_zero(values: &[f64]) -> f64 {
    if values.len() < 2 {
        0.0
    } else {
        values.std_dev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::data::CellPolicy;
    use crate::group::{build_collections, find_groups};

    #[test]
    fn summary_counts_components_and_weights() {
        // Members 1..=4 over items 1..=5
        let rows = vec![
            vec![1, 1, 1, 0],
            vec![1, 1, 1, 0],
            vec![1, 0, 1, 1],
            vec![0, 0, 0, 1],
            vec![0, 0, 0, 0],
        ];
        let matrix = BinaryMatrix::from_rows(rows, CellPolicy::Strict).unwrap();
        let config = Config::default();
        let collections = build_collections(&matrix);
        let groups = find_groups(&collections, &config);
        let graph = GroupGraph::from_groups(&groups, &config);
        let summary = calculate_summary(&matrix, &collections, &groups, &graph);

        // (1,2) and (2,3) share {1,2}, (1,3) shares {1,2,3}, member 4 only ever shares {3}
        assert_eq!(summary.member_count, 4);
        assert_eq!(summary.item_count, 5);
        assert_eq!(summary.collection_count, 4);
        assert_eq!(summary.group_count, 2);
        assert_eq!(summary.edge_count, 1);
        assert_eq!(summary.component_count, 1);
        assert_eq!(summary.largest_group_members, 3);
        assert_eq!(summary.max_edge_weight, 2);
        assert!((summary.avg_signature_len - 2.5).abs() < 1e-9);
    }

    #[test]
    fn empty_summary_has_zeroes() {
        let matrix = BinaryMatrix::from_rows(vec![vec![1, 0], vec![0, 1]], CellPolicy::Strict).unwrap();
        let config = Config::default();
        let collections = build_collections(&matrix);
        let groups = find_groups(&collections, &config);
        let graph = GroupGraph::from_groups(&groups, &config);
        let summary = calculate_summary(&matrix, &collections, &groups, &graph);
        assert_eq!(summary.group_count, 0);
        assert_eq!(summary.component_count, 0);
        assert_eq!(summary.avg_signature_len, 0.0);
        assert_eq!(summary.avg_edge_weight, 0.0);
    }
}
