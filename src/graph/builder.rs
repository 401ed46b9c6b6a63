//! Group graph construction

use itertools::Itertools;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rayon::prelude::*;

use crate::config::Config;
use crate::graph::node::GraphNode;
use crate::graph::payload::{GraphPayload, LinkRecord, NodeRecord};
use crate::group::{sorted_overlap, Group};

/// Undirected weighted graph of groups; edge weight is the shared item count
#[derive(Debug, Clone)]
pub struct GroupGraph {
    graph: UnGraph<GraphNode, u32>,
}

impl GroupGraph {
    /// Materialize nodes in group order, then connect every overlapping pair
    pub fn from_groups(groups: &[Group], config: &Config) -> Self {
        let mut graph = UnGraph::with_capacity(groups.len(), 0);
        for (i, group) in groups.iter().enumerate() {
            graph.add_node(GraphNode::from_group(i + 1, group, config));
        }

        let edges = if groups.len() >= config.parallel_threshold {
            overlapping_pairs_parallel(&graph)
        } else {
            overlapping_pairs(&graph)
        };
        for (a, b, weight) in edges {
            graph.add_edge(a, b, weight);
        }

        log::info!(
            "Built group graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Self { graph }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes in numbering order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> + '_ {
        self.graph.node_indices().map(move |i| &self.graph[i])
    }

    /// Edges as `(source, target, weight)` in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&GraphNode, &GraphNode, u32)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (&self.graph[e.source()], &self.graph[e.target()], *e.weight()))
    }

    /// Underlying petgraph structure
    pub fn inner(&self) -> &UnGraph<GraphNode, u32> {
        &self.graph
    }

    /// Convert into the `{nodes, links}` payload
    pub fn to_payload(&self) -> GraphPayload {
        let nodes = self
            .nodes()
            .map(|n| NodeRecord {
                id: n.name.clone(),
                size: n.size,
                numbers: n.numbers.clone(),
            })
            .collect();

        let links = self
            .edges()
            .map(|(source, target, weight)| LinkRecord {
                source: source.name.clone(),
                target: target.name.clone(),
                weight,
            })
            .collect();

        GraphPayload { nodes, links }
    }
}

fn overlapping_pairs(graph: &UnGraph<GraphNode, u32>) -> Vec<(NodeIndex, NodeIndex, u32)> {
    (0..graph.node_count())
        .map(NodeIndex::new)
        .tuple_combinations()
        .filter_map(|(a, b)| {
            let shared = sorted_overlap(&graph[a].numbers, &graph[b].numbers);
            (shared > 0).then_some((a, b, shared as u32))
        })
        .collect()
}

fn overlapping_pairs_parallel(graph: &UnGraph<GraphNode, u32>) -> Vec<(NodeIndex, NodeIndex, u32)> {
    let count = graph.node_count();
    let rows: Vec<Vec<(NodeIndex, NodeIndex, u32)>> = (0..count)
        .into_par_iter()
        .map(|a| {
            let a = NodeIndex::new(a);
            ((a.index() + 1)..count)
                .map(NodeIndex::new)
                .filter_map(|b| {
                    let shared = sorted_overlap(&graph[a].numbers, &graph[b].numbers);
                    (shared > 0).then_some((a, b, shared as u32))
                })
                .collect()
        })
        .collect();

    rows.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::Signature;

    fn group(items: &[u32]) -> Group {
        Group::new(Signature::new(items.to_vec()))
    }

    #[test]
    fn single_group_has_no_edges() {
        let g = GroupGraph::from_groups(&[group(&[1, 2])], &Config::default());
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn edges_connect_overlapping_groups_with_shared_count() {
        let groups = vec![group(&[1, 2, 3]), group(&[2, 3]), group(&[4, 5]), group(&[3, 4])];
        let payload = GroupGraph::from_groups(&groups, &Config::default()).to_payload();

        let links: Vec<(&str, &str, u32)> = payload
            .links
            .iter()
            .map(|l| (l.source.as_str(), l.target.as_str(), l.weight))
            .collect();
        assert_eq!(
            links,
            vec![
                ("Group 1", "Group 2", 2),
                ("Group 1", "Group 4", 1),
                ("Group 2", "Group 4", 1),
                ("Group 3", "Group 4", 1),
            ]
        );
        assert_eq!(payload.nodes[0].size, 11);
        assert_eq!(payload.nodes[2].numbers, vec![4, 5]);
    }

    #[test]
    fn parallel_edge_scan_matches_sequential() {
        let groups = vec![
            group(&[1, 2, 3]),
            group(&[2, 3]),
            group(&[4, 5]),
            group(&[3, 4]),
            group(&[1, 5, 9]),
        ];
        let sequential = GroupGraph::from_groups(&groups, &Config::default()).to_payload();
        let mut config = Config::default();
        config.parallel_threshold = 1;
        let parallel = GroupGraph::from_groups(&groups, &config).to_payload();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn no_groups_no_graph() {
        let g = GroupGraph::from_groups(&[], &Config::default());
        assert!(g.to_payload().is_empty());
    }
}
