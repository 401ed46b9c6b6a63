//! End-to-end derivation: matrix → collections → groups → graph → payload

use crate::config::Config;
use crate::data::BinaryMatrix;
use crate::error::Result;
use crate::graph::{GraphPayload, GroupGraph};
use crate::group::metrics::{calculate_summary, GraphSummary};
use crate::group::{build_collections, find_groups, Collections, Group};

/// Every intermediate of one run, for callers that need more than the payload
#[derive(Debug, Clone)]
pub struct Analysis {
    pub collections: Collections,
    pub groups: Vec<Group>,
    pub graph: GroupGraph,
}

impl Analysis {
    pub fn payload(&self) -> GraphPayload {
        self.graph.to_payload()
    }

    pub fn summary(&self, matrix: &BinaryMatrix) -> GraphSummary {
        calculate_summary(matrix, &self.collections, &self.groups, &self.graph)
    }
}

/// Run the full pipeline and keep the intermediates
pub fn analyze(matrix: &BinaryMatrix, config: &Config) -> Result<Analysis> {
    config.validate()?;

    log::info!(
        "Deriving group graph from {} items x {} members",
        matrix.item_count(),
        matrix.member_count()
    );

    let collections = build_collections(matrix);
    let groups = find_groups(&collections, config);
    let graph = GroupGraph::from_groups(&groups, config);

    Ok(Analysis {
        collections,
        groups,
        graph,
    })
}

/// Build the `{nodes, links}` payload for a matrix
pub fn build_group_graph(matrix: &BinaryMatrix, config: &Config) -> Result<GraphPayload> {
    analyze(matrix, config).map(|analysis| analysis.payload())
}
