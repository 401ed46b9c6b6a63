//! Serializable `{nodes, links}` payload handed to the presentation layer

use serde::{Deserialize, Serialize};

/// Node entry: `{id, size, numbers}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub size: u32,
    pub numbers: Vec<u32>,
}

/// Link entry: `{source, target, weight}`, endpoints are node ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub source: String,
    pub target: String,
    pub weight: u32,
}

/// Complete graph payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphPayload {
    pub nodes: Vec<NodeRecord>,
    pub links: Vec<LinkRecord>,
}

impl GraphPayload {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    /// Node index sets, sorted, for comparing graphs independent of numbering
    pub fn number_multiset(&self) -> Vec<Vec<u32>> {
        let mut sets: Vec<Vec<u32>> = self.nodes.iter().map(|n| n.numbers.clone()).collect();
        sets.sort();
        sets
    }

    /// Edge weights, sorted
    pub fn weight_multiset(&self) -> Vec<u32> {
        let mut weights: Vec<u32> = self.links.iter().map(|l| l.weight).collect();
        weights.sort_unstable();
        weights
    }
}
