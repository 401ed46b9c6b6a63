//! Graph node representation for co-occurrence groups

use crate::config::{Config, MIN_SHARED_ITEMS};
use crate::group::Group;

/// One node per distinct group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    /// Display name, `Group N`
    pub name: String,

    /// Shared item indices, ascending
    pub numbers: Vec<u32>,

    /// Rendered size
    pub size: u32,
}

impl GraphNode {
    /// Materialize the node for the `ordinal`-th group (1-based)
    pub fn from_group(ordinal: usize, group: &Group, config: &Config) -> Self {
        Self {
            name: group_name(ordinal),
            numbers: group.signature.as_slice().to_vec(),
            size: node_size(group.signature.len(), config),
        }
    }
}

/// Display label for the `ordinal`-th group
pub fn group_name(ordinal: usize) -> String {
    format!("Group {}", ordinal)
}

/// `base_size + scale * (item_count - 2)`, saturating at `u32::MAX`
pub fn node_size(item_count: usize, config: &Config) -> u32 {
    let extra = u32::try_from(item_count.saturating_sub(MIN_SHARED_ITEMS)).unwrap_or(u32::MAX);
    config.base_size.saturating_add(config.scale.saturating_mul(extra))
}
