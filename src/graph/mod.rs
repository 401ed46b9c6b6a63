//! Group graph representation module

pub mod builder;
pub mod node;
pub mod payload;

pub use builder::GroupGraph;
pub use node::GraphNode;
pub use payload::{GraphPayload, LinkRecord, NodeRecord};
