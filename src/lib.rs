//! Co-occurrence group graphs from binary membership matrices

pub mod cache;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod graph;
pub mod group;
pub mod storage;
pub mod viz;

pub use config::Config;
pub use data::{load_matrix, BinaryMatrix, CellPolicy, LoadOptions};
pub use engine::{analyze, build_group_graph, Analysis};
pub use error::{GraphError, Result};
pub use graph::GraphPayload;
