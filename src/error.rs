//! Error types for group graph construction

use thiserror::Error;

/// Errors surfaced while loading a matrix or building a group graph
#[derive(Debug, Error)]
pub enum GraphError {
    /// The source matrix could not be loaded or parsed
    #[error("data supply error: {0}")]
    DataSupply(String),

    /// Non-rectangular matrix, missing or duplicate labels, bad item indices
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Invalid configuration values
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O failure while reading source data
    #[error("data supply error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding failure
    #[error("data supply error: {0}")]
    Json(#[from] serde_json::Error),

    /// Table decoding failure
    #[error("data supply error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}

impl GraphError {
    /// Whether this error belongs to the data-supply class
    pub fn is_data_supply(&self) -> bool {
        matches!(
            self,
            GraphError::DataSupply(_) | GraphError::Io(_) | GraphError::Json(_) | GraphError::Polars(_)
        )
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        GraphError::MalformedInput(msg.into())
    }
}

/// Result type for graph operations
pub type Result<T> = std::result::Result<T, GraphError>;
