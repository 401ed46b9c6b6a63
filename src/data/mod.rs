//! Matrix loading module

pub mod json;
pub mod matrix;
pub mod tabular;

use std::path::Path;

use crate::error::{GraphError, Result};

pub use matrix::{BinaryMatrix, CellPolicy, CellValue};

/// Options shared by every matrix loader
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Column whose values are the item indices (keyed formats only)
    pub item_column: Option<String>,

    /// Handling of cells that are neither 0 nor 1
    pub cell_policy: CellPolicy,
}

/// Load a matrix, choosing the decoder by file extension
pub fn load_matrix(path: &Path, options: &LoadOptions) -> Result<BinaryMatrix> {
    if !path.exists() {
        return Err(GraphError::DataSupply(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let matrix = match extension.as_deref() {
        Some("json") => json::load_json_matrix(path, options)?,
        Some("csv") => tabular::load_csv_matrix(path, options)?,
        Some("parquet") => tabular::load_parquet_matrix(path, options)?,
        _ => {
            return Err(GraphError::DataSupply(format!(
                "Unsupported input format: {}",
                path.display()
            )))
        }
    };

    log::info!(
        "Loaded matrix with {} items and {} members",
        matrix.item_count(),
        matrix.member_count()
    );

    Ok(matrix)
}

/// Interpret a cell as a positive item index
pub(crate) fn parse_item_index(value: &CellValue) -> Option<u32> {
    match value {
        CellValue::Int(i) => u32::try_from(*i).ok().filter(|&v| v > 0),
        CellValue::Float(f) if f.fract() == 0.0 && *f >= 1.0 && *f <= u32::MAX as f64 => {
            Some(*f as u32)
        }
        CellValue::Text(s) => s.trim().parse::<u32>().ok().filter(|&v| v > 0),
        _ => None,
    }
}
