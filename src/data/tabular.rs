//! CSV and Parquet matrix loading

use std::path::Path;

use polars::prelude::*;

use crate::data::matrix::{BinaryMatrix, CellValue};
use crate::data::{parse_item_index, LoadOptions};
use crate::error::{GraphError, Result};

/// Load a CSV file with a header row of member labels
pub fn load_csv_matrix(path: &Path, options: &LoadOptions) -> Result<BinaryMatrix> {
    log::info!("Reading CSV matrix: {}", path.display());

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    frame_to_matrix(&df, options)
}

/// Load a Parquet file with one column per member
pub fn load_parquet_matrix(path: &Path, options: &LoadOptions) -> Result<BinaryMatrix> {
    log::info!("Reading parquet matrix: {}", path.display());

    let df = LazyFrame::scan_parquet(path, Default::default())?.collect()?;

    frame_to_matrix(&df, options)
}

/// Convert a data frame into a matrix; every column but the item column is a member
pub fn frame_to_matrix(df: &DataFrame, options: &LoadOptions) -> Result<BinaryMatrix> {
    log::debug!("Frame schema: {:?}", df.schema());

    let height = df.height();
    let item_key = options.item_column.as_deref();

    let mut members = Vec::with_capacity(df.width());
    let mut columns: Vec<Vec<CellValue>> = Vec::with_capacity(df.width());
    let mut items = None;

    for column in df.get_columns() {
        let name = column.name().to_string();
        let values = column_values(column)?;

        if Some(name.as_str()) == item_key {
            let parsed = values
                .iter()
                .enumerate()
                .map(|(r, raw)| {
                    parse_item_index(raw).ok_or_else(|| {
                        GraphError::malformed(format!(
                            "row {} has invalid item index {:?}",
                            r + 1,
                            raw
                        ))
                    })
                })
                .collect::<Result<Vec<u32>>>()?;
            items = Some(parsed);
        } else {
            members.push(name);
            columns.push(values);
        }
    }

    if let (Some(key), None) = (item_key, items.as_ref()) {
        return Err(GraphError::malformed(format!("item column '{}' not found", key)));
    }

    // Transpose column-major frame data into rows
    let mut rows: Vec<Vec<CellValue>> = (0..height)
        .map(|_| Vec::with_capacity(members.len()))
        .collect();
    for column in columns {
        for (row, value) in rows.iter_mut().zip(column) {
            row.push(value);
        }
    }

    BinaryMatrix::from_cells(rows, members, items, options.cell_policy)
}

fn column_values(column: &Column) -> Result<Vec<CellValue>> {
    let dtype = column.dtype().clone();

    let values = match dtype {
        DataType::Boolean => column
            .bool()?
            .into_iter()
            .map(|v| v.map_or(CellValue::Missing, CellValue::Bool))
            .collect(),
        DataType::String => column
            .str()?
            .into_iter()
            .map(|v| v.map_or(CellValue::Missing, |s| CellValue::Text(s.to_string())))
            .collect(),
        ref dt if dt.is_integer() => column
            .cast(&DataType::Int64)?
            .i64()?
            .into_iter()
            .map(|v| v.map_or(CellValue::Missing, CellValue::Int))
            .collect(),
        ref dt if dt.is_float() => column
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .map(|v| v.map_or(CellValue::Missing, CellValue::Float))
            .collect(),
        other => {
            log::debug!("Column '{}' has unsupported type {}", column.name(), other);
            vec![CellValue::Text(other.to_string()); column.len()]
        }
    };

    Ok(values)
}
