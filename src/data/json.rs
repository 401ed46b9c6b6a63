//! JSON matrix loading
//!
//! Two layouts are accepted:
//!
//! - an array of rows, `[[0, 1], [1, 1]]`, whose members are labelled by
//!   1-based column position;
//! - an array of records, `[{"A": 1, "B": 0}, ...]`, as written by a
//!   spreadsheet export. Member labels are the keys of the first record.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::data::matrix::{BinaryMatrix, CellValue};
use crate::data::{parse_item_index, LoadOptions};
use crate::error::{GraphError, Result};

/// Load a JSON matrix file
pub fn load_json_matrix(path: &Path, options: &LoadOptions) -> Result<BinaryMatrix> {
    log::info!("Reading JSON matrix: {}", path.display());

    let text = fs::read_to_string(path)
        .map_err(|e| GraphError::DataSupply(format!("{}: {}", path.display(), e)))?;
    let value: Value = serde_json::from_str(&text)?;

    parse_json_matrix(value, options)
}

/// Convert an already-decoded JSON document into a matrix
pub fn parse_json_matrix(value: Value, options: &LoadOptions) -> Result<BinaryMatrix> {
    let rows = match value {
        Value::Array(rows) => rows,
        other => {
            return Err(GraphError::malformed(format!(
                "expected a top-level array, found {}",
                kind(&other)
            )))
        }
    };

    match rows.first() {
        None => BinaryMatrix::from_cells(Vec::new(), Vec::new(), None, options.cell_policy),
        Some(Value::Array(_)) => from_row_arrays(rows, options),
        Some(Value::Object(first)) => {
            let keys: Vec<String> = first.keys().cloned().collect();
            from_records(rows, keys, options)
        }
        Some(other) => Err(GraphError::malformed(format!(
            "expected rows to be arrays or objects, found {}",
            kind(other)
        ))),
    }
}

fn from_row_arrays(rows: Vec<Value>, options: &LoadOptions) -> Result<BinaryMatrix> {
    if let Some(column) = &options.item_column {
        return Err(GraphError::malformed(format!(
            "item column '{}' requires keyed records",
            column
        )));
    }

    let mut cells = Vec::with_capacity(rows.len());
    for (r, row) in rows.into_iter().enumerate() {
        match row {
            Value::Array(values) => cells.push(values.iter().map(cell_value).collect::<Vec<_>>()),
            other => {
                return Err(GraphError::malformed(format!(
                    "row {} is {}, expected an array",
                    r + 1,
                    kind(&other)
                )))
            }
        }
    }

    let width = cells.first().map_or(0, |r| r.len());
    let members = (1..=width).map(|c| c.to_string()).collect();
    BinaryMatrix::from_cells(cells, members, None, options.cell_policy)
}

fn from_records(rows: Vec<Value>, keys: Vec<String>, options: &LoadOptions) -> Result<BinaryMatrix> {
    let item_key = options.item_column.as_deref();
    if let Some(key) = item_key {
        if !keys.iter().any(|k| k == key) {
            return Err(GraphError::malformed(format!("item column '{}' not found", key)));
        }
    }
    let members: Vec<String> = keys
        .iter()
        .filter(|k| Some(k.as_str()) != item_key)
        .cloned()
        .collect();

    let mut cells = Vec::with_capacity(rows.len());
    let mut items = item_key.map(|_| Vec::with_capacity(rows.len()));

    for (r, row) in rows.iter().enumerate() {
        let record = as_record(row, r)?;
        if record.len() != keys.len() {
            return Err(GraphError::malformed(format!(
                "row {} has {} fields, expected {}",
                r + 1,
                record.len(),
                keys.len()
            )));
        }

        let mut line = Vec::with_capacity(members.len());
        for member in &members {
            let value = record.get(member).ok_or_else(|| {
                GraphError::malformed(format!("row {} is missing column '{}'", r + 1, member))
            })?;
            line.push(cell_value(value));
        }
        cells.push(line);

        if let (Some(key), Some(items)) = (item_key, items.as_mut()) {
            let raw = record.get(key).map(cell_value).unwrap_or(CellValue::Missing);
            let index = parse_item_index(&raw).ok_or_else(|| {
                GraphError::malformed(format!("row {} has invalid item index {:?}", r + 1, raw))
            })?;
            items.push(index);
        }
    }

    BinaryMatrix::from_cells(cells, members, items, options.cell_policy)
}

fn as_record(row: &Value, r: usize) -> Result<&Map<String, Value>> {
    row.as_object().ok_or_else(|| {
        GraphError::malformed(format!("row {} is {}, expected an object", r + 1, kind(row)))
    })
}

fn cell_value(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Missing,
        Value::Bool(b) => CellValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => CellValue::Int(i),
            None => n.as_f64().map_or(CellValue::Missing, CellValue::Float),
        },
        Value::String(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CellPolicy;
    use serde_json::json;

    #[test]
    fn parses_row_arrays() {
        let m = parse_json_matrix(json!([[1, 0], [1, 1], [0, 1]]), &LoadOptions::default()).unwrap();
        assert_eq!(m.members(), &["1", "2"]);
        assert_eq!(m.items(), &[1, 2, 3]);
        assert!(m.is_set(1, 1));
        assert!(!m.is_set(2, 0));
    }

    #[test]
    fn parses_records_in_key_order() {
        let doc = json!([
            {"Zed": 1, "Amy": 0},
            {"Zed": 1, "Amy": 1.0}
        ]);
        let m = parse_json_matrix(doc, &LoadOptions::default()).unwrap();
        assert_eq!(m.members(), &["Zed", "Amy"]);
        assert!(m.is_set(1, 1));
    }

    #[test]
    fn item_column_supplies_indices() {
        let doc = json!([
            {"Number": 5, "A": 1, "B": 1},
            {"Number": "9", "A": 1, "B": 0}
        ]);
        let options = LoadOptions {
            item_column: Some("Number".to_string()),
            ..LoadOptions::default()
        };
        let m = parse_json_matrix(doc, &options).unwrap();
        assert_eq!(m.members(), &["A", "B"]);
        assert_eq!(m.items(), &[5, 9]);
    }

    #[test]
    fn missing_item_column_is_malformed() {
        let options = LoadOptions {
            item_column: Some("Number".to_string()),
            ..LoadOptions::default()
        };
        let err = parse_json_matrix(json!([{"A": 1}]), &options).unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput(_)));
    }

    #[test]
    fn inconsistent_records_are_malformed() {
        let doc = json!([{"A": 1, "B": 0}, {"A": 1, "C": 1}]);
        let err = parse_json_matrix(doc, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput(_)));

        let doc = json!([{"A": 1, "B": 0}, {"A": 1}]);
        assert!(parse_json_matrix(doc, &LoadOptions::default()).is_err());
    }

    #[test]
    fn non_array_document_is_malformed() {
        let err = parse_json_matrix(json!({"rows": []}), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput(_)));
    }

    #[test]
    fn strict_policy_applies_to_json_cells() {
        let options = LoadOptions {
            cell_policy: CellPolicy::Strict,
            ..LoadOptions::default()
        };
        assert!(parse_json_matrix(json!([[1, "x"]]), &options).is_err());
        assert!(parse_json_matrix(json!([[1, true, 0]]), &options).is_ok());
    }
}
