//! Binary membership matrix

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use ndarray::{Array2, ArrayView1};

use crate::error::{GraphError, Result};

/// A raw cell as decoded by a loader, before the cell policy is applied
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Missing,
}

impl CellValue {
    /// Numeric equality with 1 (booleans count as 0/1)
    pub fn is_one(&self) -> bool {
        match self {
            CellValue::Int(v) => *v == 1,
            CellValue::Float(v) => *v == 1.0,
            CellValue::Bool(v) => *v,
            CellValue::Text(_) | CellValue::Missing => false,
        }
    }

    /// Numeric equality with 0 (booleans count as 0/1)
    pub fn is_zero(&self) -> bool {
        match self {
            CellValue::Int(v) => *v == 0,
            CellValue::Float(v) => *v == 0.0,
            CellValue::Bool(v) => !*v,
            CellValue::Text(_) | CellValue::Missing => false,
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

/// Policy for cells that are neither 0 nor 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellPolicy {
    /// Anything that is not numerically 1 counts as absent
    #[default]
    Permissive,

    /// Anything that is not 0 or 1 is rejected as malformed input
    Strict,
}

impl CellPolicy {
    /// Resolve a raw cell to 0/1 under this policy
    pub fn resolve(&self, value: &CellValue, row: usize, col: usize) -> Result<u8> {
        if value.is_one() {
            return Ok(1);
        }
        match self {
            CellPolicy::Permissive => Ok(0),
            CellPolicy::Strict if value.is_zero() => Ok(0),
            CellPolicy::Strict => Err(GraphError::malformed(format!(
                "non-binary cell {:?} at row {}, column {}",
                value,
                row + 1,
                col + 1
            ))),
        }
    }
}

/// Rectangular 0/1 matrix: rows are items, columns are members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMatrix {
    cells: Array2<u8>,
    members: Vec<String>,
    items: Vec<u32>,
}

impl BinaryMatrix {
    /// Build a matrix from decoded cells, labels and optional item indices.
    ///
    /// Without explicit item indices, row `r` is item `r + 1`.
    pub fn from_cells(
        rows: Vec<Vec<CellValue>>,
        members: Vec<String>,
        items: Option<Vec<u32>>,
        policy: CellPolicy,
    ) -> Result<Self> {
        let width = members.len();
        let height = rows.len();

        let mut seen = HashSet::with_capacity(width);
        for label in &members {
            if label.is_empty() {
                return Err(GraphError::malformed("empty member label"));
            }
            if !seen.insert(label.as_str()) {
                return Err(GraphError::malformed(format!(
                    "duplicate member label '{}'",
                    label
                )));
            }
        }

        let items = match items {
            Some(items) => {
                validate_items(&items, height)?;
                items
            }
            None => (1..=height as u32).collect(),
        };

        let mut flat = Vec::with_capacity(width * height);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GraphError::malformed(format!(
                    "row {} has {} cells, expected {}",
                    r + 1,
                    row.len(),
                    width
                )));
            }
            for (c, value) in row.iter().enumerate() {
                flat.push(policy.resolve(value, r, c)?);
            }
        }

        let cells = Array2::from_shape_vec((height, width), flat)
            .map_err(|e| GraphError::malformed(e.to_string()))?;

        Ok(Self { cells, members, items })
    }

    /// Build from integer rows, labelling members `1..=n` by column position
    pub fn from_rows(rows: Vec<Vec<i64>>, policy: CellPolicy) -> Result<Self> {
        let width = rows.first().map_or(0, |r| r.len());
        let members = (1..=width).map(|c| c.to_string()).collect();
        Self::from_labeled_rows(rows, members, policy)
    }

    /// Build from integer rows with explicit member labels
    pub fn from_labeled_rows(
        rows: Vec<Vec<i64>>,
        members: Vec<String>,
        policy: CellPolicy,
    ) -> Result<Self> {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(CellValue::Int).collect())
            .collect();
        Self::from_cells(rows, members, None, policy)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Member labels in column order
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Item indices in row order
    pub fn items(&self) -> &[u32] {
        &self.items
    }

    /// True when the cell at (row, col) is 1
    pub fn is_set(&self, row: usize, col: usize) -> bool {
        self.cells[[row, col]] == 1
    }

    /// Cells of one member column
    pub fn column(&self, col: usize) -> ArrayView1<'_, u8> {
        self.cells.column(col)
    }

    /// Stable content hash of labels, item indices and cells
    pub fn fingerprint<H: Hasher>(&self, state: &mut H) {
        self.members.hash(state);
        self.items.hash(state);
        self.cells.shape().hash(state);
        for cell in self.cells.iter() {
            cell.hash(state);
        }
    }
}

fn validate_items(items: &[u32], height: usize) -> Result<()> {
    if items.len() != height {
        return Err(GraphError::malformed(format!(
            "{} item indices supplied for {} rows",
            items.len(),
            height
        )));
    }
    let mut seen = HashSet::with_capacity(items.len());
    for &item in items {
        if item == 0 {
            return Err(GraphError::malformed("item indices must be 1 or greater"));
        }
        if !seen.insert(item) {
            return Err(GraphError::malformed(format!(
                "duplicate item index {}",
                item
            )));
        }
    }
    Ok(())
}
