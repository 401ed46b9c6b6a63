//! Member collections: the item indices each member is associated with

use crate::data::BinaryMatrix;

/// One member's collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberCollection {
    /// Column position of the member in the source matrix
    pub column: usize,

    /// Member label
    pub member: String,

    /// Associated item indices, ascending
    pub items: Vec<u32>,
}

/// Member collections in column order. Members without any set cell are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collections {
    entries: Vec<MemberCollection>,
}

impl Collections {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MemberCollection> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[MemberCollection] {
        &self.entries
    }

    /// Item indices for a member label
    pub fn get(&self, member: &str) -> Option<&[u32]> {
        self.entries
            .iter()
            .find(|c| c.member == member)
            .map(|c| c.items.as_slice())
    }
}

/// Build the member → item-index mapping from a matrix
pub fn build_collections(matrix: &BinaryMatrix) -> Collections {
    let items = matrix.items();
    let mut entries = Vec::with_capacity(matrix.member_count());

    for (col, member) in matrix.members().iter().enumerate() {
        let mut indices: Vec<u32> = matrix
            .column(col)
            .iter()
            .zip(items)
            .filter(|(&cell, _)| cell == 1)
            .map(|(_, &item)| item)
            .collect();

        if indices.is_empty() {
            continue;
        }
        // Explicit item indices need not be in row order
        indices.sort_unstable();

        entries.push(MemberCollection {
            column: col,
            member: member.clone(),
            items: indices,
        });
    }

    log::debug!(
        "Built {} collections from {} members",
        entries.len(),
        matrix.member_count()
    );

    Collections { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CellPolicy, CellValue};

    #[test]
    fn collects_one_based_rows_per_member() {
        // Rows are items, columns are members A and B
        let m = BinaryMatrix::from_labeled_rows(
            vec![vec![1, 1], vec![1, 1], vec![0, 1]],
            vec!["A".to_string(), "B".to_string()],
            CellPolicy::Strict,
        )
        .unwrap();
        let c = build_collections(&m);
        assert_eq!(c.len(), 2);
        assert_eq!(c.get("A"), Some(&[1, 2][..]));
        assert_eq!(c.get("B"), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn members_without_items_are_absent() {
        let m = BinaryMatrix::from_rows(vec![vec![0, 1], vec![0, 1]], CellPolicy::Strict).unwrap();
        let c = build_collections(&m);
        assert_eq!(c.len(), 1);
        assert!(c.get("1").is_none());
        assert_eq!(c.as_slice()[0].column, 1);
    }

    #[test]
    fn explicit_item_indices_are_sorted() {
        let rows = vec![vec![CellValue::Int(1)], vec![CellValue::Int(1)]];
        let m = BinaryMatrix::from_cells(
            rows,
            vec!["A".to_string()],
            Some(vec![30, 4]),
            CellPolicy::Permissive,
        )
        .unwrap();
        assert_eq!(build_collections(&m).get("A"), Some(&[4, 30][..]));
    }
}
