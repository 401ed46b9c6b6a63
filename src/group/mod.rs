//! Co-occurrence group discovery module

pub mod collection;
pub mod metrics;
pub mod scan;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use collection::{build_collections, Collections, MemberCollection};
pub use scan::find_groups;

/// Sorted, duplicate-free item indices shared by a set of members.
/// Used as the deduplication key for groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(Vec<u32>);

impl Signature {
    pub fn new(mut items: Vec<u32>) -> Self {
        items.sort_unstable();
        items.dedup();
        Self(items)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A deduplicated co-occurrence cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Shared item indices
    pub signature: Signature,

    /// Column positions of every member that contributed the signature
    pub members: BTreeSet<usize>,
}

impl Group {
    pub fn new(signature: Signature) -> Self {
        Self {
            signature,
            members: BTreeSet::new(),
        }
    }

    /// Resolve member positions to labels, in column order
    pub fn member_labels(&self, labels: &[String]) -> Vec<String> {
        self.members
            .iter()
            .filter_map(|&col| labels.get(col).cloned())
            .collect()
    }
}

/// Intersection of two ascending, duplicate-free slices
pub fn sorted_intersection(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Size of the intersection of two ascending, duplicate-free slices
pub fn sorted_overlap(a: &[u32], b: &[u32]) -> usize {
    let (mut i, mut j, mut count) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_sorted_and_deduplicated() {
        let sig = Signature::new(vec![4, 1, 4, 2]);
        assert_eq!(sig.as_slice(), &[1, 2, 4]);
        assert_eq!(sig.len(), 3);
    }

    #[test]
    fn intersections() {
        assert_eq!(sorted_intersection(&[1, 2, 5, 9], &[2, 3, 9]), vec![2, 9]);
        assert!(sorted_intersection(&[1], &[]).is_empty());
        assert_eq!(sorted_overlap(&[1, 2, 5, 9], &[2, 3, 9]), 2);
        assert_eq!(sorted_overlap(&[1, 3], &[2, 4]), 0);
    }

    #[test]
    fn member_labels_follow_column_order() {
        let labels: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        let mut group = Group::new(Signature::new(vec![1, 2]));
        group.members.extend([2, 0]);
        assert_eq!(group.member_labels(&labels), vec!["A", "C"]);
    }
}
