//! Pairwise intersection scan
//!
//! Every unordered member pair `(i, j)`, `i < j` in column order, is
//! intersected. Intersections of at least `min_shared_items` indices become
//! signatures; pairs with the same signature collapse into one group whose
//! member set is the union of all contributing pairs. Groups are returned in
//! the order their signature was first seen under that pair order, and the
//! parallel scan reproduces the sequential order exactly.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::config::Config;
use crate::group::collection::Collections;
use crate::group::{sorted_intersection, Group, Signature};

/// Signature → group accumulator preserving first-discovered order
#[derive(Debug, Default)]
struct GroupIndex {
    by_signature: HashMap<Signature, usize>,
    groups: Vec<Group>,
}

impl GroupIndex {
    fn observe(&mut self, signature: Signature, a: usize, b: usize) {
        let slot = match self.by_signature.get(&signature) {
            Some(&slot) => slot,
            None => {
                let slot = self.groups.len();
                self.by_signature.insert(signature.clone(), slot);
                self.groups.push(Group::new(signature));
                slot
            }
        };
        let members = &mut self.groups[slot].members;
        members.insert(a);
        members.insert(b);
    }
}

/// Discover co-occurrence groups, going parallel for large member counts
pub fn find_groups(collections: &Collections, config: &Config) -> Vec<Group> {
    let member_count = collections.len();
    let min_shared = config.min_shared_items;

    let groups = if member_count >= config.parallel_threshold {
        log::info!(
            "Scanning {} member pairs across {} threads",
            member_count * member_count.saturating_sub(1) / 2,
            rayon::current_num_threads()
        );
        find_groups_parallel(collections, min_shared)
    } else {
        log::debug!("Scanning {} members sequentially", member_count);
        find_groups_sequential(collections, min_shared)
    };

    log::info!(
        "Found {} distinct groups among {} members",
        groups.len(),
        member_count
    );

    groups
}

/// Sequential unordered-pair scan
pub fn find_groups_sequential(collections: &Collections, min_shared: usize) -> Vec<Group> {
    let entries = collections.as_slice();
    let mut index = GroupIndex::default();

    for (i, first) in entries.iter().enumerate() {
        for second in &entries[i + 1..] {
            let shared = sorted_intersection(&first.items, &second.items);
            if shared.len() >= min_shared {
                index.observe(Signature::new(shared), first.column, second.column);
            }
        }
    }

    index.groups
}

/// Parallel scan: each worker handles one row of the pair triangle, then
/// the rows are merged in order so numbering matches the sequential scan
pub fn find_groups_parallel(collections: &Collections, min_shared: usize) -> Vec<Group> {
    let entries = collections.as_slice();

    let rows: Vec<Vec<(Signature, usize, usize)>> = (0..entries.len())
        .into_par_iter()
        .map(|i| {
            let first = &entries[i];
            entries[i + 1..]
                .iter()
                .filter_map(|second| {
                    let shared = sorted_intersection(&first.items, &second.items);
                    (shared.len() >= min_shared)
                        .then(|| (Signature::new(shared), first.column, second.column))
                })
                .collect()
        })
        .collect();

    let mut index = GroupIndex::default();
    for (signature, a, b) in rows.into_iter().flatten() {
        index.observe(signature, a, b);
    }

    index.groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{BinaryMatrix, CellPolicy};
    use crate::group::build_collections;

    /// Build collections from per-member item lists over `items` rows
    fn collections_of(members: Vec<(&str, Vec<u32>)>, items: u32) -> Collections {
        let rows = (1..=items)
            .map(|item| {
                members
                    .iter()
                    .map(|(_, set)| i64::from(set.contains(&item)))
                    .collect()
            })
            .collect();
        let labels = members.iter().map(|(name, _)| name.to_string()).collect();
        let matrix = BinaryMatrix::from_labeled_rows(rows, labels, CellPolicy::Strict).unwrap();
        build_collections(&matrix)
    }

    #[test]
    fn single_pair_forms_one_group() {
        let c = collections_of(vec![("A", vec![1, 2]), ("B", vec![1, 2, 3])], 3);
        let groups = find_groups_sequential(&c, 2);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].signature.as_slice(), &[1, 2]);
        assert_eq!(groups[0].members.iter().copied().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn identical_signatures_collapse_with_unioned_members() {
        let c = collections_of(vec![("A", vec![1, 2]), ("B", vec![1, 2]), ("C", vec![1, 2, 3])], 3);
        let groups = find_groups_sequential(&c, 2);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members.len(), 3);
    }

    #[test]
    fn single_item_overlaps_are_discarded() {
        let c = collections_of(vec![("A", vec![1, 2]), ("B", vec![2, 3]), ("C", vec![3, 4])], 4);
        assert!(find_groups_sequential(&c, 2).is_empty());
    }

    #[test]
    fn groups_are_numbered_in_discovery_order() {
        // (A,B) -> {3,4}, (A,C) -> {1,2}, (B,C) -> none
        let c = collections_of(
            vec![("A", vec![1, 2, 3, 4]), ("B", vec![3, 4, 5]), ("C", vec![1, 2, 6])],
            6,
        );
        let groups = find_groups_sequential(&c, 2);
        let sigs: Vec<&[u32]> = groups.iter().map(|g| g.signature.as_slice()).collect();
        assert_eq!(sigs, vec![&[3, 4][..], &[1, 2][..]]);
    }

    #[test]
    fn higher_threshold_filters_smaller_overlaps() {
        let c = collections_of(vec![("A", vec![1, 2, 3]), ("B", vec![1, 2, 3]), ("C", vec![1, 2])], 3);
        let groups = find_groups_sequential(&c, 3);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].signature.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn parallel_matches_sequential() {
        let c = collections_of(
            vec![
                ("A", vec![1, 2, 3, 4]),
                ("B", vec![3, 4, 5]),
                ("C", vec![1, 2, 6]),
                ("D", vec![1, 2, 3, 4, 5, 6]),
                ("E", vec![5, 6]),
            ],
            6,
        );
        assert_eq!(find_groups_parallel(&c, 2), find_groups_sequential(&c, 2));
    }

    #[test]
    fn find_groups_dispatches_on_threshold() {
        let c = collections_of(vec![("A", vec![1, 2]), ("B", vec![1, 2]), ("C", vec![2, 3])], 3);
        let mut config = Config::default();
        let sequential = find_groups(&c, &config);
        config.parallel_threshold = 1;
        assert_eq!(find_groups(&c, &config), sequential);
    }
}
