//! Ranked group counts.

use crate::table::VenueTable;
use crate::types::{GroupCount, GroupField};
use std::collections::HashMap;

/// Computes [`GroupCount`] rankings over a [`VenueTable`].
pub struct Aggregator;

impl Aggregator {
    /// Count rows per group, ordered by count descending then key ascending.
    pub fn group_counts(table: &VenueTable, field: GroupField) -> Vec<GroupCount> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for venue in table {
            *counts.entry(field.key_of(venue).into_owned()).or_insert(0) += 1;
        }

        let mut groups: Vec<GroupCount> = counts
            .into_iter()
            .map(|(key, count)| GroupCount { key, count })
            .collect();
        groups.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
        groups
    }

    /// The first `n` groups of [`Aggregator::group_counts`]. `n == 0` yields
    /// an empty ranking.
    pub fn top_groups(table: &VenueTable, field: GroupField, n: usize) -> Vec<GroupCount> {
        if n == 0 {
            return Vec::new();
        }
        let mut groups = Self::group_counts(table, field);
        groups.truncate(n);
        groups
    }
}

/// Top-`n` ranking of `table` grouped by `field`.
pub fn top_groups(table: &VenueTable, field: GroupField, n: usize) -> Vec<GroupCount> {
    Aggregator::top_groups(table, field, n)
}
