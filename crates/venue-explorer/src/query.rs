//! Filtering of cleaned tables.

use crate::table::VenueTable;
use crate::types::{FilterPredicate, Venue};
use tracing::debug;

/// Applies [`FilterPredicate`]s to a [`VenueTable`].
pub struct QueryEngine;

impl QueryEngine {
    /// Rows matching every criterion of the predicate, in table order.
    ///
    /// The name test is a case-insensitive substring match; a blank name
    /// matches everything. The region test is exact and goes through the
    /// table's region index. No match yields an empty table.
    pub fn filter(table: &VenueTable, predicate: &FilterPredicate) -> VenueTable {
        let needle = predicate.name_needle();
        let matches_name =
            |venue: &&Venue| needle.as_deref().is_none_or(|n| venue.name.to_lowercase().contains(n));

        let venues: Vec<Venue> = match predicate.region() {
            Some(region) => table
                .in_region(region)
                .filter(matches_name)
                .cloned()
                .collect(),
            None => table.iter().filter(matches_name).cloned().collect(),
        };

        debug!(
            "Filter {:?} matched {} of {} rows",
            predicate,
            venues.len(),
            table.len()
        );

        VenueTable::from_venues(venues)
    }
}

/// Filter a table with a predicate.
pub fn filter(table: &VenueTable, predicate: &FilterPredicate) -> VenueTable {
    QueryEngine::filter(table, predicate)
}
