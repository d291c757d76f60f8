//! Data cleaning for raw venue tables.
//!
//! Cleaning runs three steps in order:
//! 1. Drop rows missing `name`, `region`, `latitude` or `longitude`
//! 2. Coerce coordinates to `f64`, dropping rows that do not parse or fall
//!    outside the valid latitude/longitude range
//! 3. Deduplicate by `id`, keeping the first occurrence
//!
//! Cleaning never fails. Rejected rows are counted in a [`CleaningReport`].

mod converters;
mod sanitizers;

use crate::table::VenueTable;
use crate::types::{CleaningReport, RawRecord, RawTable, Venue};
use converters::{Axis, parse_coordinate};
use sanitizers::{normalize_numeric_text, normalize_text};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Prefix of the id given to rows that have none.
pub const ROW_ID_PREFIX: &str = "row-";

/// Result of cleaning: the table plus what was dropped on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Cleaned {
    pub table: VenueTable,
    pub report: CleaningReport,
}

/// Why a row did not make it into the cleaned table.
enum RowOutcome {
    Kept(Venue),
    MissingRequired,
    InvalidCoordinate,
}

/// Data cleaner turning a [`RawTable`] into a [`VenueTable`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DataCleaner;

impl DataCleaner {
    /// Clean a raw table. The input is left untouched.
    pub fn clean(&self, raw: &RawTable) -> Cleaned {
        info!("Cleaning {} raw rows...", raw.len());

        let mut report = CleaningReport {
            rows_in: raw.len(),
            ..Default::default()
        };
        let mut seen_ids: HashSet<String> = HashSet::with_capacity(raw.len());
        let mut venues = Vec::with_capacity(raw.len());

        for (row, record) in raw.records.iter().enumerate() {
            match Self::clean_row(row, record) {
                RowOutcome::MissingRequired => report.missing_required += 1,
                RowOutcome::InvalidCoordinate => report.invalid_coordinate += 1,
                RowOutcome::Kept(venue) => {
                    if seen_ids.insert(venue.id.clone()) {
                        venues.push(venue);
                    } else {
                        report.duplicate_id += 1;
                    }
                }
            }
        }

        report.rows_out = venues.len();

        debug!("Dropped {} rows with missing required fields", report.missing_required);
        debug!("Dropped {} rows with invalid coordinates", report.invalid_coordinate);
        debug!("Dropped {} rows with duplicate ids", report.duplicate_id);

        if report.rows_dropped() > 0 {
            warn!(
                "Cleaning excluded {} of {} rows",
                report.rows_dropped(),
                report.rows_in
            );
        }
        info!("Cleaned table has {} rows", report.rows_out);

        Cleaned {
            table: VenueTable::from_venues(venues),
            report,
        }
    }

    /// Validate and type one row. `row` is the 0-based data row position.
    fn clean_row(row: usize, record: &RawRecord) -> RowOutcome {
        let name = normalize_text(record.name.as_deref());
        let region = normalize_text(record.region.as_deref());
        let latitude = normalize_numeric_text(record.latitude.as_deref());
        let longitude = normalize_numeric_text(record.longitude.as_deref());

        let (Some(name), Some(region), Some(latitude), Some(longitude)) =
            (name, region, latitude, longitude)
        else {
            return RowOutcome::MissingRequired;
        };

        let (Some(latitude), Some(longitude)) = (
            parse_coordinate(&latitude, Axis::Latitude),
            parse_coordinate(&longitude, Axis::Longitude),
        ) else {
            return RowOutcome::InvalidCoordinate;
        };

        // Rows without an id fall back to their 1-based position in the source,
        // prefixed so the stand-in cannot collide with a numeric source id.
        let id = normalize_text(record.id.as_deref())
            .unwrap_or_else(|| format!("{}{}", ROW_ID_PREFIX, row + 1));

        RowOutcome::Kept(Venue {
            id,
            name,
            address: normalize_text(record.address.as_deref()),
            postcode: normalize_text(record.postcode.as_deref()),
            region,
            latitude,
            longitude,
        })
    }
}

/// Clean a raw table with the default cleaner.
pub fn clean(raw: &RawTable) -> Cleaned {
    DataCleaner.clean(raw)
}
