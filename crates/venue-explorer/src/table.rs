//! The cleaned, immutable venue table.

use crate::types::{RawRecord, RawTable, Venue};
use polars::prelude::*;
use std::collections::BTreeMap;

/// Ordered collection of cleaned venues with a region index.
///
/// Built only by the cleaner and the query engine, so every instance upholds
/// the cleaned-table invariants: unique ids, present name and region, finite
/// in-range coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueTable {
    venues: Vec<Venue>,
    /// Region name to row positions, ascending.
    region_index: BTreeMap<String, Vec<usize>>,
}

static_assertions::assert_impl_all!(VenueTable: Send, Sync);

impl VenueTable {
    pub(crate) fn from_venues(venues: Vec<Venue>) -> Self {
        let mut region_index: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (row, venue) in venues.iter().enumerate() {
            region_index
                .entry(venue.region.clone())
                .or_default()
                .push(row);
        }
        Self {
            venues,
            region_index,
        }
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Venue> {
        self.venues.iter()
    }

    pub fn get(&self, row: usize) -> Option<&Venue> {
        self.venues.get(row)
    }

    /// Distinct regions in ascending order.
    pub fn region_options(&self) -> Vec<String> {
        self.region_index.keys().cloned().collect()
    }

    /// Row positions of a region, in table order. Empty for unknown regions.
    pub fn region_rows(&self, region: &str) -> &[usize] {
        self.region_index
            .get(region)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Venues of one region, in table order.
    pub fn in_region<'a>(&'a self, region: &str) -> impl Iterator<Item = &'a Venue> + 'a {
        self.region_rows(region)
            .iter()
            .filter_map(move |&row| self.venues.get(row))
    }

    /// Turn the table back into raw text rows.
    ///
    /// Coordinates are written with `f64`'s shortest round-trip formatting,
    /// so cleaning the result reproduces this table.
    pub fn to_raw(&self) -> RawTable {
        let records = self
            .venues
            .iter()
            .map(|venue| RawRecord {
                id: Some(venue.id.clone()),
                name: Some(venue.name.clone()),
                address: venue.address.clone(),
                postcode: venue.postcode.clone(),
                easting: None,
                northing: None,
                latitude: Some(venue.latitude.to_string()),
                longitude: Some(venue.longitude.to_string()),
                region: Some(venue.region.clone()),
            })
            .collect();
        RawTable::new(records)
    }

    /// Columnar copy of the table for sinks that consume a DataFrame.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let ids: Vec<&str> = self.venues.iter().map(|v| v.id.as_str()).collect();
        let names: Vec<&str> = self.venues.iter().map(|v| v.name.as_str()).collect();
        let addresses: Vec<Option<&str>> =
            self.venues.iter().map(|v| v.address.as_deref()).collect();
        let postcodes: Vec<Option<&str>> =
            self.venues.iter().map(|v| v.postcode.as_deref()).collect();
        let regions: Vec<&str> = self.venues.iter().map(|v| v.region.as_str()).collect();
        let latitudes: Vec<f64> = self.venues.iter().map(|v| v.latitude).collect();
        let longitudes: Vec<f64> = self.venues.iter().map(|v| v.longitude).collect();

        DataFrame::new(vec![
            Column::new("id".into(), ids),
            Column::new("name".into(), names),
            Column::new("address".into(), addresses),
            Column::new("postcode".into(), postcodes),
            Column::new("local_authority".into(), regions),
            Column::new("latitude".into(), latitudes),
            Column::new("longitude".into(), longitudes),
        ])
    }
}

impl<'a> IntoIterator for &'a VenueTable {
    type Item = &'a Venue;
    type IntoIter = std::slice::Iter<'a, Venue>;

    fn into_iter(self) -> Self::IntoIter {
        self.venues.iter()
    }
}
