//! Presentation adapter.
//!
//! Shapes cleaned and filtered tables into the row sets a map or chart sink
//! expects. Nothing here draws; see [`RenderSink`] for the sink side.

mod sink;

pub use sink::{MapView, RenderSink};

use crate::table::VenueTable;
use crate::types::GroupCount;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Map Layers
// ============================================================================

/// One point on the map with its hover text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub highlighted: bool,
}

/// Backdrop plus optional highlighted subset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapLayers {
    /// Every venue of the unfiltered table.
    pub base: Vec<MapPoint>,
    /// Filtered venues. `None` when no filter was applied, `Some(vec![])`
    /// when a filter matched nothing.
    pub highlight: Option<Vec<MapPoint>>,
}

impl MapLayers {
    /// True when a filter was applied and matched nothing.
    pub fn is_empty_result(&self) -> bool {
        self.highlight.as_ref().is_some_and(Vec::is_empty)
    }
}

fn map_points(table: &VenueTable, highlighted: bool) -> Vec<MapPoint> {
    table
        .iter()
        .map(|venue| MapPoint {
            name: venue.name.clone(),
            latitude: venue.latitude,
            longitude: venue.longitude,
            address: venue.address.clone().unwrap_or_default(),
            highlighted,
        })
        .collect()
}

/// Build map layers from the full table and an optional filtered subset.
pub fn map_layers(base: &VenueTable, highlight: Option<&VenueTable>) -> MapLayers {
    MapLayers {
        base: map_points(base, false),
        highlight: highlight.map(|table| map_points(table, true)),
    }
}

// ============================================================================
// Chart Series
// ============================================================================

/// How a ranking is meant to be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Pie,
    Bar,
}

/// A ranking with its axis bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub title: String,
    pub kind: ChartKind,
    /// Label of the category axis / pie slice names.
    pub key_label: String,
    /// Label of the value axis / slice sizes.
    pub value_label: String,
    pub points: Vec<GroupCount>,
}

impl ChartSeries {
    pub fn new(
        title: impl Into<String>,
        kind: ChartKind,
        key_label: impl Into<String>,
        counts: Vec<GroupCount>,
    ) -> Self {
        Self {
            title: title.into(),
            kind,
            key_label: key_label.into(),
            value_label: "pub_count".to_string(),
            points: counts,
        }
    }

    pub fn with_value_label(mut self, label: impl Into<String>) -> Self {
        self.value_label = label.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Two-column frame `[key_label, value_label]`.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let keys: Vec<&str> = self.points.iter().map(|p| p.key.as_str()).collect();
        let counts: Vec<u64> = self.points.iter().map(|p| p.count as u64).collect();
        DataFrame::new(vec![
            Column::new(self.key_label.as_str().into(), keys),
            Column::new(self.value_label.as_str().into(), counts),
        ])
    }
}

// ============================================================================
// Summary Listing
// ============================================================================

/// A distinct `(id, name, address, postcode, region)` tuple and how often it
/// occurs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SummaryRow {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub postcode: Option<String>,
    pub region: String,
    pub count: usize,
}

/// Deduplicated listing of the table, ordered by the tuple.
pub fn summary_rows(table: &VenueTable) -> Vec<SummaryRow> {
    type Key<'a> = (&'a str, &'a str, Option<&'a str>, Option<&'a str>, &'a str);

    let mut counts: BTreeMap<Key<'_>, usize> = BTreeMap::new();
    for venue in table {
        let key = (
            venue.id.as_str(),
            venue.name.as_str(),
            venue.address.as_deref(),
            venue.postcode.as_deref(),
            venue.region.as_str(),
        );
        *counts.entry(key).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((id, name, address, postcode, region), count)| SummaryRow {
            id: id.to_string(),
            name: name.to_string(),
            address: address.map(str::to_string),
            postcode: postcode.map(str::to_string),
            region: region.to_string(),
            count,
        })
        .collect()
}

/// Frame form of a summary listing.
pub fn summary_frame(rows: &[SummaryRow]) -> PolarsResult<DataFrame> {
    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    let addresses: Vec<Option<&str>> = rows.iter().map(|r| r.address.as_deref()).collect();
    let postcodes: Vec<Option<&str>> = rows.iter().map(|r| r.postcode.as_deref()).collect();
    let regions: Vec<&str> = rows.iter().map(|r| r.region.as_str()).collect();
    let counts: Vec<u64> = rows.iter().map(|r| r.count as u64).collect();

    DataFrame::new(vec![
        Column::new("id".into(), ids),
        Column::new("name".into(), names),
        Column::new("address".into(), addresses),
        Column::new("postcode".into(), postcodes),
        Column::new("local_authority".into(), regions),
        Column::new("count".into(), counts),
    ])
}
