use crate::error::ExplorerError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Column order used when a source file has no header row.
pub const POSITIONAL_COLUMNS: [&str; 9] = [
    "id",
    "name",
    "address",
    "postcode",
    "easting",
    "northing",
    "latitude",
    "longitude",
    "region",
];

/// Header names accepted as an alias of `region`.
pub const REGION_ALIASES: [&str; 2] = ["local_authority", "local authority"];

// ============================================================================
// Records
// ============================================================================

/// One row exactly as read from the source. Every cell is optional text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub postcode: Option<String>,
    pub easting: Option<String>,
    pub northing: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub region: Option<String>,
}

impl RawRecord {
    /// Set a field by its canonical column name. Unknown names are ignored.
    pub fn set_field(&mut self, field: &str, value: Option<String>) {
        match field {
            "id" => self.id = value,
            "name" => self.name = value,
            "address" => self.address = value,
            "postcode" => self.postcode = value,
            "easting" => self.easting = value,
            "northing" => self.northing = value,
            "latitude" => self.latitude = value,
            "longitude" => self.longitude = value,
            "region" => self.region = value,
            _ => {}
        }
    }
}

/// Loader output: the uncleaned rows in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub records: Vec<RawRecord>,
}

impl RawTable {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A cleaned venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub postcode: Option<String>,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
}

// ============================================================================
// Query Types
// ============================================================================

/// Conjunction of an optional name-contains and an optional region-equals test.
///
/// A blank name criterion and an empty region criterion both mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPredicate {
    pub name_contains: Option<String>,
    pub region_equals: Option<String>,
}

impl FilterPredicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, needle: impl Into<String>) -> Self {
        self.name_contains = Some(needle.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region_equals = Some(region.into());
        self
    }

    /// Lowercased name needle, or `None` when the criterion is absent or blank.
    pub fn name_needle(&self) -> Option<String> {
        self.name_contains
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::to_lowercase)
    }

    /// Region to match exactly, or `None` when absent or empty.
    pub fn region(&self) -> Option<&str> {
        self.region_equals.as_deref().filter(|s| !s.is_empty())
    }

    /// True when the predicate matches every row.
    pub fn is_unrestricted(&self) -> bool {
        self.name_needle().is_none() && self.region().is_none()
    }
}

/// Number of ranked groups a caller may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TopN(u32);

impl TopN {
    /// Values offered by the selection widget.
    pub const CHOICES: [u32; 4] = [5, 10, 15, 20];

    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl Default for TopN {
    fn default() -> Self {
        TopN(15)
    }
}

impl TryFrom<u32> for TopN {
    type Error = ExplorerError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if Self::CHOICES.contains(&value) {
            Ok(TopN(value))
        } else {
            Err(ExplorerError::InvalidTopN(value))
        }
    }
}

impl From<TopN> for u32 {
    fn from(top_n: TopN) -> Self {
        top_n.0
    }
}

/// Parameters coming from the widget layer for one interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    /// Case-insensitive name fragment; empty means "all names".
    #[serde(default)]
    pub name_filter: String,
    /// Exact region name; `None` means "all regions".
    #[serde(default)]
    pub region_filter: Option<String>,
    #[serde(default)]
    pub top_n: TopN,
    /// Whether matches should be highlighted on the map.
    #[serde(default)]
    pub show_matches: bool,
}

impl QueryParams {
    pub fn predicate(&self) -> FilterPredicate {
        FilterPredicate {
            name_contains: Some(self.name_filter.clone()),
            region_equals: self.region_filter.clone(),
        }
    }
}

// ============================================================================
// Aggregation Types
// ============================================================================

/// Field a ranking groups on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupField {
    Region,
    /// Leading two characters of the postcode.
    PostcodePrefix,
    Name,
}

impl GroupField {
    pub const POSTCODE_PREFIX_LEN: usize = 2;

    /// Column label used when the grouping is handed to a sink.
    pub fn label(self) -> &'static str {
        match self {
            GroupField::Region => "local_authority",
            GroupField::PostcodePrefix => "postcode_prefix",
            GroupField::Name => "name",
        }
    }

    /// Grouping key of a venue for this field.
    pub fn key_of(self, venue: &Venue) -> Cow<'_, str> {
        match self {
            GroupField::Region => Cow::Borrowed(venue.region.as_str()),
            GroupField::Name => Cow::Borrowed(venue.name.as_str()),
            GroupField::PostcodePrefix => {
                Cow::Owned(postcode_prefix(venue.postcode.as_deref().unwrap_or("")))
            }
        }
    }
}

/// Leading two characters of a postcode, or `""` if it is shorter than that.
pub fn postcode_prefix(postcode: &str) -> String {
    let prefix: String = postcode
        .chars()
        .take(GroupField::POSTCODE_PREFIX_LEN)
        .collect();
    if prefix.chars().count() < GroupField::POSTCODE_PREFIX_LEN {
        String::new()
    } else {
        prefix
    }
}

/// One entry of a ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub key: String,
    pub count: usize,
}

impl GroupCount {
    pub fn new(key: impl Into<String>, count: usize) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }
}

// ============================================================================
// Cleaning Report
// ============================================================================

/// Row counts produced by the cleaner for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub rows_in: usize,
    pub rows_out: usize,
    /// Rows missing `name`, `region`, `latitude` or `longitude`.
    pub missing_required: usize,
    /// Rows whose coordinates are non-numeric, non-finite or out of range.
    pub invalid_coordinate: usize,
    /// Rows dropped because an earlier row had the same id.
    pub duplicate_id: usize,
}

impl CleaningReport {
    pub fn rows_dropped(&self) -> usize {
        self.missing_required + self.invalid_coordinate + self.duplicate_id
    }
}
