//! London Venue Explorer Library
//!
//! Loads an open dataset of London pubs, cleans it into a typed table and
//! answers the questions an interactive dashboard asks of it.
//!
//! # Overview
//!
//! - **Loading**: CSV files with or without a header row, from a path, an
//!   in-memory buffer or the bundled sample
//! - **Cleaning**: Quote stripping, missing-marker normalization, coordinate
//!   validation and id deduplication, with a [`CleaningReport`] of what was dropped
//! - **Querying**: Case-insensitive name search and exact region filtering
//! - **Aggregation**: Top-N rankings by region, postcode prefix and name
//! - **Presentation**: Map layers, chart series and a summary listing handed
//!   to any [`RenderSink`]
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use venue_explorer::{DataSource, Explorer, ExplorerConfig, QueryParams, TopN};
//!
//! let explorer = Explorer::load(ExplorerConfig::default(), &DataSource::path("pubs.csv"))?;
//!
//! let params = QueryParams {
//!     name_filter: "red lion".to_string(),
//!     region_filter: Some("Camden".to_string()),
//!     top_n: TopN::try_from(10)?,
//!     show_matches: true,
//! };
//!
//! let dashboard = explorer.dashboard(&params);
//! println!("{} matches", dashboard.matched.unwrap_or(0));
//! ```
//!
//! # Building Blocks
//!
//! Each stage is usable on its own:
//!
//! ```rust,ignore
//! use venue_explorer::{aggregate, cleaner, loader, query, DataSource, FilterPredicate, GroupField};
//!
//! let raw = loader::load(&DataSource::Bundled)?;
//! let cleaned = cleaner::clean(&raw);
//! let camden = query::filter(&cleaned.table, &FilterPredicate::new().with_region("Camden"));
//! let names = aggregate::top_groups(&camden, GroupField::Name, 5);
//! ```
//!
//! # Configuration
//!
//! Ranking sizes and map hints live in [`ExplorerConfig`]:
//!
//! ```rust,ignore
//! use venue_explorer::ExplorerConfig;
//!
//! let config = ExplorerConfig::builder()
//!     .postcode_ranking_size(5)
//!     .map_zoom(11.0)
//!     .build()?;
//! ```

pub mod aggregate;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod explorer;
pub mod loader;
pub mod presentation;
pub mod query;
pub mod table;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use aggregate::Aggregator;
pub use cleaner::{Cleaned, DataCleaner};
pub use config::{ConfigValidationError, ExplorerConfig, ExplorerConfigBuilder};
pub use error::{ExplorerError, Result as ExplorerResult, ResultExt};
pub use explorer::{Dashboard, Explorer};
pub use loader::{DataLoader, DataSource};
pub use presentation::{
    ChartKind, ChartSeries, MapLayers, MapPoint, MapView, RenderSink, SummaryRow,
};
pub use query::QueryEngine;
pub use table::VenueTable;
pub use types::{
    CleaningReport, FilterPredicate, GroupCount, GroupField, QueryParams, RawRecord, RawTable,
    TopN, Venue,
};
