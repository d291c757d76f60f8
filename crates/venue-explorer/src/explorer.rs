//! Explorer session: one cleaned table and the queries run against it.

use crate::aggregate::Aggregator;
use crate::cleaner::DataCleaner;
use crate::config::ExplorerConfig;
use crate::error::Result;
use crate::loader::{DataLoader, DataSource};
use crate::presentation::{
    self, ChartKind, ChartSeries, MapLayers, MapView, RenderSink, SummaryRow,
};
use crate::query::QueryEngine;
use crate::table::VenueTable;
use crate::types::{CleaningReport, GroupField, QueryParams, RawTable};
use chrono::Local;
use serde::Serialize;
use tracing::{debug, info};

/// Owns the cleaned table of a session and answers queries against it.
///
/// The table is built once and never mutated; every query returns fresh
/// values.
#[derive(Debug, Clone)]
pub struct Explorer {
    config: ExplorerConfig,
    table: VenueTable,
    report: CleaningReport,
}

static_assertions::assert_impl_all!(Explorer: Send, Sync);

impl Explorer {
    /// Clean `raw` and start a session over the result.
    pub fn new(config: ExplorerConfig, raw: &RawTable) -> Self {
        let cleaned = DataCleaner.clean(raw);
        Self {
            config,
            table: cleaned.table,
            report: cleaned.report,
        }
    }

    /// Load, clean and start a session.
    ///
    /// # Errors
    ///
    /// Fails only if the source cannot be read.
    pub fn load(config: ExplorerConfig, source: &DataSource) -> Result<Self> {
        let raw = DataLoader::load(source)?;
        Ok(Self::new(config, &raw))
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn table(&self) -> &VenueTable {
        &self.table
    }

    pub fn report(&self) -> &CleaningReport {
        &self.report
    }

    /// Choices for the region selector, sorted.
    pub fn region_options(&self) -> Vec<String> {
        self.table.region_options()
    }

    /// Venues matching the name and region filters of `params`.
    pub fn filter(&self, params: &QueryParams) -> VenueTable {
        QueryEngine::filter(&self.table, &params.predicate())
    }

    /// Everything the presentation shell needs for one interaction.
    ///
    /// Matches are highlighted only when `params.show_matches` is set;
    /// rankings and the summary always cover the full table.
    pub fn dashboard(&self, params: &QueryParams) -> Dashboard {
        info!("Building dashboard for {:?}", params);

        let matches = params.show_matches.then(|| self.filter(params));
        let matched = matches.as_ref().map(VenueTable::len);
        if let Some(count) = matched {
            debug!("{} venues match the current filter", count);
        }

        let top_n = params.top_n.get();
        let regions = ChartSeries::new(
            format!("Distribution of Pubs by Local Authority (Top {})", top_n),
            ChartKind::Pie,
            GroupField::Region.label(),
            Aggregator::top_groups(&self.table, GroupField::Region, top_n),
        );
        let postcode_prefixes = ChartSeries::new(
            "Distribution of Pubs by Postal Code Prefix",
            ChartKind::Pie,
            GroupField::PostcodePrefix.label(),
            Aggregator::top_groups(
                &self.table,
                GroupField::PostcodePrefix,
                self.config.postcode_ranking_size,
            ),
        );
        let names = ChartSeries::new(
            format!("Top {} Pub Names", self.config.name_ranking_size),
            ChartKind::Bar,
            "Pub Name",
            Aggregator::top_groups(&self.table, GroupField::Name, self.config.name_ranking_size),
        )
        .with_value_label("Number of Pubs");

        Dashboard {
            generated_at: Local::now().to_rfc3339(),
            map: presentation::map_layers(&self.table, matches.as_ref()),
            map_view: self.config.map_view(),
            matched,
            regions,
            postcode_prefixes,
            names,
            summary: presentation::summary_rows(&self.table),
            region_options: self.region_options(),
            cleaning: self.report.clone(),
        }
    }
}

/// Sink-ready output of one interaction.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub generated_at: String,
    pub map: MapLayers,
    pub map_view: MapView,
    /// Number of filter matches, `None` when matches were not requested.
    pub matched: Option<usize>,
    pub regions: ChartSeries,
    pub postcode_prefixes: ChartSeries,
    pub names: ChartSeries,
    pub summary: Vec<SummaryRow>,
    pub region_options: Vec<String>,
    pub cleaning: CleaningReport,
}

impl Dashboard {
    /// Hand every part of the dashboard to a sink, in display order.
    pub fn render(&self, sink: &mut dyn RenderSink) {
        sink.map("Map of London Pubs", &self.map, &self.map_view);
        if self.map.is_empty_result() {
            sink.notice("No pubs match the current filter.");
        }

        let charts = [
            (
                &self.regions,
                "This pie chart illustrates the distribution of pubs across different local authorities.",
                "No data available to display the pie chart.",
            ),
            (
                &self.postcode_prefixes,
                "This pie chart shows the distribution of pubs based on postal code prefixes.",
                "No data available to display the pie chart for postal codes.",
            ),
            (
                &self.names,
                "This bar chart tallies how many pubs share the most popular names.",
                "No data available to display the bar chart for pub names.",
            ),
        ];
        for (series, caption, empty_message) in charts {
            if series.is_empty() {
                sink.notice(empty_message);
            } else {
                sink.chart(series, caption);
            }
        }

        sink.table("Number of Pubs by Selected Columns", &self.summary);
    }
}
