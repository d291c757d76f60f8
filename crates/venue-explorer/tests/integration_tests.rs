//! Integration tests for the venue explorer.
//!
//! These tests verify end-to-end behavior from CSV files through cleaning,
//! querying, ranking and rendering.

use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::path::PathBuf;
use venue_explorer::{
    ChartSeries, DataSource, Explorer, ExplorerConfig, FilterPredicate, GroupCount, GroupField,
    MapLayers, MapView, QueryParams, RawRecord, RawTable, RenderSink, SummaryRow, TopN,
    aggregate, cleaner, loader, query,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixture(filename: &str) -> RawTable {
    loader::load(&DataSource::path(fixtures_path().join(filename)))
        .expect("Failed to load fixture")
}

fn record(id: &str, name: &str, lat: &str, lon: &str, region: &str) -> RawRecord {
    RawRecord {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        latitude: Some(lat.to_string()),
        longitude: Some(lon.to_string()),
        region: Some(region.to_string()),
        ..Default::default()
    }
}

fn ids(table: &venue_explorer::VenueTable) -> Vec<&str> {
    table.iter().map(|v| v.id.as_str()).collect()
}

// ============================================================================
// End-to-End Scenario
// ============================================================================

#[test]
fn test_small_table_scenario() {
    let raw = RawTable::new(vec![
        record("1", "Red Lion", "51.5", "-0.1", "Camden"),
        record("2", "The Crown", "51.49", "-0.13", "Westminster"),
        record("3", "Red Lion", "51.52", "-0.14", "Camden"),
        record("4", "The Swan", "bad", "-0.1", "Hackney"),
        record("1", "Red Lion", "51.5", "-0.1", "Camden"),
    ]);

    let cleaned = cleaner::clean(&raw);
    assert_eq!(ids(&cleaned.table), vec!["1", "2", "3"]);
    assert_eq!(cleaned.report.invalid_coordinate, 1);
    assert_eq!(cleaned.report.duplicate_id, 1);

    let lions = query::filter(&cleaned.table, &FilterPredicate::new().with_name("lion"));
    assert_eq!(ids(&lions), vec!["1", "3"]);

    let regions = aggregate::top_groups(&cleaned.table, GroupField::Region, 5);
    assert_eq!(
        regions,
        vec![GroupCount::new("Camden", 2), GroupCount::new("Westminster", 1)]
    );

    let names = aggregate::top_groups(&cleaned.table, GroupField::Name, 1);
    assert_eq!(names, vec![GroupCount::new("Red Lion", 2)]);
}

// ============================================================================
// Loader Tests
// ============================================================================

#[test]
fn test_headerless_file_maps_by_position() {
    let raw = load_fixture("pubs_headerless.csv");
    assert_eq!(raw.len(), 4);
    assert_eq!(raw.records[0].id.as_deref(), Some("1"));
    assert_eq!(raw.records[0].address.as_deref(), Some("1 High Street"));
    assert_eq!(raw.records[2].region.as_deref(), Some("Camden"));
}

#[test]
fn test_reordered_header_maps_by_name() {
    let raw = load_fixture("pubs_defects.csv");
    assert_eq!(raw.len(), 9);
    assert_eq!(raw.records[2].id.as_deref(), Some("12"));
    assert_eq!(raw.records[2].region.as_deref(), Some("Westminster"));
    assert_eq!(raw.records[2].latitude.as_deref(), Some("51.49"));
}

#[test]
fn test_missing_file_is_data_source_error() {
    let err = loader::load(&DataSource::path(fixtures_path().join("no_such_file.csv")))
        .unwrap_err();
    assert!(err.is_data_source());
    assert_eq!(err.error_code(), "DATA_SOURCE_ERROR");
}

// ============================================================================
// Cleaner Tests
// ============================================================================

#[test]
fn test_defect_fixture_report() {
    let cleaned = cleaner::clean(&load_fixture("pubs_defects.csv"));
    let report = &cleaned.report;

    assert_eq!(report.rows_in, 9);
    assert_eq!(report.missing_required, 3);
    assert_eq!(report.invalid_coordinate, 1);
    assert_eq!(report.duplicate_id, 1);
    assert_eq!(report.rows_out, 4);
    assert_eq!(report.rows_dropped(), 5);
    assert_eq!(ids(&cleaned.table), vec!["10", "11", "12", "row-9"]);
}

#[test]
fn test_defect_fixture_text_normalized() {
    let cleaned = cleaner::clean(&load_fixture("pubs_defects.csv"));
    let venues = cleaned.table.venues();

    assert_eq!(venues[0].name, "Red Lion");
    assert_eq!(venues[1].name, "The Crown");
    assert_eq!(venues[1].address, None);
    assert_eq!(venues[0].address.as_deref(), Some("1 High Street"));
}

#[test]
fn test_badly_encoded_export_keeps_every_venue() {
    let cleaned = cleaner::clean(&load_fixture("pubs_latin1.csv"));

    assert_eq!(cleaned.report.rows_dropped(), 0);
    assert_eq!(ids(&cleaned.table), vec!["row-1", "1", "2", "3"]);

    let venues = cleaned.table.venues();
    assert!(venues[2].name.starts_with("Caf"));
    assert!(venues[2].name.ends_with(" Royal"));
    assert_eq!(venues[3].name, "Unknown");
}

#[test]
fn test_cleaning_is_idempotent() {
    let first = cleaner::clean(&load_fixture("pubs_defects.csv"));
    let second = cleaner::clean(&first.table.to_raw());

    assert_eq!(second.table, first.table);
    assert_eq!(second.report.rows_dropped(), 0);
}

#[test]
fn test_cleaned_rows_satisfy_invariants() {
    let cleaned = cleaner::clean(&loader::load(&DataSource::Bundled).unwrap());
    let mut seen = HashSet::new();

    for venue in &cleaned.table {
        assert!(!venue.name.is_empty());
        assert!(!venue.region.is_empty());
        assert!((-90.0..=90.0).contains(&venue.latitude));
        assert!((-180.0..=180.0).contains(&venue.longitude));
        assert!(seen.insert(venue.id.clone()), "duplicate id {}", venue.id);
    }
}

// ============================================================================
// Query and Aggregation Tests
// ============================================================================

#[test]
fn test_filter_name_and_region_intersect() {
    let table = cleaner::clean(&load_fixture("pubs_headerless.csv")).table;

    let predicate = FilterPredicate::new().with_name("LION").with_region("Camden");
    assert_eq!(ids(&query::filter(&table, &predicate)), vec!["1", "3"]);

    let predicate = FilterPredicate::new().with_name("lion").with_region("Westminster");
    assert!(query::filter(&table, &predicate).is_empty());

    let predicate = FilterPredicate::new().with_region("Atlantis");
    assert!(query::filter(&table, &predicate).is_empty());
}

#[test]
fn test_unrestricted_filter_returns_everything() {
    let table = cleaner::clean(&load_fixture("pubs_headerless.csv")).table;
    let filtered = query::filter(&table, &FilterPredicate::new().with_name(""));
    assert_eq!(filtered, table);
}

#[test]
fn test_bundled_sample_rankings() {
    let explorer = Explorer::load(ExplorerConfig::default(), &DataSource::Bundled).unwrap();
    let report = explorer.report();
    assert_eq!(report.rows_in, 41);
    assert_eq!(report.rows_out, 35);

    let regions = aggregate::top_groups(explorer.table(), GroupField::Region, 5);
    assert_eq!(
        regions,
        vec![
            GroupCount::new("Tower Hamlets", 7),
            GroupCount::new("Southwark", 5),
            GroupCount::new("Westminster", 5),
            GroupCount::new("Camden", 3),
            GroupCount::new("Hackney", 3),
        ]
    );

    let names = aggregate::top_groups(explorer.table(), GroupField::Name, 3);
    assert_eq!(
        names,
        vec![
            GroupCount::new("The Crown", 5),
            GroupCount::new("Red Lion", 3),
            GroupCount::new("The Royal Oak", 3),
        ]
    );

    let total: usize = aggregate::Aggregator::group_counts(explorer.table(), GroupField::Region)
        .iter()
        .map(|g| g.count)
        .sum();
    assert_eq!(total, explorer.table().len());
}

// ============================================================================
// Dashboard Tests
// ============================================================================

#[derive(Default)]
struct CollectingSink {
    maps: Vec<MapLayers>,
    charts: Vec<String>,
    tables: Vec<usize>,
    notices: Vec<String>,
}

impl RenderSink for CollectingSink {
    fn map(&mut self, _title: &str, layers: &MapLayers, _view: &MapView) {
        self.maps.push(layers.clone());
    }

    fn chart(&mut self, series: &ChartSeries, _caption: &str) {
        self.charts.push(series.title.clone());
    }

    fn table(&mut self, _title: &str, rows: &[SummaryRow]) {
        self.tables.push(rows.len());
    }

    fn notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

#[test]
fn test_dashboard_highlights_only_when_shown() {
    let explorer = Explorer::load(ExplorerConfig::default(), &DataSource::Bundled).unwrap();
    let mut params = QueryParams {
        name_filter: "red lion".to_string(),
        region_filter: Some("Camden".to_string()),
        top_n: TopN::try_from(10).unwrap(),
        show_matches: false,
    };

    let hidden = explorer.dashboard(&params);
    assert!(hidden.map.highlight.is_none());
    assert_eq!(hidden.map.base.len(), 35);

    params.show_matches = true;
    let shown = explorer.dashboard(&params);
    let highlight = shown.map.highlight.as_ref().unwrap();
    assert_eq!(highlight.len(), 1);
    assert_eq!(highlight[0].address, "1 Red Lion Street, Holborn");
    assert_eq!(shown.regions.points.len(), 10);
    assert_eq!(shown.summary.len(), 35);
}

#[test]
fn test_dashboard_render_sequence() {
    let explorer = Explorer::load(ExplorerConfig::default(), &DataSource::Bundled).unwrap();
    let dashboard = explorer.dashboard(&QueryParams {
        name_filter: "no such pub".to_string(),
        show_matches: true,
        ..Default::default()
    });

    let mut sink = CollectingSink::default();
    dashboard.render(&mut sink);

    assert_eq!(sink.maps.len(), 1);
    assert!(sink.maps[0].is_empty_result());
    assert_eq!(sink.notices, vec!["No pubs match the current filter.".to_string()]);
    assert_eq!(
        sink.charts,
        vec![
            "Distribution of Pubs by Local Authority (Top 15)".to_string(),
            "Distribution of Pubs by Postal Code Prefix".to_string(),
            "Top 10 Pub Names".to_string(),
        ]
    );
    assert_eq!(sink.tables, vec![35]);
}

#[test]
fn test_config_file_roundtrip() {
    let dir = std::env::temp_dir().join("venue_explorer_config_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.json");
    std::fs::write(&path, r#"{ "default_top_n": 5, "name_ranking_size": 2 }"#).unwrap();

    let config = ExplorerConfig::from_json_file(&path).unwrap();
    assert_eq!(config.default_top_n, TopN::try_from(5).unwrap());

    let explorer = Explorer::load(config, &DataSource::Bundled).unwrap();
    let dashboard = explorer.dashboard(&QueryParams::default());
    assert_eq!(dashboard.names.points.len(), 2);

    std::fs::write(&path, r#"{ "map_zoom": 40.0 }"#).unwrap();
    let err = ExplorerConfig::from_json_file(&path).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_CONFIG");

    std::fs::remove_dir_all(&dir).ok();
}
