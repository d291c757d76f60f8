//! CLI entry point for the London venue explorer.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};
use venue_explorer::utils::truncate_str;
use venue_explorer::{
    ChartSeries, Dashboard, DataSource, Explorer, ExplorerConfig, ExplorerConfigBuilder, MapLayers,
    MapView, QueryParams, RenderSink, SummaryRow, TopN, presentation,
};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Explore the open dataset of London pubs",
    long_about = "Loads, cleans and summarizes a CSV export of London pubs.\n\n\
                  EXAMPLES:\n  \
                  # Summarize the bundled sample\n  \
                  venue-explorer\n\n  \
                  # Search a full export for matching names in one borough\n  \
                  venue-explorer -i open_pubs.csv --name \"red lion\" --region Camden --show\n\n  \
                  # Machine-readable dashboard\n  \
                  venue-explorer -i open_pubs.csv --json | jq .regions"
)]
struct Args {
    /// Path to the CSV file to explore
    ///
    /// If not specified, the bundled sample is used
    #[arg(short, long)]
    input: Option<String>,

    /// Case-insensitive substring to search for in venue names
    #[arg(short, long, default_value = "")]
    name: String,

    /// Exact local authority to restrict matches to
    #[arg(short, long)]
    region: Option<String>,

    /// Number of local authorities in the region ranking (5, 10, 15 or 20)
    ///
    /// Defaults to the configured value
    #[arg(short, long)]
    top_n: Option<u32>,

    /// Highlight the venues matching --name and --region
    #[arg(short, long)]
    show: bool,

    /// Print the available local authorities and exit
    #[arg(long)]
    list_regions: bool,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Write the cleaned table, rankings and summary as CSV files to this directory
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output the dashboard as JSON to stdout instead of a text summary
    ///
    /// Disables all progress logs; only outputs the final JSON.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = build_config(&args)?;

    let source = match args.input {
        Some(ref input) => {
            if !Path::new(input).exists() {
                return Err(anyhow!("Input file not found: {}", input));
            }
            DataSource::path(input)
        }
        None => DataSource::Bundled,
    };

    info!("Loading venues from: {}", source.name());
    let explorer = Explorer::load(config, &source)?;
    let report = explorer.report();
    info!(
        "Cleaned {} rows into {} venues ({} dropped)",
        report.rows_in,
        report.rows_out,
        report.rows_dropped()
    );

    if args.list_regions {
        for region in explorer.region_options() {
            println!("{}", region);
        }
        return Ok(());
    }

    let params = QueryParams {
        name_filter: args.name.clone(),
        region_filter: args.region.clone(),
        top_n: explorer.config().default_top_n,
        show_matches: args.show,
    };
    let dashboard = explorer.dashboard(&params);

    if let Some(ref dir) = args.output_dir {
        write_outputs(&explorer, &dashboard, Path::new(dir))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    let mut sink = TextSink::default();
    dashboard.render(&mut sink);
    Ok(())
}

/// Merge the optional config file with command line overrides.
fn build_config(args: &Args) -> Result<ExplorerConfig> {
    let base = match args.config {
        Some(ref path) => ExplorerConfig::from_json_file(path)
            .with_context(|| format!("Failed to read config file: {}", path))?,
        None => ExplorerConfig::default(),
    };

    let mut builder = ExplorerConfigBuilder::from_config(&base);
    if let Some(top_n) = args.top_n {
        builder = builder.default_top_n(TopN::try_from(top_n)?);
    }

    let config = builder.build()?;
    debug!("Using configuration: {:?}", config);
    Ok(config)
}

/// Write the cleaned table, the rankings and the summary listing as CSV.
fn write_outputs(explorer: &Explorer, dashboard: &Dashboard, dir: &Path) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
        info!("Created output directory: {}", dir.display());
    }

    let frames = vec![
        ("venues.csv", explorer.table().to_frame()?),
        ("top_local_authorities.csv", dashboard.regions.to_frame()?),
        ("top_postcode_prefixes.csv", dashboard.postcode_prefixes.to_frame()?),
        ("top_names.csv", dashboard.names.to_frame()?),
        ("summary.csv", presentation::summary_frame(&dashboard.summary)?),
    ];

    for (file_name, mut df) in frames {
        let path = dir.join(file_name);
        let mut file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .with_quote_char(b'"')
            .finish(&mut df)?;
        info!("Wrote {} rows to {}", df.height(), path.display());
    }

    Ok(())
}

/// Plain-text render sink for the terminal.
///
/// Uses `println!` intentionally: this is the primary output of the command
/// and must stay visible regardless of log level.
#[derive(Debug, Default)]
struct TextSink {
    sections: usize,
}

impl TextSink {
    fn heading(&mut self, title: &str) {
        if self.sections > 0 {
            println!();
        }
        self.sections += 1;
        println!("{}", title);
        println!("{}", "=".repeat(title.chars().count().min(80)));
    }
}

impl RenderSink for TextSink {
    fn map(&mut self, title: &str, layers: &MapLayers, view: &MapView) {
        self.heading(title);
        println!(
            "{} venues plotted (zoom {:.1}, height {}px)",
            layers.base.len(),
            view.zoom,
            view.height
        );

        let Some(ref highlight) = layers.highlight else {
            return;
        };
        println!("{} highlighted:", highlight.len());
        for point in highlight.iter().take(20) {
            println!(
                "  * {:<30} ({:.5}, {:.5}) {}",
                truncate_str(&point.name, 30),
                point.latitude,
                point.longitude,
                truncate_str(&point.address, 40)
            );
        }
        if highlight.len() > 20 {
            println!("  ... and {} more", highlight.len() - 20);
        }
    }

    fn chart(&mut self, series: &ChartSeries, caption: &str) {
        self.heading(&series.title);
        println!("{}", caption);
        println!("  {:<30} {:>8}", series.key_label, series.value_label);

        let total: usize = series.points.iter().map(|p| p.count).sum();
        for point in &series.points {
            let share = if total > 0 {
                point.count as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            let key = if point.key.is_empty() { "(none)" } else { point.key.as_str() };
            println!(
                "  {:<30} {:>8}  {:>5.1}%",
                truncate_str(key, 30),
                point.count,
                share
            );
        }
    }

    fn table(&mut self, title: &str, rows: &[SummaryRow]) {
        self.heading(title);
        println!(
            "  {:<8} {:<30} {:<10} {:<25} {:>5}",
            "id", "name", "postcode", "local_authority", "count"
        );
        for row in rows.iter().take(25) {
            println!(
                "  {:<8} {:<30} {:<10} {:<25} {:>5}",
                truncate_str(&row.id, 8),
                truncate_str(&row.name, 30),
                row.postcode.as_deref().unwrap_or(""),
                truncate_str(&row.region, 25),
                row.count
            );
        }
        if rows.len() > 25 {
            println!("  ... and {} more rows (use --output-dir for all)", rows.len() - 25);
        }
    }

    fn notice(&mut self, message: &str) {
        println!("! {}", message);
    }
}
