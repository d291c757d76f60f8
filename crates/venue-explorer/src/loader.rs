//! Tabular data loading.
//!
//! Reads a delimited text resource with polars, every cell as text, and maps
//! columns onto [`RawRecord`] fields. The first row is treated as a header when
//! it names known fields; otherwise columns are mapped by the fixed order in
//! [`POSITIONAL_COLUMNS`].

use crate::error::{ExplorerError, Result};
use crate::types::{POSITIONAL_COLUMNS, REGION_ALIASES, RawRecord, RawTable};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::io::Cursor;
use std::path::PathBuf;
use tracing::{debug, info};

/// Sample dataset compiled into the crate.
pub const BUNDLED_SAMPLE: &str = include_str!("../data/open_pubs_sample.csv");

/// Where the raw table comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DataSource {
    /// The sample dataset shipped with the crate.
    #[default]
    Bundled,
    /// A CSV file on disk.
    Path(PathBuf),
    /// CSV content already in memory.
    Bytes { name: String, content: Vec<u8> },
}

impl DataSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        DataSource::Path(path.into())
    }

    pub fn bytes(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        DataSource::Bytes {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Human-readable name used in logs and errors.
    pub fn name(&self) -> String {
        match self {
            DataSource::Bundled => "bundled sample".to_string(),
            DataSource::Path(path) => path.display().to_string(),
            DataSource::Bytes { name, .. } => name.clone(),
        }
    }
}

/// Loads raw venue tables.
pub struct DataLoader;

impl DataLoader {
    /// Read the source into a [`RawTable`].
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::DataSource`] if the resource cannot be opened
    /// or parsed, or has zero columns.
    pub fn load(source: &DataSource) -> Result<RawTable> {
        let source_name = source.name();
        info!("Loading dataset from: {}", source_name);

        let df = Self::read_frame(source)
            .map_err(|e| ExplorerError::data_source(&source_name, e))?;

        let table = Self::from_frame(&df, &source_name)?;
        info!("Dataset loaded: {} rows", table.len());
        Ok(table)
    }

    fn read_frame(source: &DataSource) -> PolarsResult<DataFrame> {
        // Headers are detected by hand, and a schema length of 0 reads every
        // column as String so that coercion stays in the cleaner. Invalid
        // UTF-8 is replaced rather than failing the whole source.
        let options = CsvReadOptions::default()
            .with_has_header(false)
            .with_infer_schema_length(Some(0))
            .with_parse_options(
                CsvParseOptions::default()
                    .with_encoding(CsvEncoding::LossyUtf8)
                    .with_quote_char(Some(b'"'))
                    .with_truncate_ragged_lines(true),
            );

        match source {
            DataSource::Path(path) => options
                .try_into_reader_with_file_path(Some(path.clone()))?
                .finish(),
            DataSource::Bundled => options
                .into_reader_with_file_handle(Cursor::new(BUNDLED_SAMPLE.as_bytes().to_vec()))
                .finish(),
            DataSource::Bytes { content, .. } => options
                .into_reader_with_file_handle(Cursor::new(content.clone()))
                .finish(),
        }
    }

    /// Map a text DataFrame without header onto raw records.
    pub fn from_frame(df: &DataFrame, source_name: &str) -> Result<RawTable> {
        if df.width() == 0 {
            return Err(ExplorerError::data_source(source_name, "no columns"));
        }

        let columns: Vec<Vec<Option<String>>> = df
            .get_columns()
            .iter()
            .map(|col| {
                let series = col.as_materialized_series().cast(&DataType::String)?;
                Ok(series
                    .str()?
                    .into_iter()
                    .map(|value| value.map(str::to_string))
                    .collect())
            })
            .collect::<PolarsResult<_>>()
            .map_err(|e| ExplorerError::data_source(source_name, e))?;

        let first_row: Vec<Option<&str>> =
            columns.iter().map(|col| col.first().and_then(|v| v.as_deref())).collect();

        let (mapping, skip) = match header_mapping(&first_row) {
            Some(mapping) => {
                debug!("Header row detected, mapping columns by name");
                (mapping, 1)
            }
            None => {
                debug!("No header row, mapping columns by position");
                (positional_mapping(df.width()), 0)
            }
        };

        let records = (skip..df.height())
            .map(|row| {
                let mut record = RawRecord::default();
                for (field, col) in &mapping {
                    record.set_field(field, columns[*col][row].clone());
                }
                record
            })
            .collect();

        Ok(RawTable::new(records))
    }
}

/// Read a source into a raw table.
pub fn load(source: &DataSource) -> Result<RawTable> {
    DataLoader::load(source)
}

/// Canonical field name for a header cell, if it names one.
fn canonical_field(header: &str) -> Option<&'static str> {
    let normalized = header.trim().trim_matches('"').trim().to_ascii_lowercase();
    if REGION_ALIASES.contains(&normalized.as_str()) {
        return Some("region");
    }
    POSITIONAL_COLUMNS
        .iter()
        .copied()
        .find(|field| *field == normalized)
}

/// Field-to-column mapping from a header row, or `None` if the row is data.
///
/// A row is a header when at least two of its cells name known fields. The
/// first column naming a field wins.
fn header_mapping(first_row: &[Option<&str>]) -> Option<Vec<(&'static str, usize)>> {
    let mut mapping: Vec<(&'static str, usize)> = Vec::new();
    for (col, cell) in first_row.iter().enumerate() {
        if let Some(field) = cell.and_then(canonical_field)
            && !mapping.iter().any(|(f, _)| *f == field)
        {
            mapping.push((field, col));
        }
    }

    if mapping.len() >= 2 { Some(mapping) } else { None }
}

fn positional_mapping(width: usize) -> Vec<(&'static str, usize)> {
    POSITIONAL_COLUMNS
        .iter()
        .copied()
        .take(width)
        .enumerate()
        .map(|(col, field)| (field, col))
        .collect()
}
