//! Output module for exporting scraped records
//!
//! This module handles:
//! - Column ordering across records with heterogeneous key sets
//! - Timestamped export file naming
//! - TSV and JSON serialization
//! - Extraction statistics

mod json;
pub mod stats;
mod traits;
mod tsv;

pub use json::JsonWriter;
pub use stats::{print_statistics, ExtractionStatistics};
pub use traits::{OutputError, OutputResult, RecordWriter};
pub use tsv::TsvWriter;

use crate::config::{ExportFormat, OutputConfig};
use crate::extract::{Record, NOT_AVAILABLE};
use chrono::{DateTime, Utc};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// The operation an export comes from; names the file and orders the columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Album,
    Artist,
    Timeline,
    Chart,
    Discography,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Album => "album",
            Self::Artist => "artist",
            Self::Timeline => "album_timeline",
            Self::Chart => "chart",
            Self::Discography => "discography",
        }
    }

    /// Columns listed first, in this order, when present in any record
    pub fn preferred_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Album => &["Name", "Artist", "Type", "Released", "Genres", "Descriptors"],
            Self::Artist => &["Name", "Formed", "Born", "Members", "Genres", "Followers"],
            Self::Timeline => &["Date", "User"],
            Self::Chart => &[
                "Rank",
                "Artist",
                "Album",
                "Date",
                "Genres",
                "Secondary Genres",
                "RYM Rating",
                "Ratings",
                "Reviews",
            ],
            Self::Discography => &[
                "Artist",
                "Name",
                "URL",
                "Category",
                "Type",
                "Year",
                "Date",
                "Average Rating",
                "Ratings",
                "Reviews",
                "Genres",
                "Language",
                "Descriptors",
                "Recorded",
                "Rank Overall",
                "Rank Year",
            ],
        }
    }
}

impl Operation {
    /// Name of the item a record belongs to, for per-item exports
    ///
    /// Albums are keyed by `Artist - Name`, artists by `Name` and discography
    /// entries by their `Artist`. Charts and timelines have no items.
    pub fn item_label(&self, record: &Record) -> Option<String> {
        let field = |key: &str| {
            record
                .text(key)
                .filter(|value| !value.is_empty() && *value != NOT_AVAILABLE)
        };
        match self {
            Self::Album => match (field("Artist"), field("Name")) {
                (Some(artist), Some(name)) => Some(format!("{} - {}", artist, name)),
                (None, Some(name)) => Some(name.to_string()),
                _ => None,
            },
            Self::Artist => field("Name").map(str::to_string),
            Self::Discography => field("Artist").map(str::to_string),
            Self::Timeline | Self::Chart => None,
        }
    }
}

/// Returns the writer for an export format
pub fn writer_for(format: ExportFormat) -> Box<dyn RecordWriter> {
    match format {
        ExportFormat::Tsv => Box::new(TsvWriter),
        ExportFormat::Json => Box::new(JsonWriter),
    }
}

/// Column order: preferred columns that occur in the records, then every
/// other key in first-seen order
pub fn columns(records: &[Record], preferred: &[&str]) -> Vec<String> {
    let mut columns: Vec<String> = preferred
        .iter()
        .filter(|name| records.iter().any(|r| r.contains(name)))
        .map(|name| name.to_string())
        .collect();

    for record in records {
        for key in record.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.to_string());
            }
        }
    }
    columns
}

/// `{dir}/{unix_ts}_export_{operation}[_{suffix}].{ext}`
///
/// The suffix is reduced to characters safe in file names.
pub fn export_path(
    dir: &Path,
    operation: Operation,
    suffix: Option<&str>,
    format: ExportFormat,
    now: DateTime<Utc>,
) -> PathBuf {
    let mut name = format!("{}_export_{}", now.timestamp(), operation.name());
    if let Some(suffix) = suffix.map(sanitize).filter(|s| !s.is_empty()) {
        name.push('_');
        name.push_str(&suffix);
    }
    name.push('.');
    name.push_str(format.extension());
    dir.join(name)
}

/// Writes `records` to a new timestamped file under the configured directory
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(OutputError::Empty)` - No records to export; nothing was written
/// * `Err(OutputError)` - The directory or file could not be written
pub fn export(
    records: &[Record],
    operation: Operation,
    suffix: Option<&str>,
    output: &OutputConfig,
) -> OutputResult<PathBuf> {
    if records.is_empty() {
        return Err(OutputError::Empty);
    }

    let dir = Path::new(&output.directory);
    fs::create_dir_all(dir)?;
    let path = export_path(dir, operation, suffix, output.format, Utc::now());

    let columns = columns(records, operation.preferred_columns());
    let mut out = BufWriter::new(File::create(&path)?);
    writer_for(output.format).write_records(records, &columns, &mut out)?;
    out.flush()?;

    tracing::info!("Exported {} records to {}", records.len(), path.display());
    Ok(path)
}

/// Writes one file per item, next to the combined export
///
/// Records without an item label are left out. Items keep first-seen order.
pub fn export_each(
    records: &[Record],
    operation: Operation,
    output: &OutputConfig,
) -> OutputResult<Vec<PathBuf>> {
    let mut items: Vec<(String, Vec<Record>)> = Vec::new();
    for record in records {
        let Some(label) = operation.item_label(record) else {
            tracing::debug!("Record without {} name left out of separate export", operation.name());
            continue;
        };
        match items.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, group)) => group.push(record.clone()),
            None => items.push((label, vec![record.clone()])),
        }
    }

    items
        .iter()
        .map(|(label, group)| export(group, operation, Some(label), output))
        .collect()
}

fn sanitize(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect::<String>()
        .trim_matches('.')
        .to_string()
}
