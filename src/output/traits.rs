//! Record writer trait and output errors

use crate::extract::Record;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur while exporting records
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Nothing to export")]
    Empty,
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Serializes records into one export format
pub trait RecordWriter {
    /// Writes `records` to `out`
    ///
    /// # Arguments
    ///
    /// * `records` - Records of one operation; key sets may differ between records
    /// * `columns` - Column order for tabular formats, covering every key of `records`
    /// * `out` - Destination
    fn write_records(
        &self,
        records: &[Record],
        columns: &[String],
        out: &mut dyn Write,
    ) -> OutputResult<()>;
}
