use crate::extract::Record;
use crate::output::traits::{OutputResult, RecordWriter};
use std::io::Write;

/// Pretty-printed JSON array of objects, keys in record order
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonWriter;

impl RecordWriter for JsonWriter {
    fn write_records(
        &self,
        records: &[Record],
        _columns: &[String],
        out: &mut dyn Write,
    ) -> OutputResult<()> {
        serde_json::to_writer_pretty(&mut *out, records)?;
        writeln!(out)?;
        Ok(())
    }
}
