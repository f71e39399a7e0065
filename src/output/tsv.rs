use crate::extract::Record;
use crate::output::traits::{OutputResult, RecordWriter};
use std::io::{self, Write};

const SEPARATOR: char = '\t';

/// Tab-separated values with a header row
///
/// Missing cells are left empty and list values are joined with `", "`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TsvWriter;

impl RecordWriter for TsvWriter {
    fn write_records(
        &self,
        records: &[Record],
        columns: &[String],
        out: &mut dyn Write,
    ) -> OutputResult<()> {
        write_row(&mut *out, columns)?;
        for record in records {
            let row: Vec<String> = columns
                .iter()
                .map(|column| record.get(column).map(|v| v.to_cell()).unwrap_or_default())
                .collect();
            write_row(&mut *out, &row)?;
        }
        Ok(())
    }
}

fn needs_quotes(field: &str) -> bool {
    field.contains(SEPARATOR) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_row<W: Write>(mut w: W, row: &[String]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", SEPARATOR)?;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}
