//! Extraction statistics
//!
//! Counts, per field, how many records fell back to the `NA` sentinel. A field
//! that is NA everywhere usually means the site changed that part of its markup.

use crate::extract::Record;

/// Extraction statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionStatistics {
    /// Number of records
    pub records: usize,

    /// Per field, in first-seen order: (field, records carrying the field, NA count)
    pub fields: Vec<(String, usize, usize)>,
}

impl ExtractionStatistics {
    pub fn from_records(records: &[Record]) -> Self {
        let mut fields: Vec<(String, usize, usize)> = Vec::new();
        for record in records {
            for (key, value) in record.iter() {
                let index = match fields.iter().position(|(name, _, _)| name == key) {
                    Some(index) => index,
                    None => {
                        fields.push((key.to_string(), 0, 0));
                        fields.len() - 1
                    }
                };
                fields[index].1 += 1;
                if value.is_not_available() {
                    fields[index].2 += 1;
                }
            }
        }
        Self {
            records: records.len(),
            fields,
        }
    }

    /// Total NA cells across every field
    pub fn total_missing(&self) -> usize {
        self.fields.iter().map(|(_, _, missing)| missing).sum()
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &ExtractionStatistics) {
    println!("=== Extraction Statistics ===\n");
    println!("Records: {}", stats.records);
    if stats.fields.is_empty() {
        return;
    }
    println!();

    println!("Fields (present / NA):");
    for (name, present, missing) in &stats.fields {
        let percentage = if *present > 0 {
            (*missing as f64 / *present as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} / {} ({:.1}% NA)", name, present, missing, percentage);
    }
    println!();
    println!("Total NA fields: {}", stats.total_missing());
}
