//! Tabular input decoding
//!
//! Turns the data portion of a sensor file (everything below the metadata
//! header) into a [`RawRecordBatch`]: column names plus raw string rows.
//! Typing and timestamp reconstruction happen later in `normalize`.

mod csv;

pub use csv::TableDecoder;

/// Ordered rows read from one input file.
///
/// Created per file, consumed once by the normalizer, then discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecordBatch {
    /// Column names from the file's column-header row
    pub columns: Vec<String>,
    /// Data rows; each row has one cell per column
    pub rows: Vec<Vec<String>>,
}

impl RawRecordBatch {
    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the batch has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell value for a row index and column name
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }
}
