//! Delimiter-separated table decoder
//!
//! Hand-rolled line splitter with quote handling; the inputs are small
//! machine-written exports, comma- or tab-separated depending on the feed.

use super::RawRecordBatch;
use crate::error::{Error, Result};

/// Decoder for delimiter-separated tabular text
#[derive(Debug, Clone)]
pub struct TableDecoder {
    /// Field delimiter
    delimiter: char,
}

impl Default for TableDecoder {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

impl TableDecoder {
    /// Create a decoder with the given delimiter
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Decode a table body into a batch.
    ///
    /// The first non-empty line is the column-header row. Blank lines are
    /// skipped. A row with a different cell count than the header is a
    /// `CsvParse` error. An empty body yields an empty batch.
    pub fn decode(&self, body: &str) -> Result<RawRecordBatch> {
        let mut lines = body.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

        let Some((_, header_line)) = lines.next() else {
            return Ok(RawRecordBatch::default());
        };
        let columns = split_line(header_line, self.delimiter);

        let mut rows = Vec::new();
        for (line_num, line) in lines {
            let cells = split_line(line, self.delimiter);
            if cells.len() != columns.len() {
                return Err(Error::csv_parse(format!(
                    "line {}: expected {} cells, found {}",
                    line_num + 1,
                    columns.len(),
                    cells.len()
                )));
            }
            rows.push(cells);
        }

        Ok(RawRecordBatch { columns, rows })
    }
}

/// Split a delimited line into trimmed cells, honoring double quotes
fn split_line(line: &str, delimiter: char) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '"' {
            if in_quotes {
                // Check for escaped quote
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                in_quotes = true;
            }
        } else if c == delimiter && !in_quotes {
            cells.push(current.trim().to_string());
            current = String::new();
        } else {
            current.push(c);
        }
    }

    cells.push(current.trim().to_string());
    cells
}
