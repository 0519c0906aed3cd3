//! InfluxDB line-protocol encoding
//!
//! One line per point:
//! `measurement,tag=value field=value,field2=value2 <ns-timestamp>`
//! Integer fields carry the `i` suffix; timestamps are nanoseconds since
//! the epoch.

use crate::error::{Error, Result};
use crate::normalize::NormalizedRecord;
use crate::sink::Destination;
use crate::types::FieldValue;
use std::fmt::Write as _;

/// Encode a chunk of records into a line-protocol body.
///
/// Only tag and field columns listed in the destination descriptor are
/// emitted; tags or fields absent from a record are skipped.
pub fn encode_lines(dest: &Destination, records: &[NormalizedRecord]) -> Result<String> {
    let mut body = String::new();

    for record in records {
        let _ = write!(body, "{}", escape_measurement(&dest.measurement));

        for tag in &dest.tag_columns {
            if let Some(value) = record.tags.get(tag) {
                let _ = write!(body, ",{}={}", escape_key(tag), escape_key(value));
            }
        }

        let mut first_field = true;
        for field in &dest.field_columns {
            if let Some(value) = record.fields.get(field) {
                let sep = if first_field { ' ' } else { ',' };
                let _ = write!(body, "{sep}{}={}", escape_key(field), encode_field(value));
                first_field = false;
            }
        }
        if first_field {
            // A point with no fields is invalid line protocol; the
            // normalizer never produces one.
            return Err(Error::Other(format!(
                "record at {} has no fields for measurement '{}'",
                record.timestamp, dest.measurement
            )));
        }

        let nanos = record
            .timestamp
            .timestamp_nanos_opt()
            .ok_or_else(|| Error::timestamp_parse(record.timestamp.to_rfc3339(), "out of nanosecond range"))?;
        let _ = writeln!(body, " {nanos}");
    }

    Ok(body)
}

/// Encode a field value, suffixing integers per line protocol
fn encode_field(value: &FieldValue) -> String {
    match value {
        FieldValue::Integer(v) => format!("{v}i"),
        FieldValue::Float(v) => format!("{v}"),
    }
}

/// Escape a measurement name (commas and spaces)
fn escape_measurement(name: &str) -> String {
    name.replace(',', "\\,").replace(' ', "\\ ")
}

/// Escape a tag key, tag value, or field key (commas, equals, spaces)
fn escape_key(s: &str) -> String {
    s.replace(',', "\\,").replace('=', "\\=").replace(' ', "\\ ")
}
