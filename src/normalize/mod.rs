//! Record normalization
//!
//! Converts a [`RawRecordBatch`] plus resolved [`SensorMetadata`] into
//! ordered [`NormalizedRecord`]s: absolute UTC timestamps, broadcast tag
//! columns, and typed fields named per the feed's column mapping.
//!
//! Timestamps in the files are local to the sensor's configured offset;
//! subtracting `utc_offset_hours` yields UTC, so everything in the store is
//! UTC regardless of source offset.

mod schema;

use crate::decode::RawRecordBatch;
use crate::error::{Error, Result};
use crate::feed::{FeedDefinition, FieldType, UTC_OFFSET_FIELD};
use crate::metadata::SensorMetadata;
use crate::types::{FieldMap, FieldValue, TagMap};
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use schema::{build_plan, TimestampPlan};
use tracing::debug;

/// One normalized measurement point, ready for chunking and line-protocol
/// encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    /// Absolute UTC instant
    pub timestamp: DateTime<Utc>,
    /// Tag columns (identical for every row of a batch)
    pub tags: TagMap,
    /// Typed field columns
    pub fields: FieldMap,
}

/// Normalizer for one feed's input shape
#[derive(Debug)]
pub struct Normalizer<'a> {
    feed: &'a FeedDefinition,
}

impl<'a> Normalizer<'a> {
    /// Create a normalizer for a feed
    pub fn new(feed: &'a FeedDefinition) -> Self {
        Self { feed }
    }

    /// Normalize a batch.
    ///
    /// An empty batch is a no-op producing an empty sequence. Rows whose
    /// measured cells are all empty are dropped; the output order follows
    /// the input order.
    pub fn normalize(
        &self,
        batch: &RawRecordBatch,
        meta: &SensorMetadata,
    ) -> Result<Vec<NormalizedRecord>> {
        if batch.is_empty() && batch.columns.is_empty() {
            return Ok(Vec::new());
        }

        let plan = build_plan(batch, self.feed)?;
        let offset = Duration::hours(i64::from(meta.utc_offset_hours));

        let mut tags = TagMap::new();
        tags.insert("sensor_position".to_string(), meta.position.clone());
        tags.insert("sensor_model".to_string(), meta.model.clone());

        let mut records = Vec::with_capacity(batch.len());
        for (row_num, row) in batch.rows.iter().enumerate() {
            let local = parse_local_timestamp(row, &plan.timestamp)?;
            let timestamp = Utc.from_utc_datetime(&(local - offset));

            let mut fields = FieldMap::new();
            for field in &plan.fields {
                let raw = row[field.idx].as_str();
                if raw.is_empty() {
                    continue;
                }
                fields.insert(field.target.clone(), parse_field(&field.target, raw, field.field_type)?);
            }

            if fields.is_empty() {
                debug!(row = row_num, "dropping row with no field values");
                continue;
            }

            if let Some(missing) = self
                .feed
                .required
                .iter()
                .find(|r| !fields.contains_key(r.as_str()))
            {
                debug!(row = row_num, field = %missing, "dropping row missing required field");
                continue;
            }

            fields.insert(
                UTC_OFFSET_FIELD.to_string(),
                FieldValue::Integer(i64::from(meta.utc_offset_hours)),
            );

            records.push(NormalizedRecord {
                timestamp,
                tags: tags.clone(),
                fields,
            });
        }

        Ok(records)
    }
}

/// Reconstruct the row's local timestamp per the feed's timestamp plan
fn parse_local_timestamp(row: &[String], plan: &TimestampPlan) -> Result<NaiveDateTime> {
    let (value, format) = match plan {
        TimestampPlan::DateWithFraction {
            date_idx,
            frac_idx,
            format,
        } => (format!("{}.{}", row[*date_idx], row[*frac_idx]), format),
        TimestampPlan::Single { idx, format } => (row[*idx].clone(), format),
    };

    NaiveDateTime::parse_from_str(&value, format)
        .map_err(|e| Error::timestamp_parse(&value, e.to_string()))
}

/// Parse a raw cell into the declared field type
fn parse_field(column: &str, raw: &str, field_type: FieldType) -> Result<FieldValue> {
    match field_type {
        FieldType::Integer => raw
            .parse::<i64>()
            .map(FieldValue::Integer)
            .map_err(|_| Error::field_parse(column, raw)),
        FieldType::Float => raw
            .parse::<f64>()
            .map(FieldValue::Float)
            .map_err(|_| Error::field_parse(column, raw)),
    }
}

#[cfg(test)]
mod tests;
