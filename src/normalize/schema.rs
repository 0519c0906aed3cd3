//! Batch schema resolution
//!
//! Resolves a batch's column-header row against a feed definition into a
//! [`SchemaPlan`]: per-column decisions computed once per file instead of
//! per row. Unmapped columns are an error, never silently ignored.

use crate::decode::RawRecordBatch;
use crate::error::{Error, Result};
use crate::feed::{FeedDefinition, FieldType, TimestampSpec};

/// Column indices feeding timestamp reconstruction
#[derive(Debug, Clone)]
pub(crate) enum TimestampPlan {
    /// Date column joined with fractional-seconds column by a literal `.`
    DateWithFraction {
        date_idx: usize,
        frac_idx: usize,
        format: String,
    },
    /// Single timestamp column
    Single { idx: usize, format: String },
}

/// One mapped field column: source index, target name, destination type
#[derive(Debug, Clone)]
pub(crate) struct FieldPlan {
    pub idx: usize,
    pub target: String,
    pub field_type: FieldType,
}

/// Per-batch plan: where timestamps come from and which columns become
/// which fields
#[derive(Debug, Clone)]
pub(crate) struct SchemaPlan {
    pub timestamp: TimestampPlan,
    pub fields: Vec<FieldPlan>,
}

/// Resolve a batch's columns against the feed definition.
///
/// Every column must be a timestamp source, a rename target, or explicitly
/// dropped; anything else is a `SchemaMismatch`.
pub(crate) fn build_plan(batch: &RawRecordBatch, feed: &FeedDefinition) -> Result<SchemaPlan> {
    let timestamp = match &feed.timestamp {
        TimestampSpec::DateWithFraction {
            date_column,
            frac_column,
            format,
        } => TimestampPlan::DateWithFraction {
            date_idx: require_column(batch, date_column)?,
            frac_idx: require_column(batch, frac_column)?,
            format: format.clone(),
        },
        TimestampSpec::Single { column, format } => TimestampPlan::Single {
            idx: require_column(batch, column)?,
            format: format.clone(),
        },
    };

    let ts_columns = feed.timestamp.columns();
    let mut fields = Vec::new();

    for (idx, column) in batch.columns.iter().enumerate() {
        if ts_columns.contains(&column.as_str()) {
            continue;
        }
        if feed.columns.drop.iter().any(|c| c == column) {
            continue;
        }
        let Some(target) = feed.columns.rename.get(column) else {
            return Err(Error::schema_mismatch(column));
        };
        // Rename targets are checked against declared fields at feed load.
        let field_type = feed
            .fields
            .get(target)
            .copied()
            .ok_or_else(|| Error::feed(format!("field '{target}' has no declared type")))?;
        fields.push(FieldPlan {
            idx,
            target: target.clone(),
            field_type,
        });
    }

    Ok(SchemaPlan { timestamp, fields })
}

fn require_column(batch: &RawRecordBatch, name: &str) -> Result<usize> {
    batch
        .column_index(name)
        .ok_or_else(|| Error::schema_mismatch(name))
}
