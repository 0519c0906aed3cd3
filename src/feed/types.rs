//! Feed definition types
//!
//! Declarative per-feed configuration for YAML parsing: where timestamps
//! come from, which columns rename into which fields, which are dropped,
//! and how the destination measurement is shaped. One normalizer
//! implementation is reused across feeds by swapping these definitions.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// ============================================================================
// Feed Definition
// ============================================================================

/// Top-level feed definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FeedDefinition {
    /// Feed name
    pub name: String,
    /// Destination measurement name
    pub measurement: String,
    /// Destination database name
    pub database: String,
    /// Cell delimiter of the tabular body
    #[serde(default)]
    pub delimiter: Delimiter,
    /// Whether the first line of each file is a metadata header
    #[serde(default = "default_true")]
    pub metadata_header: bool,
    /// Fixed metadata for feeds without a per-file header
    #[serde(default)]
    pub static_metadata: Option<StaticMetadata>,
    /// Where the record timestamp comes from
    pub timestamp: TimestampSpec,
    /// Column rename/drop mapping
    #[serde(default)]
    pub columns: ColumnsDef,
    /// Target field names and their types
    pub fields: BTreeMap<String, FieldType>,
    /// Fields a row must carry to be kept; rows missing any are dropped
    #[serde(default)]
    pub required: Vec<String>,
    /// Tag column names broadcast to every row
    #[serde(default = "default_tags")]
    pub tags: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_tags() -> Vec<String> {
    vec!["sensor_position".to_string(), "sensor_model".to_string()]
}

// ============================================================================
// Delimiter
// ============================================================================

/// Cell delimiter for the tabular body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    /// Comma-separated
    #[default]
    Comma,
    /// Tab-separated
    Tab,
}

impl Delimiter {
    /// The delimiter character
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }
}

// ============================================================================
// Static Metadata
// ============================================================================

/// Fixed sensor metadata for feeds whose files carry no header line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StaticMetadata {
    /// Deployment position
    pub position: String,
    /// Sensor model
    pub model: String,
    /// Offset token in the same `UTC+1` form a header would use
    pub utc_offset: String,
}

// ============================================================================
// Timestamp Spec
// ============================================================================

/// Where and how the local timestamp is read from a row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimestampSpec {
    /// A date/time column joined with a fractional-seconds column by `.`
    DateWithFraction {
        /// Column holding `YYYY-MM-DD HH:MM:SS`
        date_column: String,
        /// Column holding the fractional seconds digits
        frac_column: String,
        /// chrono parse format
        #[serde(default = "default_ts_format")]
        format: String,
    },
    /// A single timestamp column
    Single {
        /// Column holding the full local timestamp
        column: String,
        /// chrono parse format
        #[serde(default = "default_ts_format")]
        format: String,
    },
}

fn default_ts_format() -> String {
    "%Y-%m-%d %H:%M:%S%.f".to_string()
}

impl TimestampSpec {
    /// Column names consumed by timestamp reconstruction
    pub fn columns(&self) -> Vec<&str> {
        match self {
            TimestampSpec::DateWithFraction {
                date_column,
                frac_column,
                ..
            } => vec![date_column, frac_column],
            TimestampSpec::Single { column, .. } => vec![column],
        }
    }
}

// ============================================================================
// Column Mapping
// ============================================================================

/// Declarative column mapping: source column -> target field, or drop
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ColumnsDef {
    /// Source column name to target field name
    #[serde(default)]
    pub rename: HashMap<String, String>,
    /// Source columns discarded outright
    #[serde(default)]
    pub drop: Vec<String>,
}

// ============================================================================
// Field Type
// ============================================================================

/// Destination type of a field column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// 64-bit signed integer
    Integer,
    /// 64-bit float
    Float,
}
