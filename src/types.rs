//! Common types used throughout sensorflux
//!
//! Shared type definitions and aliases used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Tag columns for one record: tag name to string value.
///
/// Ordered map so line-protocol output is deterministic.
pub type TagMap = BTreeMap<String, String>;

/// Field columns for one record: field name to typed numeric value
pub type FieldMap = BTreeMap<String, FieldValue>;

// ============================================================================
// Field Values
// ============================================================================

/// A typed numeric field value.
///
/// InfluxDB distinguishes integer and float fields and rejects writes that
/// change a field's type, so the distinction is carried from feed
/// configuration all the way to the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// 64-bit signed integer field
    Integer(i64),
    /// 64-bit float field
    Float(f64),
}

impl FieldValue {
    /// The value as f64, for range checks and display
    pub fn as_f64(&self) -> f64 {
        match self {
            FieldValue::Integer(v) => *v as f64,
            FieldValue::Float(v) => *v,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(v) => write!(f, "{v}"),
            FieldValue::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}
