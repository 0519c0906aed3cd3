//! Sensor metadata extraction
//!
//! Every sensor log carries a free-text first line describing the mission:
//! position, sensor model, and the UTC offset the clock was set to. This
//! module turns that line into a structured [`SensorMetadata`].
//!
//! # Overview
//!
//! - `parser` - splits the header line into its three tokens
//! - `offset` - resolves `UTC+2`-style tokens into signed hours

mod offset;
mod parser;

pub use offset::{format_offset, resolve_offset};
pub use parser::{parse_header_line, HeaderFields, DEFAULT_HEADER_SENTINEL};

use crate::error::Result;

/// Structured metadata for one sensor file, derived once from its header
/// line and immutable afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorMetadata {
    /// Deployment position (free text, becomes the `sensor_position` tag)
    pub position: String,
    /// Sensor model (becomes the `sensor_model` tag)
    pub model: String,
    /// Fixed hour offset the sensor clock was set to, in [-12, 14].
    ///
    /// This is a raw offset, not a timezone; the sensors are DST-naive.
    pub utc_offset_hours: i8,
}

impl SensorMetadata {
    /// Parse a header line into sensor metadata.
    ///
    /// The reserved "no metadata supplied" sentinel yields the documented
    /// default triple (`not_set` / `not_named` / UTC+0).
    pub fn from_header_line(line: &str) -> Result<Self> {
        let fields = parse_header_line(line)?;
        let utc_offset_hours = resolve_offset(&fields.offset_token)?;
        Ok(Self {
            position: fields.position,
            model: fields.model,
            utc_offset_hours,
        })
    }
}
