//! Destination store output
//!
//! # Overview
//!
//! - `chunk` - slices a normalized series into bounded time windows
//! - `line` - InfluxDB line-protocol encoding
//! - `influx` - HTTP client for the InfluxDB 1.x `/write` endpoint
//! - `writer` - drives chunk-by-chunk writes with point accounting
//!
//! The store itself sits behind the [`StoreSink`] trait so the pipeline and
//! its tests never need a live database.

mod chunk;
mod influx;
mod line;
mod writer;

pub use chunk::plan_chunks;
pub use influx::{InfluxSink, InfluxSinkConfig};
pub use line::encode_lines;
pub use writer::{ChunkedWriter, FileWriteSummary};

use crate::error::Result;
use crate::normalize::NormalizedRecord;
use async_trait::async_trait;

/// Destination descriptor: which measurement the points land in and which
/// columns travel as tags vs fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Measurement name
    pub measurement: String,
    /// Database name
    pub database: String,
    /// Tag column names
    pub tag_columns: Vec<String>,
    /// Field column names
    pub field_columns: Vec<String>,
}

/// Outcome of one chunk write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteResult {
    /// Whether the store accepted the call
    pub accepted: bool,
    /// Points written by this call
    pub point_count: usize,
}

/// A write destination for normalized records.
///
/// Exactly one implementation talks to a real store ([`InfluxSink`]); tests
/// substitute mocks.
#[async_trait]
pub trait StoreSink: Send + Sync {
    /// Write one chunk of records
    async fn write(&self, dest: &Destination, records: &[NormalizedRecord])
        -> Result<WriteResult>;

    /// Check that the store is reachable
    async fn ping(&self) -> Result<()>;
}
