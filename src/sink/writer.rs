//! Chunked series writer
//!
//! Drives [`plan_chunks`] output through a [`StoreSink`] one window at a
//! time, accounting for points per file. Failure policy:
//!
//! - timeout-class chunk failures are logged and the remaining chunks still
//!   go out (partial-file writes are acceptable and visible in the count)
//! - connection-class and rejection failures propagate and abort the run,
//!   since every later chunk would fail the same way

use super::{plan_chunks, Destination, StoreSink};
use crate::error::Result;
use crate::normalize::NormalizedRecord;
use chrono::Duration;
use tracing::{info, warn};

/// Per-file outcome of writing a normalized series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileWriteSummary {
    /// Whether at least one chunk was accepted with points
    pub written: bool,
    /// Points written across all accepted chunks
    pub points: usize,
    /// Chunks accepted
    pub chunks_written: usize,
    /// Chunks lost to timeouts
    pub chunks_timed_out: usize,
}

/// Writes a normalized series to a store in bounded time windows
pub struct ChunkedWriter<'a> {
    sink: &'a dyn StoreSink,
    dest: &'a Destination,
    chunk_width: Duration,
}

impl<'a> ChunkedWriter<'a> {
    /// Create a writer for one destination
    pub fn new(sink: &'a dyn StoreSink, dest: &'a Destination, chunk_width: Duration) -> Self {
        Self {
            sink,
            dest,
            chunk_width,
        }
    }

    /// Write a time-ordered series chunk by chunk.
    ///
    /// Returns the per-file summary; an empty series produces the default
    /// `(written=false, points=0)` summary without touching the store.
    pub async fn write_series(&self, records: &[NormalizedRecord]) -> Result<FileWriteSummary> {
        let mut summary = FileWriteSummary::default();

        for chunk in plan_chunks(records, self.chunk_width) {
            match self.sink.write(self.dest, chunk).await {
                Ok(result) => {
                    if result.accepted && result.point_count == 0 {
                        // The store took the call but stored nothing; not a
                        // failure, but worth surfacing.
                        warn!(
                            measurement = %self.dest.measurement,
                            "store accepted chunk but reported zero written points"
                        );
                    }
                    if result.accepted {
                        summary.chunks_written += 1;
                        summary.points += result.point_count;
                        if result.point_count > 0 {
                            summary.written = true;
                        }
                    }
                    info!(points = result.point_count, "processed chunk");
                }
                Err(e) if e.is_transient() => {
                    summary.chunks_timed_out += 1;
                    warn!(error = %e, "chunk write timed out, continuing with next chunk");
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            points = summary.points,
            chunks = summary.chunks_written,
            "processed file series"
        );
        Ok(summary)
    }
}
