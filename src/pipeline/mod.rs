//! Per-file ingestion pipeline
//!
//! Processes one file at a time, fully, before the next is considered:
//! read, parse metadata, normalize, write chunk by chunk. The driver (the
//! CLI runner) owns discovery and the post-write move; this module owns the
//! `Discovered → MetadataParsed → Normalized → written-or-skipped` leg.

mod types;

pub use types::{FileOutcome, FileReport, RunStats};

use crate::error::{Error, Result};
use crate::feed::FeedDefinition;
use crate::metadata::SensorMetadata;
use crate::normalize::Normalizer;
use crate::sink::{ChunkedWriter, Destination, StoreSink};
use chrono::Duration;
use std::path::Path;
use tracing::info;

/// Ingestion pipeline for one feed
pub struct Pipeline<'a> {
    feed: &'a FeedDefinition,
    sink: &'a dyn StoreSink,
    dest: Destination,
    chunk_width: Duration,
    dry_run: bool,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline over a feed and a store sink
    pub fn new(feed: &'a FeedDefinition, sink: &'a dyn StoreSink, chunk_width: Duration) -> Self {
        Self {
            feed,
            sink,
            dest: feed.destination(),
            chunk_width,
            dry_run: false,
        }
    }

    /// Enable dry-run mode: parse and normalize only, never write
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The destination this pipeline writes to
    pub fn destination(&self) -> &Destination {
        &self.dest
    }

    /// Process one file end to end.
    ///
    /// Per-file errors (malformed header, schema mismatch, unparseable
    /// rows) surface as `Err` and are the caller's cue to skip the file;
    /// fatal store errors also surface as `Err` and abort the run. Empty
    /// files are an explicit no-op outcome, not an error.
    pub async fn process_file(&self, path: &Path) -> Result<FileReport> {
        info!(file = %path.display(), "processing file");

        if std::fs::metadata(path)?.len() == 0 {
            return Ok(FileReport {
                file: path.to_path_buf(),
                outcome: FileOutcome::Empty,
                points: 0,
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let (meta, body) = self.split_metadata(&contents)?;

        let batch = self.feed.decoder().decode(body)?;
        let records = Normalizer::new(self.feed).normalize(&batch, &meta)?;

        if records.is_empty() {
            return Ok(FileReport {
                file: path.to_path_buf(),
                outcome: FileOutcome::Empty,
                points: 0,
            });
        }

        if self.dry_run {
            info!(
                file = %path.display(),
                points = records.len(),
                "dry run: normalized without writing"
            );
            return Ok(FileReport {
                file: path.to_path_buf(),
                outcome: FileOutcome::DryRun,
                points: 0,
            });
        }

        let writer = ChunkedWriter::new(self.sink, &self.dest, self.chunk_width);
        let summary = writer.write_series(&records).await?;

        let outcome = if !summary.written {
            FileOutcome::Skipped("store accepted no points".to_string())
        } else if summary.chunks_timed_out > 0 {
            FileOutcome::PartiallyWritten
        } else {
            FileOutcome::FullyWritten
        };

        Ok(FileReport {
            file: path.to_path_buf(),
            outcome,
            points: summary.points,
        })
    }

    /// Resolve per-file metadata and return it with the tabular body.
    ///
    /// Feeds with a metadata header consume the first line; headerless
    /// feeds use the static metadata from their definition.
    fn split_metadata<'c>(&self, contents: &'c str) -> Result<(SensorMetadata, &'c str)> {
        if self.feed.metadata_header {
            let (first_line, body) = contents.split_once('\n').unwrap_or((contents, ""));
            let meta = SensorMetadata::from_header_line(first_line)?;
            Ok((meta, body))
        } else {
            let meta = self.feed.resolve_static_metadata()?.ok_or_else(|| {
                Error::feed("headerless feed is missing static_metadata")
            })?;
            Ok((meta, contents))
        }
    }
}
