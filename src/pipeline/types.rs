//! Pipeline types
//!
//! Per-file outcomes and per-run statistics.

use std::path::PathBuf;

/// Terminal state of one file's trip through the pipeline.
///
/// `Discovered → MetadataParsed → Normalized` happen inside
/// [`Pipeline::process_file`](super::Pipeline::process_file); this enum
/// captures where the file ended up. Only written files move to the
/// processed directory; everything else stays in place for inspection or a
/// later retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Every chunk was accepted
    FullyWritten,
    /// At least one chunk was accepted, at least one timed out
    PartiallyWritten,
    /// Dry run: parsed and normalized, nothing written
    DryRun,
    /// Zero-byte file or zero data rows; explicit no-op
    Empty,
    /// Per-file error; the reason is the error's display text
    Skipped(String),
}

impl FileOutcome {
    /// Whether the file qualifies for the move to the processed directory
    pub fn is_written(&self) -> bool {
        matches!(
            self,
            FileOutcome::FullyWritten | FileOutcome::PartiallyWritten
        )
    }
}

/// Report for one processed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// The input file
    pub file: PathBuf,
    /// Where it ended up
    pub outcome: FileOutcome,
    /// Points written (0 for dry-run, empty, and skipped files)
    pub points: usize,
}

/// Statistics accumulated across one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Files considered
    pub files_seen: usize,
    /// Files fully or partially written
    pub files_written: usize,
    /// Files skipped on per-file errors
    pub files_skipped: usize,
    /// Empty files
    pub files_empty: usize,
    /// Total points written across all files
    pub points_written: usize,
    /// Run duration in milliseconds
    pub duration_ms: u64,
}

impl RunStats {
    /// Create empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file report into the totals
    pub fn record(&mut self, report: &FileReport) {
        self.files_seen += 1;
        self.points_written += report.points;
        match &report.outcome {
            FileOutcome::FullyWritten | FileOutcome::PartiallyWritten => {
                self.files_written += 1;
            }
            FileOutcome::Skipped(_) => self.files_skipped += 1,
            FileOutcome::Empty => self.files_empty += 1,
            FileOutcome::DryRun => {}
        }
    }

    /// Set run duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
