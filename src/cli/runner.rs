//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::feed::{list_builtin, load_feed, FeedDefinition};
use crate::pipeline::{FileOutcome, FileReport, Pipeline, RunStats};
use crate::sink::{InfluxSink, InfluxSinkConfig, StoreSink};
use chrono::Duration;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Run {
                feed,
                data_dir,
                processed_dir,
                credentials,
                url,
                timeout_secs,
                chunk_hours,
                dry_run,
            } => {
                let options = RunOptions {
                    feed,
                    data_dir,
                    processed_dir,
                    credentials,
                    url,
                    timeout_secs: *timeout_secs,
                    chunk_hours: *chunk_hours,
                    dry_run: *dry_run,
                };
                self.run_ingest(&options).await
            }
            Commands::Validate { feed } => Self::validate(feed),
            Commands::Feeds => Self::list_feeds(),
        }
    }

    /// Ingest every pending file for one feed
    async fn run_ingest(&self, options: &RunOptions<'_>) -> Result<()> {
        let start = Instant::now();
        let feed = load_feed(options.feed)?;

        if !options.data_dir.is_dir() {
            return Err(Error::MissingDataDir {
                path: options.data_dir.display().to_string(),
            });
        }

        let credentials = Credentials::load(options.credentials)?;
        std::fs::create_dir_all(options.processed_dir)?;

        let sink = InfluxSink::new(
            InfluxSinkConfig {
                base_url: options.url.to_string(),
                timeout: std::time::Duration::from_secs(options.timeout_secs),
            },
            credentials,
        )?;

        if options.dry_run {
            info!(feed = %feed.name, "dry run: nothing will be written or moved");
        } else {
            Self::check_store(&sink).await?;
        }

        let pipeline =
            Pipeline::new(&feed, &sink, Duration::hours(options.chunk_hours)).with_dry_run(options.dry_run);

        let files = discover_files(options.data_dir)?;
        info!(
            feed = %feed.name,
            files = files.len(),
            dir = %options.data_dir.display(),
            "starting run"
        );

        let mut stats = RunStats::new();
        for file in &files {
            let report = match pipeline.process_file(file).await {
                Ok(report) => report,
                Err(e) if e.is_file_skip() => {
                    warn!(file = %file.display(), error = %e, "skipping file");
                    FileReport {
                        file: file.clone(),
                        outcome: FileOutcome::Skipped(e.to_string()),
                        points: 0,
                    }
                }
                Err(e) => return Err(e),
            };

            if report.outcome.is_written() && !options.dry_run {
                move_to_processed(file, options.processed_dir)?;
            }
            stats.record(&report);
        }

        stats.set_duration(start.elapsed().as_millis() as u64);
        info!(
            files_seen = stats.files_seen,
            files_written = stats.files_written,
            files_skipped = stats.files_skipped,
            files_empty = stats.files_empty,
            points_written = stats.points_written,
            duration_ms = stats.duration_ms,
            "run complete"
        );

        Ok(())
    }

    /// Verify the store is reachable before processing any file.
    ///
    /// A timeout here is not conclusive, so the run proceeds; a refused
    /// connection means every write would fail and aborts up front.
    async fn check_store(sink: &InfluxSink) -> Result<()> {
        match sink.ping().await {
            Ok(()) => Ok(()),
            Err(e) if e.is_transient() => {
                warn!(error = %e, "store ping timed out, continuing");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Validate a feed definition and print a short summary
    fn validate(feed: &str) -> Result<()> {
        let feed: FeedDefinition = load_feed(feed)?;
        println!(
            "feed '{}' is valid: measurement '{}' in database '{}', {} fields, {} tags",
            feed.name,
            feed.measurement,
            feed.database,
            feed.fields.len(),
            feed.tags.len()
        );
        Ok(())
    }

    /// List built-in feed names
    fn list_feeds() -> Result<()> {
        for name in list_builtin() {
            println!("{name}");
        }
        Ok(())
    }
}

/// Arguments of the `run` subcommand
struct RunOptions<'a> {
    feed: &'a str,
    data_dir: &'a Path,
    processed_dir: &'a Path,
    credentials: &'a Path,
    url: &'a str,
    timeout_secs: u64,
    chunk_hours: i64,
    dry_run: bool,
}

/// Pending input files in the data directory, sorted by name.
///
/// Only `*.csv` files are considered; anything else in the directory is
/// ignored so partial downloads and editor droppings stay untouched.
fn discover_files(data_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(data_dir)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Move a written file into the processed directory, keeping its name
fn move_to_processed(file: &Path, processed_dir: &Path) -> Result<()> {
    let file_name = file
        .file_name()
        .ok_or_else(|| Error::Other(format!("invalid file path: {}", file.display())))?;
    let target = processed_dir.join(file_name);
    std::fs::rename(file, &target)?;
    info!(from = %file.display(), to = %target.display(), "moved processed file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.csv"), "x").unwrap();
        std::fs::write(dir.path().join("a.csv"), "x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        std::fs::write(dir.path().join("c.CSV"), "x").unwrap();
        std::fs::create_dir(dir.path().join("nested.csv")).unwrap();

        let files = discover_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv", "c.CSV"]);
    }

    #[test]
    fn test_move_to_processed_keeps_name() {
        let dir = tempfile::tempdir().unwrap();
        let processed = dir.path().join("processed");
        std::fs::create_dir(&processed).unwrap();
        let file = dir.path().join("2024-08-01.csv");
        std::fs::write(&file, "data").unwrap();

        move_to_processed(&file, &processed).unwrap();
        assert!(!file.exists());
        assert!(processed.join("2024-08-01.csv").exists());
    }
}
