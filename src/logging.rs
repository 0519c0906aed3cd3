//! Log sink setup
//!
//! Each invocation writes one log file into a fixed relative log
//! directory, created on demand; the file is truncated at startup, so it
//! holds exactly the latest run. Intended for cron-driven runs where
//! stderr goes nowhere useful.

use crate::error::Result;
use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

/// Initialize the global tracing subscriber with a file writer.
///
/// The log file is truncated per invocation, matching a
/// one-log-per-scheduled-run retention model. `RUST_LOG` still controls
/// filtering, defaulting to INFO (DEBUG when `verbose`).
pub fn init(log_dir: impl AsRef<Path>, name: &str, verbose: bool) -> Result<()> {
    let log_dir = log_dir.as_ref();
    fs::create_dir_all(log_dir)?;

    let log_file = File::create(log_dir.join(format!("{name}.log")))?;

    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // try_init so repeated initialization (tests, embedding) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.into()),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    Ok(())
}
