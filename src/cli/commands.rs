//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sensor CSV to InfluxDB ingestion CLI
#[derive(Parser, Debug)]
#[command(name = "sensorflux")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest all pending files for a feed
    Run {
        /// Feed to ingest: built-in name or path to a feed YAML file
        #[arg(short, long, default_value = "pressure")]
        feed: String,

        /// Directory holding pending input files
        #[arg(long, default_value = "sensor_data")]
        data_dir: PathBuf,

        /// Directory written files are moved into
        #[arg(long, default_value = "sensor_processed")]
        processed_dir: PathBuf,

        /// Store credentials file (JSON with username/password)
        #[arg(long, default_value = "influxdb_credentials")]
        credentials: PathBuf,

        /// Store base URL
        #[arg(long, default_value = "http://localhost:8086")]
        url: String,

        /// Store request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout_secs: u64,

        /// Chunk window width in hours
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(i64).range(1..))]
        chunk_hours: i64,

        /// Parse and normalize without writing or moving anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate a feed definition
    Validate {
        /// Feed to validate: built-in name or path to a feed YAML file
        feed: String,
    },

    /// List built-in feeds
    Feeds,
}
