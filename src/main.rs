// Allow common clippy pedantic lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! sensorflux CLI
//!
//! Command-line interface for the sensor log ingestion tool

use clap::Parser;
use sensorflux::cli::{Cli, Runner};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to a file; cron runs have no terminal to read.
    if let Err(e) = sensorflux::logging::init("logs", sensorflux::NAME, cli.verbose) {
        eprintln!("Error: failed to initialize logging: {e}");
        std::process::exit(1);
    }

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
