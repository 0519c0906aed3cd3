//! CLI module
//!
//! Command-line interface for the ingestion tool.
//!
//! # Commands
//!
//! - `run` - Ingest all pending files for a feed
//! - `validate` - Validate a feed definition
//! - `feeds` - List built-in feeds

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
