// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # sensorflux
//!
//! Ingests sensor measurement logs into InfluxDB. Free-text metadata
//! headers become tags, local clock readings become UTC timestamps, and
//! each file is written in bounded hour chunks before being moved out of
//! the intake directory.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sensorflux::feed::load_feed;
//! use sensorflux::pipeline::Pipeline;
//! use sensorflux::sink::{InfluxSink, InfluxSinkConfig};
//! use sensorflux::{Credentials, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let feed = load_feed("pressure")?;
//!     let credentials = Credentials::load("influxdb_credentials")?;
//!     let sink = InfluxSink::new(InfluxSinkConfig::default(), credentials)?;
//!
//!     let pipeline = Pipeline::new(&feed, &sink, chrono::Duration::hours(1));
//!     let report = pipeline.process_file("sensor_data/2024-08-01.csv".as_ref()).await?;
//!     println!("{} points written", report.points);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! sensor_data/*.csv
//!        │
//!        ▼
//! ┌──────────┬───────────┬────────────┬──────────────┐
//! │ metadata │  decode   │ normalize  │     sink     │
//! ├──────────┼───────────┼────────────┼──────────────┤
//! │ header   │ delimited │ UTC shift  │ hour chunks  │
//! │ offsets  │ table     │ tags/types │ line protocol│
//! └──────────┴───────────┴────────────┴──────────────┘
//!        │
//!        ▼
//! sensor_processed/*.csv
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for sensorflux
pub mod error;

/// Common types and type aliases
pub mod types;

/// Metadata header parsing and UTC offset resolution
pub mod metadata;

/// Delimited table decoding
pub mod decode;

/// Record normalization to UTC-timestamped tagged points
pub mod normalize;

/// Destination store output
pub mod sink;

/// Feed definitions and YAML loader
pub mod feed;

/// Store credentials
pub mod credentials;

/// Log sink setup
pub mod logging;

/// Per-file ingestion pipeline
pub mod pipeline;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use credentials::Credentials;
pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use feed::{load_feed, load_feed_from_str, FeedDefinition};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
