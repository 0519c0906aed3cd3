//! Error types for sensorflux
//!
//! This module defines the error hierarchy for the whole crate and the
//! escalation policy attached to it. All public APIs return
//! `Result<T, Error>` where Error is defined here.
//!
//! Escalation table:
//!
//! | class               | variants                                        | policy                        |
//! |---------------------|-------------------------------------------------|-------------------------------|
//! | per-file skip       | MalformedHeader, InvalidOffsetToken,            | log, leave file, continue run |
//! |                     | SchemaMismatch, CsvParse, TimestampParse,       |                               |
//! |                     | FieldParse, Io                                  |                               |
//! | per-chunk transient | StoreTimeout                                    | log, continue to next chunk   |
//! | fatal               | StoreConnection, StoreRejected, Credentials,    | log, non-zero process exit    |
//! |                     | MissingDataDir                                  |                               |

use thiserror::Error;

/// The main error type for sensorflux
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Per-file Errors (skip the file, continue the run)
    // ============================================================================
    #[error("Malformed metadata header (expected 3 tokens): {line:?}")]
    MalformedHeader { line: String },

    #[error("Invalid UTC offset token: {token:?}")]
    InvalidOffsetToken { token: String },

    #[error("Schema mismatch: unexpected or missing column '{column}'")]
    SchemaMismatch { column: String },

    #[error("CSV parsing error: {message}")]
    CsvParse { message: String },

    #[error("Failed to parse timestamp {value:?}: {message}")]
    TimestampParse { value: String, message: String },

    #[error("Failed to parse field '{column}' from {value:?}")]
    FieldParse { column: String, value: String },

    // ============================================================================
    // Store Errors
    // ============================================================================
    #[error("Store connection failed: {message}")]
    StoreConnection { message: String },

    #[error("Store request timed out: {message}")]
    StoreTimeout { message: String },

    #[error("Store rejected write (HTTP {status}): {body}")]
    StoreRejected { status: u16, body: String },

    // ============================================================================
    // Startup Errors (fatal before any file processing)
    // ============================================================================
    #[error("Credentials error: {message}")]
    Credentials { message: String },

    #[error("Data directory does not exist: {path}")]
    MissingDataDir { path: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Feed configuration error: {message}")]
    Feed { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a malformed header error
    pub fn malformed_header(line: impl Into<String>) -> Self {
        Self::MalformedHeader { line: line.into() }
    }

    /// Create an invalid offset token error
    pub fn invalid_offset(token: impl Into<String>) -> Self {
        Self::InvalidOffsetToken {
            token: token.into(),
        }
    }

    /// Create a schema mismatch error
    pub fn schema_mismatch(column: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            column: column.into(),
        }
    }

    /// Create a CSV parse error
    pub fn csv_parse(message: impl Into<String>) -> Self {
        Self::CsvParse {
            message: message.into(),
        }
    }

    /// Create a timestamp parse error
    pub fn timestamp_parse(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TimestampParse {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a field parse error
    pub fn field_parse(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::FieldParse {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Create a store connection error
    pub fn store_connection(message: impl Into<String>) -> Self {
        Self::StoreConnection {
            message: message.into(),
        }
    }

    /// Create a store timeout error
    pub fn store_timeout(message: impl Into<String>) -> Self {
        Self::StoreTimeout {
            message: message.into(),
        }
    }

    /// Create a credentials error
    pub fn credentials(message: impl Into<String>) -> Self {
        Self::Credentials {
            message: message.into(),
        }
    }

    /// Create a feed configuration error
    pub fn feed(message: impl Into<String>) -> Self {
        Self::Feed {
            message: message.into(),
        }
    }

    /// Classify a transport error from the store client.
    ///
    /// Timeouts are the only transient class; everything else that happens
    /// on the wire means the store is unreachable and later writes would
    /// fail identically.
    pub fn from_store_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::StoreTimeout {
                message: err.to_string(),
            }
        } else {
            Self::StoreConnection {
                message: err.to_string(),
            }
        }
    }

    /// Whether this error should skip the current file and continue the run.
    ///
    /// Read failures are skip-class: a file removed or made unreadable
    /// between discovery and open says nothing about the other files.
    pub fn is_file_skip(&self) -> bool {
        matches!(
            self,
            Error::MalformedHeader { .. }
                | Error::InvalidOffsetToken { .. }
                | Error::SchemaMismatch { .. }
                | Error::CsvParse { .. }
                | Error::TimestampParse { .. }
                | Error::FieldParse { .. }
                | Error::Io(_)
        )
    }

    /// Whether this error is transient (continue to the next chunk)
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::StoreTimeout { .. })
    }

    /// Whether this error must abort the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::StoreConnection { .. }
                | Error::StoreRejected { .. }
                | Error::Credentials { .. }
                | Error::MissingDataDir { .. }
        )
    }
}

/// Result type alias for sensorflux
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::malformed_header("foo bar");
        assert!(err.to_string().contains("foo bar"));

        let err = Error::invalid_offset("GMT+2");
        assert_eq!(err.to_string(), "Invalid UTC offset token: \"GMT+2\"");

        let err = Error::schema_mismatch("Extra.column");
        assert_eq!(
            err.to_string(),
            "Schema mismatch: unexpected or missing column 'Extra.column'"
        );
    }

    #[test]
    fn test_file_skip_classification() {
        assert!(Error::malformed_header("x").is_file_skip());
        assert!(Error::invalid_offset("x").is_file_skip());
        assert!(Error::schema_mismatch("x").is_file_skip());
        assert!(Error::field_parse("c", "v").is_file_skip());

        let io = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io.is_file_skip());
        assert!(!io.is_fatal());

        assert!(!Error::store_connection("down").is_file_skip());
        assert!(!Error::store_timeout("slow").is_file_skip());
    }

    #[test]
    fn test_transient_vs_fatal() {
        assert!(Error::store_timeout("slow").is_transient());
        assert!(!Error::store_timeout("slow").is_fatal());

        assert!(Error::store_connection("down").is_fatal());
        assert!(Error::StoreRejected {
            status: 413,
            body: "too large".into()
        }
        .is_fatal());
        assert!(Error::credentials("missing").is_fatal());
        assert!(Error::MissingDataDir {
            path: "sensor_data".into()
        }
        .is_fatal());

        // Per-file errors are neither transient nor fatal
        assert!(!Error::malformed_header("x").is_fatal());
        assert!(!Error::malformed_header("x").is_transient());
    }
}
