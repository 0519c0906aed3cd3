//! Header line parser
//!
//! The first line of a sensor log is either the reserved sentinel written
//! by loggers with no mission configured, or a whitespace-separated
//! `<position> <model> <utc-offset>,...` triple.

use crate::error::{Error, Result};

/// Header line written by sensors that were never given mission metadata
pub const DEFAULT_HEADER_SENTINEL: &str = "Default mission information for csv file header";

/// Defaults used when the sentinel header is encountered
const DEFAULT_POSITION: &str = "not_set";
const DEFAULT_MODEL: &str = "not_named";
const DEFAULT_OFFSET_TOKEN: &str = "UTC+0";

/// The three raw tokens of a header line, before offset resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFields {
    /// First token: deployment position
    pub position: String,
    /// Second token: sensor model
    pub model: String,
    /// Third token with any trailing comma stripped, e.g. `UTC+2`
    pub offset_token: String,
}

/// Split a header line into its (position, model, offset token) triple.
///
/// Surrounding and repeated whitespace is insignificant. Fewer than three
/// tokens is a `MalformedHeader` error, which callers treat as a
/// skip-this-file decision rather than a crash.
pub fn parse_header_line(line: &str) -> Result<HeaderFields> {
    let line = line.trim();

    if line == DEFAULT_HEADER_SENTINEL {
        return Ok(HeaderFields {
            position: DEFAULT_POSITION.to_string(),
            model: DEFAULT_MODEL.to_string(),
            offset_token: DEFAULT_OFFSET_TOKEN.to_string(),
        });
    }

    let mut tokens = line.split_whitespace();
    let (Some(position), Some(model), Some(offset)) =
        (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(Error::malformed_header(line));
    };

    // The offset token ends the comma-separated header prefix, e.g.
    // "StationA SensorX UTC+2,logger-v3"
    let offset_token = offset.split(',').next().unwrap_or(offset);

    Ok(HeaderFields {
        position: position.to_string(),
        model: model.to_string(),
        offset_token: offset_token.to_string(),
    })
}
