//! UTC offset token resolver
//!
//! Resolves tokens of the form `utc<sign><digits>` (case-insensitive, sign
//! optional and defaulting to `+`) into a signed hour offset. This is a raw
//! fixed-hour-offset model, not a timezone lookup: the sensors do not
//! observe DST and the logs carry no zone name.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Valid offset range in whole hours (UTC-12 through UTC+14)
const MIN_OFFSET_HOURS: i8 = -12;
const MAX_OFFSET_HOURS: i8 = 14;

static OFFSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^utc([+-]?)(\d{1,2})$").expect("offset regex is valid")
});

/// Resolve an offset token such as `UTC+2`, `utc-1` or `UTC0` into signed
/// hours.
///
/// Fails with `InvalidOffsetToken` when the token does not match the
/// expected shape or the hour value falls outside [-12, 14].
pub fn resolve_offset(token: &str) -> Result<i8> {
    let caps = OFFSET_RE
        .captures(token.trim())
        .ok_or_else(|| Error::invalid_offset(token))?;

    let sign = if &caps[1] == "-" { -1i8 } else { 1i8 };
    let hours: i8 = caps[2]
        .parse()
        .map_err(|_| Error::invalid_offset(token))?;

    let offset = sign * hours;
    if !(MIN_OFFSET_HOURS..=MAX_OFFSET_HOURS).contains(&offset) {
        return Err(Error::invalid_offset(token));
    }

    Ok(offset)
}

/// Format a signed hour offset back into canonical token form, e.g. `UTC+2`
pub fn format_offset(hours: i8) -> String {
    if hours < 0 {
        format!("UTC{hours}")
    } else {
        format!("UTC+{hours}")
    }
}
