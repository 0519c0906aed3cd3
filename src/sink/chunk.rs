//! Time-window chunk planning
//!
//! The destination store rejects oversized single writes (InfluxDB answers
//! 413 Request Entity Too Large), so a file's series is sliced into
//! hour-aligned windows before writing. Window bounds are lower-inclusive,
//! upper-exclusive; windows are contiguous, non-overlapping, and together
//! cover every record exactly once. Trailing empty windows are never
//! emitted.

use chrono::{DateTime, Duration, DurationRound, Utc};

use crate::normalize::NormalizedRecord;

/// Slice a time-ordered series into window-bounded chunks.
///
/// `width` is the window size (one hour unless configured otherwise). The
/// first window starts at the minimum timestamp floored to `width`; windows
/// advance until every record is assigned, which sidesteps the off-by-one
/// ambiguity of deriving a window count from rounded durations. Empty
/// windows inside the span are skipped.
///
/// The input is assumed sorted by timestamp (normalizer output is monotonic
/// per file).
pub fn plan_chunks(records: &[NormalizedRecord], width: Duration) -> Vec<&[NormalizedRecord]> {
    let Some(first) = records.first() else {
        return Vec::new();
    };

    // A non-positive width cannot advance the window scan. The CLI rejects
    // it up front; a caller slipping one through gets the whole series as a
    // single chunk instead of a livelock.
    if width <= Duration::zero() {
        return vec![records];
    }

    let start = floor_to(first.timestamp, width);

    let mut chunks = Vec::new();
    let mut lower_idx = 0;
    let mut upper_bound = start + width;

    while lower_idx < records.len() {
        let mut upper_idx = lower_idx;
        while upper_idx < records.len() && records[upper_idx].timestamp < upper_bound {
            upper_idx += 1;
        }

        if upper_idx > lower_idx {
            chunks.push(&records[lower_idx..upper_idx]);
            lower_idx = upper_idx;
        }
        upper_bound += width;
    }

    chunks
}

/// Floor a timestamp to a window boundary
fn floor_to(ts: DateTime<Utc>, width: Duration) -> DateTime<Utc> {
    // duration_trunc only fails for zero/overflowing widths, which the CLI
    // never produces; fall back to the raw timestamp rather than panic.
    ts.duration_trunc(width).unwrap_or(ts)
}
