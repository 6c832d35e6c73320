//! Timestamp utilities
//!
//! Show start times are stored as TEXT in the canonical
//! `YYYY-MM-DD HH:MM:SS` form. That representation sorts and compares
//! correctly as a plain string, so SQL comparisons against a bound
//! "now" string need no date functions.

use crate::{Error, Result};
use chrono::{NaiveDateTime, Utc};

/// Canonical timestamp format for show start times
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Get the current UTC wall clock, truncated to whole seconds
pub fn now() -> NaiveDateTime {
    use chrono::Timelike;
    let now = Utc::now().naive_utc();
    // Sub-second precision never appears in stored timestamps
    now.with_nanosecond(0).unwrap_or(now)
}

/// Format a timestamp in the canonical form
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a timestamp in the canonical form
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| Error::InvalidInput(format!("Invalid timestamp (expected YYYY-MM-DD HH:MM:SS): {s}")))
}
