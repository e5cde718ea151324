//! Date normalisation for the timestamps the backend emits.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_date_only(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Reduce an entry timestamp to its calendar day.
///
/// Accepts:
/// - YYYY-MM-DD
/// - RFC3339 datetime (the offset-local day is kept)
/// - Naive datetime YYYY-MM-DDTHH:MM:SS with optional fractional seconds,
///   as produced by Python's `isoformat()`
/// - The same with a space instead of `T`
pub fn normalize_entry_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Some(date) = parse_date_only(s) {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt.date());
        }
    }
    None
}
