//! Time and timestamp helpers.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};

/// UTC timestamp as reported by the asset source.
pub type Timestamp = DateTime<Utc>;

/// Display text used when a timestamp is absent or cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// Parse an ISO 8601 timestamp.
///
/// Accepts a full RFC 3339 date-time, a date-time without offset, or a bare
/// date. Inputs without an offset are read as UTC, a bare date as midnight.
#[must_use]
pub fn parse(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Format a timestamp for display in the given offset, e.g. `9/7/2025, 1:53:05 PM`.
#[must_use]
pub fn format_display(ts: Timestamp, offset: FixedOffset) -> String {
    ts.with_timezone(&offset)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

/// Parse and format a raw timestamp, falling back to [`INVALID_DATE`].
#[must_use]
pub fn display_or_invalid(raw: Option<&str>, offset: FixedOffset) -> String {
    raw.and_then(parse).map_or_else(
        || INVALID_DATE.to_string(),
        |ts| format_display(ts, offset),
    )
}

/// Build a fixed offset from minutes east of UTC, clamping to UTC when out of range.
#[must_use]
pub fn offset_from_minutes(minutes: i32) -> FixedOffset {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(utc_offset)
}

/// The zero offset.
#[must_use]
pub fn utc_offset() -> FixedOffset {
    Utc.fix()
}
