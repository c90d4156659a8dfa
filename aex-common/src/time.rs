//! Lenient timestamp parsing for store-supplied date strings
//!
//! The record store does not enforce a single timestamp format: rows carry
//! RFC 3339 strings (`created_at` columns), naive `YYYY-MM-DD HH:MM:SS`
//! strings, or bare dates, depending on which upstream tool wrote them.
//! Everything here parses leniently and returns `None` for anything else;
//! an unparseable date is treated as absent, never as an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a timestamp string in any of the formats the store produces.
///
/// Tried in order:
/// 1. RFC 3339 (`2024-03-01T09:30:00+00:00`, `2024-03-01T09:30:00Z`)
/// 2. Naive datetime `2024-03-01 09:30:00` (fractional seconds allowed),
///    assumed UTC
/// 3. Bare date `2024-03-01`, taken as midnight UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    None
}
