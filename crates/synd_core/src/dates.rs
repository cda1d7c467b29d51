//! Centralized publish-date parsing.
//!
//! Source payloads carry dates in several shapes: RFC 3339 timestamps,
//! WordPress's naive `2024-01-15T09:30:00`, and human strings like
//! "January 15, 2024". Every call site goes through [`parse_published`] so
//! the precedence is in exactly one place.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse a publish date from the first candidate that yields anything.
///
/// Precedence: RFC 3339, then the WordPress naive datetime form (taken as
/// UTC), then a "Month day, Year" human form, then epoch zero. Never fails;
/// an unparseable date sorts last, it doesn't abort an aggregation run.
pub fn parse_published(candidates: &[&str]) -> DateTime<Utc> {
    for raw in candidates {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return dt.with_timezone(&Utc);
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            return Utc.from_utc_datetime(&naive);
        }
        if let Ok(day) = NaiveDate::parse_from_str(raw, "%B %d, %Y") {
            if let Some(naive) = day.and_hms_opt(0, 0, 0) {
                return Utc.from_utc_datetime(&naive);
            }
        }
    }
    Utc.timestamp_opt(0, 0).single().unwrap_or_default()
}
