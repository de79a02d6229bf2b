//! Lenient field parsing for raw crime CSV rows.

use chrono::{DateTime, Datelike as _, NaiveDate, NaiveDateTime};
use crime_stats_models::YearMonth;
use crime_stats_models::lenient::parse_integer;

/// Date-only layouts accepted in addition to ISO 8601.
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y/%m/%d"];

/// ISO 8601 datetime layouts without an offset.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Extracts the calendar month from a raw date value.
///
/// Accepts `YYYY-MM`, ISO 8601 dates and datetimes (with or without an
/// offset), `MM/DD/YYYY`, `YYYY/MM/DD`, `MM/YYYY`, and `Mon YYYY`.
/// Returns `None` for empty or unrecognized values.
#[must_use]
pub fn parse_month(raw: &str) -> Option<YearMonth> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if s.len() == 7
        && let Ok(month) = s.parse::<YearMonth>()
    {
        return Some(month);
    }

    parse_date(s).and_then(|d| YearMonth::new(d.year(), d.month()))
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    // Offset-qualified timestamps keep their local calendar date.
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    // Month-resolution layouts: pin the day to the 1st.
    if let Ok(d) = NaiveDate::parse_from_str(&format!("01/{s}"), "%d/%m/%Y") {
        return Some(d);
    }
    NaiveDate::parse_from_str(&format!("01 {s}"), "%d %b %Y").ok()
}

/// Parses a count column. Missing or unparsable values count as zero.
#[must_use]
pub fn coerce_count(raw: Option<&str>) -> i64 {
    raw.and_then(parse_integer).unwrap_or(0)
}

/// Parses a state FIPS code (`"6"`, `"06"`, `"6.0"`). Zero, negative, and
/// unparsable values yield `None`.
#[must_use]
pub fn parse_fips(raw: &str) -> Option<u32> {
    parse_integer(raw)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|&n| n > 0)
}
