//! Forgiving numeric parsing for columns that are informational only.

use serde::{Deserialize as _, Deserializer};

/// Parses an integer field, accepting surrounding whitespace and decimal
/// or exponent forms (`"12"`, `"12.9"`, `"1e3"`). Fractions truncate toward
/// zero and out-of-range values saturate.
///
/// Empty, unparsable, and non-finite values yield `None`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn parse_integer(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    let value = s.parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.trunc() as i64)
}

/// Deserializes a count column, treating blank or malformed values as 0.
pub(crate) fn count_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(parse_integer(&raw).unwrap_or(0))
}

/// Deserializes a FIPS column, treating blank or malformed values as
/// unresolved.
pub(crate) fn fips_or_none<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u32>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(parse_integer(&raw).and_then(|n| u32::try_from(n).ok()))
}
