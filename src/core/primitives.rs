use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Parses a decimal literal such as `"12.50"` or `"-3"` into `f64`.
///
/// Returns `None` for anything that is not a plain decimal number.
#[must_use]
pub fn parse_decimal_str(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
        .and_then(|value| value.to_f64())
}

/// Parses an RFC 3339 timestamp into fractional unix seconds.
#[must_use]
pub fn parse_datetime_str(raw: &str) -> Option<f64> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|time| datetime_to_unix_seconds(time.with_timezone(&Utc)))
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}
