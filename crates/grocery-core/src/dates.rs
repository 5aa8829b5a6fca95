//! Activation/deactivation date handling.
//!
//! Source dates arrive as loosely formatted strings (or epoch milliseconds).
//! Anything that is absent or cannot be parsed becomes [`DateField::Invalid`],
//! which renders as the literal `Invalid Date`.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Serialize, Serializer};

pub const INVALID_DATE_LABEL: &str = "Invalid Date";

/// A parsed date, or the Invalid-Date sentinel.
///
/// `Invalid` orders before every valid date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateField {
    Invalid,
    Valid(DateTime<Utc>),
}

/// Renders as `MM/DD/YYYY`, or `Invalid Date`.
impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateField::Valid(dt) => write!(f, "{}", dt.format("%m/%d/%Y")),
            DateField::Invalid => f.write_str(INVALID_DATE_LABEL),
        }
    }
}

impl Serialize for DateField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DateField::Valid(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            DateField::Invalid => serializer.serialize_str(INVALID_DATE_LABEL),
        }
    }
}

/// Parses a date string.
///
/// Accepted shapes, tried in order: RFC 3339, RFC 2822, a naive
/// `YYYY-MM-DDTHH:MM[:SS[.fff]]` (or space-separated) timestamp taken as
/// UTC, and the date-only forms `YYYY-MM-DD`, `YYYY-MM` and `YYYY` taken as
/// UTC midnight on the first day they name.
#[must_use]
pub fn parse_date(raw: &str) -> DateField {
    let raw = raw.trim();
    if raw.is_empty() {
        return DateField::Invalid;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return DateField::Valid(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return DateField::Valid(dt.with_timezone(&Utc));
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return DateField::Valid(naive.and_utc());
        }
    }

    parse_calendar_date(raw)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map_or(DateField::Invalid, |dt| DateField::Valid(dt.and_utc()))
}

/// `YYYY-MM-DD`, `YYYY-MM` or `YYYY`; missing parts default to 1.
fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let digits =
        |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());

    let mut parts = raw.split('-');
    let year = parts.next().filter(|y| digits(y, 4))?.parse().ok()?;
    let month = match parts.next() {
        Some(m) if digits(m, 2) => m.parse().ok()?,
        Some(_) => return None,
        None => 1,
    };
    let day = match parts.next() {
        Some(d) if digits(d, 2) => d.parse().ok()?,
        Some(_) => return None,
        None => 1,
    };
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Interprets an integer as milliseconds since the Unix epoch.
#[must_use]
pub fn from_epoch_millis(millis: i64) -> DateField {
    DateTime::from_timestamp_millis(millis).map_or(DateField::Invalid, DateField::Valid)
}

/// Like [`from_epoch_millis`] for fractional values; the fraction is
/// truncated toward zero.
#[must_use]
pub fn from_epoch_millis_f64(millis: f64) -> DateField {
    // Anything outside the i64 range is also outside chrono's range.
    const LIMIT: f64 = 9.2e18;
    if !millis.is_finite() || millis.abs() > LIMIT {
        return DateField::Invalid;
    }
    #[allow(clippy::cast_possible_truncation)]
    let whole = millis.trunc() as i64;
    from_epoch_millis(whole)
}
