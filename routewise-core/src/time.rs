//! Time utilities: sortable advisory timestamps.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC time as RFC 3339 with millisecond precision and a `Z` suffix.
pub fn to_rfc3339_utc(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time, formatted for the advisory `timestamp` field.
pub fn now_timestamp() -> String {
    to_rfc3339_utc(Utc::now())
}
