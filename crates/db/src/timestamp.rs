//! Timestamp storage format.
//!
//! Timestamps are stored as UTC RFC 3339 text with exactly six fractional
//! digits and a `Z` suffix. The fixed width makes string order equal time
//! order, so SQL can compare stored values directly on either backend.

use chrono::{DateTime, Utc};
use monarch_core::types::Timestamp;

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Render a timestamp in the storage format (microsecond precision).
pub fn encode(ts: Timestamp) -> String {
    ts.format(FORMAT).to_string()
}

/// Parse a stored timestamp.
pub fn decode(raw: &str) -> Result<Timestamp, sqlx::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))
}
