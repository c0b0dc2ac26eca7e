//! # Timestamp Value Object
//!
//! UTC timestamp used to stamp persisted quotes.
//!
//! # Examples
//!
//! ```
//! use provider_gateway::domain::value_objects::timestamp::Timestamp;
//!
//! let ts = Timestamp::from_millis(1704067200000).unwrap();
//! assert_eq!(ts.timestamp_millis(), 1704067200000);
//! ```

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC timestamp.
///
/// Wraps `chrono::DateTime<Utc>` and serializes as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from Unix milliseconds.
    ///
    /// Returns `None` if the value is out of range.
    #[must_use]
    pub fn from_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    /// Returns the Unix timestamp in milliseconds.
    #[inline]
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Returns the inner `DateTime<Utc>`.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn millis_roundtrip() {
        let ts = Timestamp::from_millis(1_704_067_200_000).unwrap();
        assert_eq!(ts.timestamp_millis(), 1_704_067_200_000);
    }

    #[test]
    fn converts_from_datetime() {
        let datetime = Utc.timestamp_millis_opt(2_000).unwrap();
        let ts = Timestamp::from(datetime);
        assert_eq!(ts.as_datetime(), datetime);
        assert!(ts > Timestamp::from_millis(1_000).unwrap());
    }

    #[test]
    fn display_is_rfc3339() {
        let ts = Timestamp::from_millis(0).unwrap();
        assert!(ts.to_string().starts_with("1970-01-01T00:00:00"));
    }

    #[test]
    fn serializes_as_string() {
        let ts = Timestamp::from_millis(0).unwrap();
        let json = serde_json::to_value(ts).unwrap();
        assert!(json.is_string());
    }
}
