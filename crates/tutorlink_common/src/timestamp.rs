//! Canonical UTC timestamp text: `YYYY-MM-DDTHH:MM:SS.mmmZ`.
//!
//! Fixed width with a `Z` suffix, so lexicographic order equals chronological
//! order. Stored columns and JSON payloads both use this form.

use chrono::{DateTime, SecondsFormat, Utc};

/// Formats an instant in the canonical form, e.g. `2024-12-10T02:00:00.000Z`.
pub fn format_utc(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses any RFC 3339 timestamp and normalises it to UTC.
pub fn parse_utc(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(text).map(|dt| dt.with_timezone(&Utc))
}

/// Serde adapter writing `DateTime<Utc>` in the canonical form.
///
/// Use with `#[serde(with = "tutorlink_common::timestamp::serde_utc")]`.
pub mod serde_utc {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_utc(instant))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_utc(&text).map_err(de::Error::custom)
    }
}
