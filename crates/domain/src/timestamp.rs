//! Timestamp parsing for backend payloads.
//!
//! The backend emits ISO-8601 timestamps with or without a UTC offset.
//! Offset-less values are taken to be UTC.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parses an RFC 3339 timestamp, or a naive ISO-8601 one as UTC.
///
/// # Errors
///
/// Returns the chrono parse error of the naive format if neither form matches.
pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|n| n.and_utc()))
}

/// Serde adapter for required timestamps.
pub mod required {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    /// Serializes as RFC 3339.
    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    /// Deserializes either timestamp form.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse(&raw).map_err(de::Error::custom)
    }
}

/// Serde adapter for nullable timestamps.
pub mod optional {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    /// Serializes as RFC 3339 or `null`.
    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes either timestamp form, or `null`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| super::parse(&raw).map_err(de::Error::custom))
            .transpose()
    }
}
