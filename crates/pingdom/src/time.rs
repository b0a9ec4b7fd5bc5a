//! Serde support for Pingdom's literal date-time encoding.
//!
//! Pingdom sends the state-change instant twice: once as epoch seconds
//! (handled by `chrono::serde::ts_seconds`) and once as a literal
//! string like `"2016-01-01T01:01:01"` with no zone suffix. The
//! literal form is interpreted as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

/// Layout of the literal date-time field.
const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Deserialize a `"2016-01-01T01:01:01"` string as a UTC instant.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let naive = NaiveDateTime::parse_from_str(&s, FORMAT).map_err(D::Error::custom)?;
    Ok(naive.and_utc())
}

/// Serialize a UTC instant back to the literal form.
pub fn serialize<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&instant.format(FORMAT).to_string())
}
