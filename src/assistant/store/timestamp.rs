//! Serde helpers for optional note timestamps.
//!
//! Timestamps are written as RFC 3339. Older files hold naive ISO-8601 strings
//! without an offset (`2024-03-01T09:15:00.123456`); those are read as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{Error, Unexpected};
use serde::{Deserialize, Deserializer, Serializer};

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn serialize<S: Serializer>(
    value: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| {
        parse(&s).ok_or_else(|| Error::invalid_value(Unexpected::Str(&s), &"an ISO-8601 timestamp"))
    })
    .transpose()
}
