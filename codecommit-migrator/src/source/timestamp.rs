//! Serde adapter for CodeCommit timestamps.
//!
//! AWS CLI v1 prints epoch seconds (`1672913730.123`), v2 prints ISO 8601
//! (`2023-01-05T10:15:30.123000+00:00`). Both are accepted; RFC 3339 is
//! written back.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Epoch(f64),
    Text(String),
}

pub(crate) fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(value) => serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        None => serializer.serialize_none(),
    }
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Repr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Repr::Epoch(secs)) => {
            let millis = (secs * 1000.0).round() as i64;
            DateTime::from_timestamp_millis(millis)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {secs}")))
        }
        Some(Repr::Text(text)) => DateTime::parse_from_rfc3339(&text)
            .map(|value| Some(value.with_timezone(&Utc)))
            .map_err(D::Error::custom),
    }
}
