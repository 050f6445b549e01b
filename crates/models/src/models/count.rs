//! Serde helpers for statistic counters.
//!
//! The upstream API reports counters as decimal strings (`"viewCount": "123"`)
//! to dodge 53-bit integer limits in JavaScript clients. Cache files written
//! by other tools sometimes store them as plain numbers, so both are accepted.
//! Counters are always written back as strings.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Number(u64),
    Text(String),
}

pub fn serialize<S>(value: &Option<u64>, ser: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(count) => ser.serialize_str(&count.to_string()),
        None => ser.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deser: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Raw>::deserialize(deser)? {
        None => Ok(None),
        Some(Raw::Number(count)) => Ok(Some(count)),
        Some(Raw::Text(text)) => text.trim().parse().map(Some).map_err(D::Error::custom),
    }
}
