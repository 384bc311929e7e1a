//! Data Transfer Objects for the Keboola APIs
//!
//! Payloads as they travel over the wire. The Storage API is PHP-backed, so a few
//! fields arrive in more than one JSON shape; the helpers here normalise those.

pub mod job;
pub mod table;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept an identifier sent either as a JSON string or a JSON number
pub(crate) fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

/// Same as [`id_from_string_or_number`] but tolerates `null`
pub(crate) fn optional_id_from_string_or_number<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(D::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}
