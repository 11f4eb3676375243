//! Helpers for query-string filters.

use serde::{de, Deserialize, Deserializer};

/// Reads an optional id filter. A blank value (`?parking_id=`) is treated as
/// if the parameter was not sent.
///
/// Use with `#[serde(default, deserialize_with = "optional_id")]`.
pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid id filter: {}", value))),
    }
}
