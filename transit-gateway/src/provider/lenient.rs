//! Lenient decoding of provider records.
//!
//! Provider payloads do not always match their documented types (numbers
//! arrive as strings, single-element lists arrive as bare objects). A
//! mismatched field is dropped and logged rather than failing the request.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Decode an optional record field, dropping it if its type is unexpected.
///
/// Use with `#[serde(default, deserialize_with = "lenient::field")]`.
pub fn field<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(value) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };

    match serde_json::from_value::<T>(value) {
        Ok(v) => Ok(Some(v)),
        Err(e) => {
            warn!(error = %e, "dropping provider field with unexpected type");
            Ok(None)
        }
    }
}

/// Decode a list that may also arrive as a single bare object.
///
/// Elements that do not decode are dropped and logged; the rest are kept.
/// Use with `#[serde(default, deserialize_with = "lenient::one_or_many")]`.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => vec![other],
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<T>(item) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(error = %e, "dropping provider list element with unexpected type");
                None
            }
        })
        .collect())
}

/// Decode a payload value into a list, accepting `null`, a bare object, or an array.
pub fn list_from_value<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, serde_json::Error> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(_) => serde_json::from_value(value),
        other => serde_json::from_value(other).map(|item| vec![item]),
    }
}
