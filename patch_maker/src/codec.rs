//! Canonical JSON byte codec for domain objects.
//!
//! Objects are encoded with `serde_json`. Because [`serde_json::Map`] keeps
//! its keys sorted, any two values with the same logical content encode to the
//! same bytes, which the patch pipeline relies on when comparing documents.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Canonical encoding of the empty JSON object, also the empty merge patch.
pub const EMPTY_OBJECT: &[u8] = b"{}";

/// Serialise `value` to canonical JSON bytes.
///
/// The value is routed through [`serde_json::Value`] so map keys come out
/// sorted regardless of the order the type serialises them in.
///
/// # Errors
///
/// Returns the serialiser error when `value` cannot be represented as JSON,
/// for example a map with non-string keys.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// let map = HashMap::from([("b", 1), ("a", 2)]);
/// assert_eq!(patch_maker::codec::marshal(&map).unwrap(), br#"{"a":2,"b":1}"#);
/// ```
pub fn marshal<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let value = serde_json::to_value(value)?;
    serde_json::to_vec(&value)
}

/// Deserialise canonical JSON bytes into a fresh `T`.
///
/// # Errors
///
/// Returns the parser error when `bytes` are not valid JSON or do not match
/// the shape of `T`.
pub fn unmarshal<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Parse `bytes` into a JSON value.
pub(crate) fn parse(bytes: &[u8]) -> Result<Value, serde_json::Error> {
    serde_json::from_slice(bytes)
}
