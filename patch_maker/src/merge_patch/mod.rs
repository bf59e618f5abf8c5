//! Merge patch primitives operating on canonical JSON byte documents.
//!
//! [`JsonMergePatcher`] is the seam the calculator depends on: it creates
//! two-way and three-way merge patches and applies them. [`BaseJsonMergePatcher`]
//! implements it with RFC 7386 semantics on top of `serde_json`.
//! [`StrategicMergePatcher`] is reserved for list-merge-key-aware patching and
//! is not used by the calculation itself.

mod apply;
mod create;
mod strategic;
mod three_way;

use serde_json::{Map, Value};

use crate::{MergePatchError, codec};

pub use strategic::{StrategicMergePatcher, UnsupportedStrategicMergePatcher};

/// Creates and applies JSON merge patches over byte documents.
///
/// Implementations must be pure: identical inputs always yield identical
/// outputs, so callers may share one patcher across threads.
pub trait JsonMergePatcher: Send + Sync {
    /// Create the two-way merge patch turning `from` into `to`.
    ///
    /// # Errors
    ///
    /// Returns a [`MergePatchError`] when either document is not a JSON
    /// object.
    fn create_merge_patch(&self, from: &[u8], to: &[u8]) -> Result<Vec<u8>, MergePatchError>;

    /// Create the three-way merge patch carrying the `original` → `modified`
    /// delta onto `current`.
    ///
    /// # Errors
    ///
    /// Returns a [`MergePatchError`] when any document is not a JSON object.
    fn create_three_way_json_merge_patch(
        &self,
        original: &[u8],
        modified: &[u8],
        current: &[u8],
    ) -> Result<Vec<u8>, MergePatchError>;

    /// Apply `patch` to `document`.
    ///
    /// # Errors
    ///
    /// Returns a [`MergePatchError`] when either input is not valid JSON.
    fn merge_patch(&self, document: &[u8], patch: &[u8]) -> Result<Vec<u8>, MergePatchError>;
}

/// RFC 7386 merge patcher backed by `serde_json`.
///
/// # Examples
///
/// ```
/// use patch_maker::{BaseJsonMergePatcher, JsonMergePatcher};
///
/// let patcher = BaseJsonMergePatcher;
/// let patch = patcher.create_merge_patch(br#"{"a":1,"b":2}"#, br#"{"a":1,"b":3}"#)?;
/// assert_eq!(patch, br#"{"b":3}"#);
/// assert_eq!(patcher.merge_patch(br#"{"a":1,"b":2}"#, &patch)?, br#"{"a":1,"b":3}"#);
/// # Ok::<_, patch_maker::MergePatchError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct BaseJsonMergePatcher;

impl JsonMergePatcher for BaseJsonMergePatcher {
    fn create_merge_patch(&self, from: &[u8], to: &[u8]) -> Result<Vec<u8>, MergePatchError> {
        let from = parse_object(from, "from")?;
        let to = parse_object(to, "to")?;
        encode(&create::diff_objects(&from, &to), "patch")
    }

    fn create_three_way_json_merge_patch(
        &self,
        original: &[u8],
        modified: &[u8],
        current: &[u8],
    ) -> Result<Vec<u8>, MergePatchError> {
        let original = parse_base(original)?;
        let modified = parse_object(modified, "modified")?;
        let current = parse_object(current, "current")?;
        encode(
            &three_way::three_way_objects(&original, &modified, &current),
            "patch",
        )
    }

    fn merge_patch(&self, document: &[u8], patch: &[u8]) -> Result<Vec<u8>, MergePatchError> {
        let mut target =
            codec::parse(document).map_err(|e| MergePatchError::invalid("document", e))?;
        let patch = codec::parse(patch).map_err(|e| MergePatchError::invalid("patch", e))?;
        apply::merge_value(&mut target, patch);
        serde_json::to_vec(&target).map_err(|source| MergePatchError::Serialise {
            document: "result",
            source,
        })
    }
}

/// Parse a document that must be a JSON object.
fn parse_object(bytes: &[u8], document: &'static str) -> Result<Map<String, Value>, MergePatchError> {
    match codec::parse(bytes).map_err(|e| MergePatchError::invalid(document, e))? {
        Value::Object(map) => Ok(map),
        _ => Err(MergePatchError::not_an_object(document)),
    }
}

/// Parse the three-way base document.
///
/// An empty buffer or a literal `null` means the object did not exist before,
/// which is the same as an empty base.
fn parse_base(bytes: &[u8]) -> Result<Map<String, Value>, MergePatchError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match codec::parse(bytes).map_err(|e| MergePatchError::invalid("original", e))? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        _ => Err(MergePatchError::not_an_object("original")),
    }
}

fn encode(patch: &Map<String, Value>, document: &'static str) -> Result<Vec<u8>, MergePatchError> {
    serde_json::to_vec(patch).map_err(|source| MergePatchError::Serialise { document, source })
}
