//! Calculate options: transformations applied to the current and modified
//! documents before they are diffed.
//!
//! Options mask or normalise fields that should not take part in patch
//! calculation, such as status blocks or generation counters. They run in the
//! order supplied, each receiving the output of the previous one, and always
//! return both documents even when they only touch one side.
//!
//! Any closure of the right shape is an option:
//!
//! ```
//! use patch_maker::{CalculateOption, OptionFailure};
//!
//! let swap = |current: Vec<u8>, modified: Vec<u8>| -> Result<_, OptionFailure> {
//!     Ok((modified, current))
//! };
//! let (current, modified) = swap.apply(b"1".to_vec(), b"2".to_vec())?;
//! assert_eq!((current.as_slice(), modified.as_slice()), (&b"2"[..], &b"1"[..]));
//! # Ok::<_, OptionFailure>(())
//! ```

use serde_json::Value;

use crate::{OptionFailure, codec};

/// Output of a calculate option: the rewritten `(current, modified)` pair.
pub type OptionOutput = Result<(Vec<u8>, Vec<u8>), OptionFailure>;

/// Transformation applied to the `(current, modified)` byte pair.
pub trait CalculateOption: Send + Sync {
    /// Rewrite the pair, returning new buffers.
    ///
    /// # Errors
    ///
    /// Returns an [`OptionFailure`] when the documents cannot be transformed.
    fn apply(&self, current: Vec<u8>, modified: Vec<u8>) -> OptionOutput;
}

impl<F> CalculateOption for F
where
    F: Fn(Vec<u8>, Vec<u8>) -> OptionOutput + Send + Sync,
{
    fn apply(&self, current: Vec<u8>, modified: Vec<u8>) -> OptionOutput {
        self(current, modified)
    }
}

/// Removes a value from both documents.
///
/// Built by [`ignore_field`], [`ignore_pointer`], and
/// [`ignore_status_fields`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IgnorePath {
    segments: Vec<String>,
}

impl IgnorePath {
    /// Path segments from the document root to the removed value.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl CalculateOption for IgnorePath {
    fn apply(&self, current: Vec<u8>, modified: Vec<u8>) -> OptionOutput {
        Ok((
            rewrite(&current, |doc| remove_path(doc, &self.segments))?,
            rewrite(&modified, |doc| remove_path(doc, &self.segments))?,
        ))
    }
}

/// Ignore a top-level field.
///
/// # Examples
///
/// ```
/// use patch_maker::{CalculateOption, ignore_field};
///
/// let (current, _) = ignore_field("status").apply(
///     br#"{"spec":1,"status":{"ready":true}}"#.to_vec(),
///     br#"{"spec":2}"#.to_vec(),
/// )?;
/// assert_eq!(current, br#"{"spec":1}"#);
/// # Ok::<_, patch_maker::OptionFailure>(())
/// ```
#[must_use]
pub fn ignore_field(name: impl Into<String>) -> IgnorePath {
    IgnorePath {
        segments: vec![name.into()],
    }
}

/// Ignore the value addressed by an RFC 6901 JSON pointer such as
/// `/metadata/generation`.
///
/// `~1` and `~0` escapes are decoded. The empty pointer addresses the whole
/// document and is rejected, since a merge patch needs an object to work on.
///
/// # Errors
///
/// Returns an [`OptionFailure`] for pointers that do not start with `/`.
pub fn ignore_pointer(pointer: &str) -> Result<IgnorePath, OptionFailure> {
    let Some(rest) = pointer.strip_prefix('/') else {
        return Err(OptionFailure::from(format!(
            "JSON pointer {pointer:?} must start with '/'"
        )));
    };
    let segments = rest
        .split('/')
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect();
    Ok(IgnorePath { segments })
}

/// Ignore the top-level `status` block, which is owned by the live system.
#[must_use]
pub fn ignore_status_fields() -> IgnorePath {
    ignore_field("status")
}

/// Drops object members whose value is `null` from both documents.
///
/// A merge patch cannot express "set to null"; normalising nulls away keeps
/// explicit-null and absent fields from producing spurious deletions.
#[derive(Clone, Copy, Debug, Default)]
pub struct IgnoreNullFields;

/// Build an [`IgnoreNullFields`] option.
#[must_use]
pub const fn ignore_null_fields() -> IgnoreNullFields {
    IgnoreNullFields
}

impl CalculateOption for IgnoreNullFields {
    fn apply(&self, current: Vec<u8>, modified: Vec<u8>) -> OptionOutput {
        Ok((
            rewrite(&current, strip_nulls)?,
            rewrite(&modified, strip_nulls)?,
        ))
    }
}

fn rewrite(bytes: &[u8], edit: impl Fn(&mut Value)) -> Result<Vec<u8>, OptionFailure> {
    let mut doc = codec::parse(bytes)?;
    edit(&mut doc);
    Ok(serde_json::to_vec(&doc)?)
}

fn remove_path(doc: &mut Value, segments: &[String]) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };
    let mut cursor = doc;
    for segment in parents {
        let next = match cursor {
            Value::Object(map) => map.get_mut(segment),
            Value::Array(items) => array_index(segment).and_then(|index| items.get_mut(index)),
            _ => None,
        };
        let Some(next) = next else {
            return;
        };
        cursor = next;
    }
    match cursor {
        Value::Object(map) => {
            map.remove(last);
        }
        Value::Array(items) => {
            if let Some(index) = array_index(last).filter(|i| *i < items.len()) {
                items.remove(index);
            }
        }
        _ => {}
    }
}

/// Array index token per RFC 6901: `0` or digits without a leading zero.
fn array_index(segment: &str) -> Option<usize> {
    let digits_only = !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit());
    if !digits_only || (segment.len() > 1 && segment.starts_with('0')) {
        return None;
    }
    segment.parse().ok()
}

fn strip_nulls(doc: &mut Value) {
    match doc {
        Value::Object(map) => {
            map.retain(|_, value| !value.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::{CalculateOption, ignore_field, ignore_null_fields, ignore_pointer};

    fn run(option: &dyn CalculateOption, current: &Value, modified: &Value) -> (Value, Value) {
        let (c, m) = option
            .apply(
                serde_json::to_vec(current).expect("encode current"),
                serde_json::to_vec(modified).expect("encode modified"),
            )
            .expect("option succeeds");
        (
            serde_json::from_slice(&c).expect("decode current"),
            serde_json::from_slice(&m).expect("decode modified"),
        )
    }

    #[rstest]
    fn ignore_field_strips_both_sides() {
        let (c, m) = run(
            &ignore_field("status"),
            &json!({"a": 1, "status": "live"}),
            &json!({"a": 2, "status": "desired"}),
        );
        assert_eq!(c, json!({"a": 1}));
        assert_eq!(m, json!({"a": 2}));
    }

    #[rstest]
    #[case::nested("/metadata/generation", json!({"metadata": {"name": "x", "generation": 4}}), json!({"metadata": {"name": "x"}}))]
    #[case::escaped("/annotations/a~1b", json!({"annotations": {"a/b": 1, "c": 2}}), json!({"annotations": {"c": 2}}))]
    #[case::tilde("/a~0b", json!({"a~b": 1}), json!({}))]
    #[case::array_index("/items/0", json!({"items": [1, 2]}), json!({"items": [2]}))]
    #[case::missing_path("/nope/deeper", json!({"a": 1}), json!({"a": 1}))]
    #[case::leading_zero_index("/items/01", json!({"items": [1, 2]}), json!({"items": [1, 2]}))]
    #[case::leading_zero_parent("/items/00/a", json!({"items": [{"a": 1}]}), json!({"items": [{"a": 1}]}))]
    #[case::signed_index("/items/+1", json!({"items": [1, 2]}), json!({"items": [1, 2]}))]
    #[case::nested_index("/items/1/a", json!({"items": [{"a": 1}, {"a": 2, "b": 3}]}), json!({"items": [{"a": 1}, {"b": 3}]}))]
    #[case::through_scalar("/a/b", json!({"a": 1}), json!({"a": 1}))]
    fn ignore_pointer_removes_addressed_value(
        #[case] pointer: &str,
        #[case] doc: Value,
        #[case] expected: Value,
    ) {
        let option = ignore_pointer(pointer).expect("pointer is valid");
        let (c, _) = run(&option, &doc, &json!({}));
        assert_eq!(c, expected);
    }

    #[rstest]
    #[case("metadata/generation")]
    #[case("")]
    fn ignore_pointer_requires_leading_slash(#[case] pointer: &str) {
        assert!(ignore_pointer(pointer).is_err());
    }

    #[rstest]
    fn ignore_null_fields_recurses() {
        let (c, m) = run(
            &ignore_null_fields(),
            &json!({"a": null, "b": {"c": null, "d": 1}, "e": [{"f": null}]}),
            &json!({"a": 1}),
        );
        assert_eq!(c, json!({"b": {"d": 1}, "e": [{}]}));
        assert_eq!(m, json!({"a": 1}));
    }

    #[rstest]
    fn options_reject_malformed_documents() {
        let err = ignore_field("a")
            .apply(b"{".to_vec(), b"{}".to_vec())
            .expect_err("malformed current must fail");
        assert!(!err.to_string().is_empty());
    }
}
