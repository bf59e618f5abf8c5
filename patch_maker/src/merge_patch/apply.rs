//! Merge patch application.

use serde_json::{Map, Value};

/// Apply the RFC 7386 merge patch `patch` to `target` in place.
///
/// Behaviour:
/// - A non-object patch replaces `target` wholesale.
/// - An object patch turns a non-object `target` into `{}` first, then
///   removes every key whose patch value is `null` and recursively merges
///   the rest.
///
/// # Examples
///
/// ```ignore
/// let mut doc = json!({"a": 1, "b": {"c": 2}});
/// merge_value(&mut doc, json!({"a": null, "b": {"d": 3}}));
/// assert_eq!(doc, json!({"b": {"c": 2, "d": 3}}));
/// ```
pub(crate) fn merge_value(target: &mut Value, patch: Value) {
    match patch {
        Value::Object(map) => merge_object(target, map),
        _ => *target = patch,
    }
}

fn merge_object(target: &mut Value, patch: Map<String, Value>) {
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }

    let Some(target_map) = target.as_object_mut() else {
        return;
    };

    for (key, value) in patch {
        if value.is_null() {
            target_map.remove(&key);
            continue;
        }
        let slot = target_map.entry(key).or_insert(Value::Null);
        merge_value(slot, value);
    }
}
