//! Three-way merge patch generation.

use serde_json::{Map, Value};

/// Compute the patch that carries the user's `original` → `modified` delta
/// onto `current`.
///
/// Rules, per key:
/// - present in `modified` but missing from `current`: set it;
/// - unchanged between `original` and `modified`: leave the live value alone;
/// - already equal between `modified` and `current`: nothing to do;
/// - objects on both the desired and live side: recurse, using the original
///   sub-object (or `{}`) as the base;
/// - anything else: set the desired value;
/// - dropped from `modified` but still present in `current`: delete it.
pub(crate) fn three_way_objects(
    original: &Map<String, Value>,
    modified: &Map<String, Value>,
    current: &Map<String, Value>,
) -> Map<String, Value> {
    let mut patch = Map::new();

    for key in original.keys() {
        if !modified.contains_key(key) && current.contains_key(key) {
            patch.insert(key.clone(), Value::Null);
        }
    }

    for (key, desired) in modified {
        let Some(live) = current.get(key) else {
            patch.insert(key.clone(), desired.clone());
            continue;
        };
        let base = original.get(key);
        if base == Some(desired) || live == desired {
            continue;
        }
        match (desired, live) {
            (Value::Object(desired_map), Value::Object(live_map)) => {
                let empty = Map::new();
                let base_map = base.and_then(Value::as_object).unwrap_or(&empty);
                let nested = three_way_objects(base_map, desired_map, live_map);
                if !nested.is_empty() {
                    patch.insert(key.clone(), Value::Object(nested));
                }
            }
            _ => {
                patch.insert(key.clone(), desired.clone());
            }
        }
    }

    patch
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::three_way_objects;

    fn three_way(original: &Value, modified: &Value, current: &Value) -> Value {
        let (Some(o), Some(m), Some(c)) = (
            original.as_object(),
            modified.as_object(),
            current.as_object(),
        ) else {
            panic!("test inputs must be objects");
        };
        Value::Object(three_way_objects(o, m, c))
    }

    #[rstest]
    #[case::user_change(json!({"a": 1}), json!({"a": 2}), json!({"a": 1}), json!({"a": 2}))]
    #[case::external_addition_kept(
        json!({"a": 1}),
        json!({"a": 1}),
        json!({"a": 1, "b": 9}),
        json!({}),
    )]
    #[case::drift_tolerated(
        json!({"a": 1, "b": 1}),
        json!({"a": 2, "b": 1}),
        json!({"a": 1, "b": 9}),
        json!({"a": 2}),
    )]
    #[case::user_deletion(json!({"a": 1, "b": 1}), json!({"a": 1}), json!({"a": 1, "b": 1}), json!({"b": null}))]
    #[case::deletion_already_applied(json!({"a": 1, "b": 1}), json!({"a": 1}), json!({"a": 1}), json!({}))]
    #[case::missing_live_key_restored(json!({"a": 1}), json!({"a": 1}), json!({}), json!({"a": 1}))]
    #[case::change_already_live(json!({"a": 1}), json!({"a": 2}), json!({"a": 2}), json!({}))]
    #[case::nested_change(
        json!({"spec": {"replicas": 1, "paused": false}}),
        json!({"spec": {"replicas": 2, "paused": false}}),
        json!({"spec": {"replicas": 1, "paused": true, "extra": "x"}}),
        json!({"spec": {"replicas": 2}}),
    )]
    #[case::nested_without_base(
        json!({}),
        json!({"spec": {"replicas": 2}}),
        json!({"spec": {"replicas": 1, "extra": "x"}}),
        json!({"spec": {"replicas": 2}}),
    )]
    #[case::object_replaces_scalar(json!({}), json!({"a": {"b": 1}}), json!({"a": 3}), json!({"a": {"b": 1}}))]
    fn three_way_carries_user_delta(
        #[case] original: Value,
        #[case] modified: Value,
        #[case] current: Value,
        #[case] expected: Value,
    ) {
        assert_eq!(three_way(&original, &modified, &current), expected);
    }
}
