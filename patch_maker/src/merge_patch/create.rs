//! Two-way merge patch generation.

use serde_json::{Map, Value};

/// Compute the RFC 7386 merge patch that turns `from` into `to`.
///
/// Keys missing from `to` map to `null`; nested objects are diffed
/// recursively; arrays and scalars replace wholesale. An empty map means the
/// objects are identical.
pub(crate) fn diff_objects(from: &Map<String, Value>, to: &Map<String, Value>) -> Map<String, Value> {
    let mut patch = Map::new();
    for key in from.keys() {
        if !to.contains_key(key) {
            patch.insert(key.clone(), Value::Null);
        }
    }
    for (key, target) in to {
        match from.get(key) {
            Some(source) if source == target => {}
            Some(Value::Object(source)) => match target {
                Value::Object(target_map) => {
                    let nested = diff_objects(source, target_map);
                    if !nested.is_empty() {
                        patch.insert(key.clone(), Value::Object(nested));
                    }
                }
                _ => {
                    patch.insert(key.clone(), target.clone());
                }
            },
            _ => {
                patch.insert(key.clone(), target.clone());
            }
        }
    }
    patch
}
