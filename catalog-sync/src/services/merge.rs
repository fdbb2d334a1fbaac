use serde_json::{Map, Value};

use crate::model::catalog::{split_path, Catalog};

/// Writes `value` at `path`, creating intermediate objects as needed.
///
/// A non-object found on the way is replaced by an object. Sibling keys are
/// left untouched.
pub fn set_nested(tree: &mut Catalog, path: &str, value: Value) {
    let segments = split_path(path);
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut current = tree;
    for segment in parents {
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        current = match slot {
            Value::Object(map) => map,
            _ => unreachable!("slot was just replaced by an object"),
        };
    }

    current.insert(last.to_string(), value);
}

/// Applies every `(path, value)` pair to `tree`.
pub fn merge_into<I>(tree: &mut Catalog, updates: I)
where
    I: IntoIterator<Item = (String, Value)>,
{
    for (path, value) in updates {
        set_nested(tree, &path, value);
    }
}
