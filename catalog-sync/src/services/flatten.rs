use serde_json::Value;

use crate::model::catalog::{join_path, split_path, Catalog, FlatCatalog};

/// Flattens a nested catalog into dotted key path → leaf.
///
/// Empty objects produce no entries.
pub fn flatten(tree: &Catalog) -> FlatCatalog {
    let mut out = FlatCatalog::new();
    collect(tree, "", &mut out);
    out
}

fn collect(tree: &Catalog, prefix: &str, out: &mut FlatCatalog) {
    for (key, value) in tree {
        let path = join_path(prefix, key);
        match value {
            Value::Object(child) => collect(child, &path, out),
            leaf => {
                out.insert(path, leaf.clone());
            }
        }
    }
}

/// Leaf at `path`, or `None` if any segment is missing, the value is an
/// object, or the value is null.
pub fn get_nested<'a>(tree: &'a Catalog, path: &str) -> Option<&'a Value> {
    let segments = split_path(path);
    let (last, parents) = segments.split_last()?;

    let mut current = tree;
    for segment in parents {
        current = current.get(*segment)?.as_object()?;
    }

    match current.get(*last)? {
        Value::Object(_) | Value::Null => None,
        leaf => Some(leaf),
    }
}
