use serde_json::{Map, Value};

/// Nested locale catalog as read from `<locale>.json`.
pub type Catalog = Map<String, Value>;

/// Key path → leaf value. Keeps source order.
pub type FlatCatalog = Map<String, Value>;

pub const KEY_SEPARATOR: char = '.';

pub fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}{KEY_SEPARATOR}{key}")
    }
}

pub fn split_path(path: &str) -> Vec<&str> {
    path.split(KEY_SEPARATOR).collect()
}

/// Text handed to the translator and the hasher for a leaf.
///
/// Strings are used as-is; other leaves use their compact JSON form.
pub fn leaf_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
