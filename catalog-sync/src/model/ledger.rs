use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key path → short hash of the source value seen on the last run.
///
/// Entries are only ever inserted or overwritten.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct HashLedger {
    entries: BTreeMap<String, String>,
}

impl HashLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key_path: &str) -> Option<&str> {
        self.entries.get(key_path).map(String::as_str)
    }

    /// Records `hash` for `key_path`, returning the previous hash.
    pub fn record(&mut self, key_path: &str, hash: String) -> Option<String> {
        self.entries.insert(key_path.to_string(), hash)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
