use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::model::catalog::{leaf_text, Catalog, FlatCatalog};
use crate::model::ledger::HashLedger;
use crate::services::{flatten::get_nested, hash};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyChange {
    New,
    Changed,
    Unchanged,
}

/// Outcome of comparing the source catalog to the ledger.
#[derive(Debug, Default, Clone)]
pub struct SourceChanges {
    pub new: BTreeSet<String>,
    pub changed: BTreeSet<String>,
    pub unchanged: usize,
}

impl SourceChanges {
    pub fn is_changed(&self, key_path: &str) -> bool {
        self.changed.contains(key_path)
    }
}

pub fn classify(ledger: &HashLedger, key_path: &str, current_hash: &str) -> KeyChange {
    match ledger.get(key_path) {
        None => KeyChange::New,
        Some(stored) if stored != current_hash => KeyChange::Changed,
        Some(_) => KeyChange::Unchanged,
    }
}

/// Classifies every source key and records its current hash in `ledger`.
pub fn detect(source: &FlatCatalog, ledger: &mut HashLedger) -> SourceChanges {
    let mut changes = SourceChanges::default();

    for (key_path, value) in source {
        let current = hash::short_hash(&leaf_text(value));

        match classify(ledger, key_path, &current) {
            KeyChange::New => {
                changes.new.insert(key_path.clone());
            }
            KeyChange::Changed => {
                debug!(key = %key_path, "changed key detected");
                changes.changed.insert(key_path.clone());
            }
            KeyChange::Unchanged => {
                changes.unchanged += 1;
                continue;
            }
        }

        ledger.record(key_path, current);
    }

    changes
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanReason {
    Missing,
    Changed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedKey {
    pub key_path: String,
    pub source: Value,
    pub reason: PlanReason,
}

/// Keys that must be (re)translated for one target catalog: absent from the
/// target, or changed in the source on this run.
pub fn plan_locale(source: &FlatCatalog, target: &Catalog, changes: &SourceChanges) -> Vec<PlannedKey> {
    source
        .iter()
        .filter_map(|(key_path, value)| {
            let reason = if get_nested(target, key_path).is_none() {
                PlanReason::Missing
            } else if changes.is_changed(key_path) {
                PlanReason::Changed
            } else {
                return None;
            };

            Some(PlannedKey {
                key_path: key_path.clone(),
                source: value.clone(),
                reason,
            })
        })
        .collect()
}
