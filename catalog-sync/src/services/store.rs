use std::{
    fs, io,
    path::{Path, PathBuf},
};

use encoding_rs::UTF_8;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::SyncError;
use crate::model::catalog::Catalog;
use crate::model::ledger::HashLedger;

/// Reads a UTF-8 text file, dropping a leading BOM.
pub fn read_text(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    let (text, _had_errors) = UTF_8.decode_with_bom_removal(&bytes);
    Ok(text.into_owned())
}

fn parse_catalog(text: &str) -> Result<Catalog, String> {
    match serde_json::from_str::<Value>(text).map_err(|e| e.to_string())? {
        Value::Object(map) => Ok(map),
        other => Err(format!("expected an object, found {}", json_kind(&other))),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub fn load_source_catalog(path: &Path) -> Result<Catalog, SyncError> {
    if !path.exists() {
        return Err(SyncError::SourceCatalogNotFound(path.to_path_buf()));
    }

    let text = read_text(path).map_err(|source| SyncError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_catalog(&text).map_err(|message| SyncError::SourceCatalogInvalid {
        path: path.to_path_buf(),
        message,
    })
}

/// Missing or unreadable target catalogs start out empty.
pub fn load_target_catalog(path: &Path) -> Catalog {
    if !path.exists() {
        return Catalog::new();
    }

    let text = match read_text(path) {
        Ok(s) => s,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read catalog, starting empty");
            return Catalog::new();
        }
    };

    match parse_catalog(&text) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse catalog, starting empty");
            Catalog::new()
        }
    }
}

/// Missing or corrupt ledgers start out empty, so every key counts as new.
pub fn load_ledger(path: &Path) -> HashLedger {
    if !path.exists() {
        return HashLedger::new();
    }

    let text = match read_text(path) {
        Ok(s) => s,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read hash ledger");
            return HashLedger::new();
        }
    };

    match serde_json::from_str(&text) {
        Ok(ledger) => ledger,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse hash ledger");
            HashLedger::new()
        }
    }
}

pub fn save_catalog(path: &Path, catalog: &Catalog) -> Result<(), SyncError> {
    write_json(path, catalog)
}

pub fn save_ledger(path: &Path, ledger: &HashLedger) -> Result<(), SyncError> {
    write_json(path, ledger)
}

// Two-space pretty JSON, non-ASCII kept literal, trailing newline.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), SyncError> {
    let mut json = serde_json::to_string_pretty(value).map_err(|source| SyncError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    json.push('\n');

    write_atomic(path, json.as_bytes()).map_err(|source| SyncError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp = tmp_path(path);
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut p = path.to_path_buf();
    let file_name = match path.file_name().and_then(|s| s.to_str()) {
        Some(n) => n.to_string(),
        None => "catalog".to_string(),
    };
    p.set_file_name(format!("{file_name}.tmp"));
    p
}
