use std::path::PathBuf;

use crate::error::SyncError;

pub const DEFAULT_LOCALES_DIR: &str = "src/messages";
pub const DEFAULT_ROUTING_FILE: &str = "src/i18n/routing.ts";
pub const HASHES_FILE_NAME: &str = ".translation_hashes.json";

pub const API_KEY_ENV: &str = "DEEPL_API_KEY";
pub const SERVER_URL_ENV: &str = "DEEPL_SERVER_URL";

/// Where a run reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub locales_dir: PathBuf,
    pub routing_file: PathBuf,
    pub hashes_file: PathBuf,
    pub dry_run: bool,
}

impl SyncConfig {
    /// The ledger defaults to `<locales_dir>/.translation_hashes.json`.
    pub fn new(
        locales_dir: impl Into<PathBuf>,
        routing_file: impl Into<PathBuf>,
        hashes_file: Option<PathBuf>,
    ) -> Self {
        let locales_dir = locales_dir.into();
        let hashes_file = hashes_file.unwrap_or_else(|| locales_dir.join(HASHES_FILE_NAME));

        Self {
            locales_dir,
            routing_file: routing_file.into(),
            hashes_file,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn catalog_path(&self, locale: &str) -> PathBuf {
        self.locales_dir.join(format!("{locale}.json"))
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALES_DIR, DEFAULT_ROUTING_FILE, None)
    }
}

#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub server_url: Option<String>,
}

impl Credentials {
    pub fn from_values(api_key: Option<String>, server_url: Option<String>) -> Result<Self, SyncError> {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(SyncError::MissingCredential)?;

        Ok(Self {
            api_key,
            server_url: server_url.filter(|s| !s.trim().is_empty()),
        })
    }
}

// Keeps the key out of debug logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"***")
            .field("server_url", &self.server_url)
            .finish()
    }
}
