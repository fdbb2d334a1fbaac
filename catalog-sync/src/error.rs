use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a sync run.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("DEEPL_API_KEY environment variable not set")]
    MissingCredential,

    #[error("routing file {} not found", .0.display())]
    RoutingFileNotFound(PathBuf),

    #[error("could not find {what} declaration in {}", .path.display())]
    RoutingDeclarationMissing { what: &'static str, path: PathBuf },

    #[error("invalid routing config {}: {message}", .path.display())]
    RoutingParse { path: PathBuf, message: String },

    #[error("source catalog {} not found", .0.display())]
    SourceCatalogNotFound(PathBuf),

    #[error("source catalog {} is not a JSON object: {message}", .path.display())]
    SourceCatalogInvalid { path: PathBuf, message: String },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Errors from a single translation request. These never abort a run.
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
