//! Keeps per-locale JSON message catalogs in sync with the default locale.
//!
//! Each run flattens the default catalog, compares every value against the
//! hash ledger from the previous run, and asks DeepL for translations of keys
//! that are missing from a target catalog or changed in the source.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod services;
