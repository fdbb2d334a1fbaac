use std::path::Path;

use regex::Regex;

use crate::error::SyncError;
use crate::model::routing::RoutingConfig;
use crate::services::store::read_text;

const LOCALES_PATTERN: &str = r"locales\s*:\s*\[([^\]]*)\]";
const LOCALE_CODE_PATTERN: &str = r#"['"]([a-z]{2}(?:-[A-Za-z]{2})?)['"]"#;
const DEFAULT_LOCALE_PATTERN: &str = r#"defaultLocale\s*:\s*['"]([a-z]{2}(?:-[A-Za-z]{2})?)['"]"#;

/// Loads the routing config. `.json` files are parsed as structured config,
/// anything else is scanned for `locales: [...]` and `defaultLocale: '..'`.
pub fn load(path: &Path) -> Result<RoutingConfig, SyncError> {
    if !path.exists() {
        return Err(SyncError::RoutingFileNotFound(path.to_path_buf()));
    }

    let content = read_text(path).map_err(|source| SyncError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let config = if is_json {
        serde_json::from_str::<RoutingConfig>(&content).map_err(|e| SyncError::RoutingParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    } else {
        parse_source(&content, path)?
    };

    validate(config, path)
}

/// Scrapes the two declarations out of a routing module's source text.
pub fn parse_source(content: &str, path: &Path) -> Result<RoutingConfig, SyncError> {
    // Patterns are constants; a failure here is a programming error.
    let locales_re = Regex::new(LOCALES_PATTERN).expect("valid locales regex");
    let code_re = Regex::new(LOCALE_CODE_PATTERN).expect("valid locale code regex");
    let default_re = Regex::new(DEFAULT_LOCALE_PATTERN).expect("valid defaultLocale regex");

    let locales_src = locales_re
        .captures(content)
        .and_then(|c| c.get(1))
        .ok_or_else(|| SyncError::RoutingDeclarationMissing {
            what: "locales",
            path: path.to_path_buf(),
        })?
        .as_str();

    let locales: Vec<String> = code_re
        .captures_iter(locales_src)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect();

    let default_locale = default_re
        .captures(content)
        .and_then(|c| c.get(1))
        .ok_or_else(|| SyncError::RoutingDeclarationMissing {
            what: "defaultLocale",
            path: path.to_path_buf(),
        })?
        .as_str()
        .to_string();

    Ok(RoutingConfig {
        locales,
        default_locale,
    })
}

fn validate(config: RoutingConfig, path: &Path) -> Result<RoutingConfig, SyncError> {
    if config.locales.is_empty() {
        return Err(SyncError::RoutingParse {
            path: path.to_path_buf(),
            message: "locales list is empty".into(),
        });
    }
    if config.default_locale.trim().is_empty() {
        return Err(SyncError::RoutingParse {
            path: path.to_path_buf(),
            message: "defaultLocale is empty".into(),
        });
    }
    Ok(config)
}
