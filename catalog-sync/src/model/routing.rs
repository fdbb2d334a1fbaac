use serde::{Deserialize, Serialize};

/// Locales the app ships and the one every other catalog is derived from.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RoutingConfig {
    pub locales: Vec<String>,

    #[serde(alias = "defaultLocale")]
    pub default_locale: String,
}

impl RoutingConfig {
    /// Every configured locale except the default, in declaration order.
    pub fn target_locales(&self) -> Vec<&str> {
        self.locales
            .iter()
            .map(String::as_str)
            .filter(|l| *l != self.default_locale)
            .collect()
    }

    /// DeepL source code for the default locale (`de`, `pt-BR` → `DE`, `PT`).
    pub fn source_lang_code(&self) -> String {
        self.default_locale
            .split('-')
            .next()
            .unwrap_or_default()
            .to_uppercase()
    }
}
