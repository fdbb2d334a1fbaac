use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{SyncError, TranslateError};

const FREE_API_URL: &str = "https://api-free.deepl.com";
const PRO_API_URL: &str = "https://api.deepl.com";
const FREE_KEY_SUFFIX: &str = ":fx";
const TIMEOUT_SECS: u64 = 60;
const ERROR_SNIPPET_CHARS: usize = 400;

const PLACEHOLDER_MARK: &str = "__";

/// Anything that can turn one text into another language.
pub trait TranslationBackend {
    fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Result<String, TranslateError>;
}

/// DeepL tier for a credential: free keys carry the `:fx` suffix.
pub fn server_url_for(auth_key: &str) -> &'static str {
    if auth_key.ends_with(FREE_KEY_SUFFIX) {
        FREE_API_URL
    } else {
        PRO_API_URL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageKind {
    Source,
    Target,
}

impl LanguageKind {
    fn as_query(self) -> &'static str {
        match self {
            LanguageKind::Source => "source",
            LanguageKind::Target => "target",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Language {
    pub language: String,
    pub name: String,
    #[serde(default)]
    pub supports_formality: bool,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: [&'a str; 1],
    target_lang: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_lang: Option<&'a str>,
    preserve_formatting: bool,
    tag_handling: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<TranslatedText>,
}

#[derive(Debug, Deserialize)]
struct TranslatedText {
    text: String,
}

/// Blocking DeepL v2 client, built once per run.
pub struct DeeplClient {
    client: Client,
    base_url: String,
    auth_key: String,
}

impl DeeplClient {
    /// `server_url` overrides the tier picked from the key suffix.
    pub fn new(auth_key: &str, server_url: Option<&str>) -> Result<Self, SyncError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(SyncError::HttpClient)?;

        let base_url = server_url
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| server_url_for(auth_key))
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            base_url,
            auth_key: auth_key.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_header(&self) -> String {
        format!("DeepL-Auth-Key {}", self.auth_key)
    }

    pub fn languages(&self, kind: LanguageKind) -> Result<Vec<Language>, TranslateError> {
        let resp = self
            .client
            .get(format!("{}/v2/languages", self.base_url))
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .query(&[("type", kind.as_query())])
            .send()?;

        let body = read_success_body(resp)?;
        serde_json::from_str(&body).map_err(|e| TranslateError::InvalidResponse(e.to_string()))
    }
}

impl TranslationBackend for DeeplClient {
    fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Result<String, TranslateError> {
        let body = build_request(text, target_lang, source_lang);

        let resp = self
            .client
            .post(format!("{}/v2/translate", self.base_url))
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .json(&body)
            .send()?;

        let text = read_success_body(resp)?;
        parse_translation(&text)
    }
}

fn build_request<'a>(
    text: &'a str,
    target_lang: &'a str,
    source_lang: Option<&'a str>,
) -> TranslateRequest<'a> {
    TranslateRequest {
        text: [text],
        target_lang,
        source_lang,
        preserve_formatting: true,
        tag_handling: "xml",
    }
}

// Body is read as text first so error messages survive a non-JSON reply.
fn read_success_body(resp: reqwest::blocking::Response) -> Result<String, TranslateError> {
    let status = resp.status();
    let text = resp.text()?;

    if !status.is_success() {
        return Err(TranslateError::Http {
            status: status.as_u16(),
            message: extract_error_message(status, &text),
        });
    }

    Ok(text)
}

fn parse_translation(body: &str) -> Result<String, TranslateError> {
    let parsed: TranslateResponse =
        serde_json::from_str(body).map_err(|e| TranslateError::InvalidResponse(e.to_string()))?;

    parsed
        .translations
        .into_iter()
        .next()
        .map(|t| t.text)
        .ok_or_else(|| TranslateError::InvalidResponse("empty translations array".into()))
}

fn extract_error_message(status: StatusCode, body_text: &str) -> String {
    // DeepL: { "message": "..." }; some proxies: { "error": { "message": "..." } }
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(body_text) {
        if let Some(msg) = v.get("message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
        if let Some(msg) = v
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return msg.to_string();
        }
    }

    let trimmed = body_text.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string();
    }

    if trimmed.chars().count() > ERROR_SNIPPET_CHARS {
        let snippet: String = trimmed.chars().take(ERROR_SNIPPET_CHARS).collect();
        format!("{snippet}...")
    } else {
        trimmed.to_string()
    }
}

/// `__name__` style tokens are opaque and never translated.
pub fn is_placeholder(text: &str) -> bool {
    text.starts_with(PLACEHOLDER_MARK) && text.ends_with(PLACEHOLDER_MARK)
}

pub fn should_skip(text: &str) -> bool {
    text.trim().is_empty() || is_placeholder(text)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TranslationStats {
    pub api_calls: usize,
    pub skipped: usize,
    pub failed: usize,
    pub billed_characters: usize,
}

/// Adapter the orchestrator talks to: skips placeholders, falls back to the
/// original text on any backend error.
pub struct Translator<'a> {
    backend: &'a dyn TranslationBackend,
    source_lang: Option<String>,
    stats: TranslationStats,
}

impl<'a> Translator<'a> {
    pub fn new(backend: &'a dyn TranslationBackend, source_lang: Option<String>) -> Self {
        Self {
            backend,
            source_lang,
            stats: TranslationStats::default(),
        }
    }

    pub fn translate(&mut self, text: &str, target_lang: &str) -> String {
        if should_skip(text) {
            self.stats.skipped += 1;
            debug!(text, "skipping placeholder or empty text");
            return text.to_string();
        }

        self.stats.api_calls += 1;
        self.stats.billed_characters += text.chars().count();

        match self
            .backend
            .translate(text, target_lang, self.source_lang.as_deref())
        {
            Ok(translated) => translated,
            Err(e) => {
                self.stats.failed += 1;
                warn!(target_lang, error = %e, "translation failed, keeping source text");
                text.to_string()
            }
        }
    }

    pub fn stats(&self) -> TranslationStats {
        self.stats
    }
}
