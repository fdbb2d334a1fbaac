use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::model::routing::RoutingConfig;
use crate::services::{
    change::{self, PlanReason, PlannedKey},
    flatten::flatten,
    languages::deepl_target_code,
    merge::merge_into,
    routing, store,
    translator::{TranslationBackend, TranslationStats, Translator},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocaleStatus {
    UpToDate,
    Translated,
    Planned,
    Unsupported,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocaleReport {
    pub locale: String,
    pub deepl_code: Option<String>,
    pub status: LocaleStatus,
    pub missing: usize,
    pub changed: usize,
}

impl LocaleReport {
    pub fn scheduled(&self) -> usize {
        self.missing + self.changed
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub source_locale: String,
    pub source_keys: usize,
    pub new_keys: usize,
    pub changed_keys: usize,
    pub total_translations: usize,
    pub dry_run: bool,
    pub locales: Vec<LocaleReport>,
    pub stats: TranslationStats,
}

impl SyncReport {
    fn empty(source_locale: &str, dry_run: bool) -> Self {
        Self {
            source_locale: source_locale.to_string(),
            source_keys: 0,
            new_keys: 0,
            changed_keys: 0,
            total_translations: 0,
            dry_run,
            locales: Vec::new(),
            stats: TranslationStats::default(),
        }
    }
}

/// Reads the routing file, then syncs every target catalog.
pub fn run(cfg: &SyncConfig, backend: &dyn TranslationBackend) -> Result<SyncReport, SyncError> {
    let routing = routing::load(&cfg.routing_file)?;
    run_with_routing(cfg, &routing, backend)
}

pub fn run_with_routing(
    cfg: &SyncConfig,
    routing: &RoutingConfig,
    backend: &dyn TranslationBackend,
) -> Result<SyncReport, SyncError> {
    let source_locale = routing.default_locale.as_str();
    let mut report = SyncReport::empty(source_locale, cfg.dry_run);

    info!(source = source_locale, locales = %routing.locales.join(", "), "starting catalog sync");

    let targets = routing.target_locales();
    if targets.is_empty() {
        warn!("no target locales configured, only the default locale");
        return Ok(report);
    }

    let source_path = cfg.catalog_path(source_locale);
    let source = flatten(&store::load_source_catalog(&source_path)?);
    info!(path = %source_path.display(), keys = source.len(), "loaded source catalog");

    let mut ledger = store::load_ledger(&cfg.hashes_file);
    let changes = change::detect(&source, &mut ledger);

    report.source_keys = source.len();
    report.new_keys = changes.new.len();
    report.changed_keys = changes.changed.len();

    let mut translator = Translator::new(backend, Some(routing.source_lang_code()));

    for locale in targets {
        let Some(code) = deepl_target_code(locale) else {
            warn!(locale, "skipping locale not supported by DeepL");
            report.locales.push(LocaleReport {
                locale: locale.to_string(),
                deepl_code: None,
                status: LocaleStatus::Unsupported,
                missing: 0,
                changed: 0,
            });
            continue;
        };

        let target_path = cfg.catalog_path(locale);
        let mut target = store::load_target_catalog(&target_path);
        let plan = change::plan_locale(&source, &target, &changes);

        let mut locale_report = LocaleReport {
            locale: locale.to_string(),
            deepl_code: Some(code.to_string()),
            status: LocaleStatus::UpToDate,
            missing: count(&plan, PlanReason::Missing),
            changed: count(&plan, PlanReason::Changed),
        };

        if plan.is_empty() {
            info!(locale, "all keys present and up to date");
            report.locales.push(locale_report);
            continue;
        }

        info!(
            locale,
            keys = plan.len(),
            changed = locale_report.changed,
            "translating keys"
        );

        if cfg.dry_run {
            for key in &plan {
                info!(locale, key = %key.key_path, reason = ?key.reason, "would translate");
            }
            locale_report.status = LocaleStatus::Planned;
            report.locales.push(locale_report);
            continue;
        }

        let updates: Vec<(String, Value)> = plan
            .into_iter()
            .map(|key| {
                let value = match key.source {
                    Value::String(text) => Value::String(translator.translate(&text, code)),
                    other => other,
                };
                debug!(locale, key = %key.key_path, reason = ?key.reason, "translated");
                (key.key_path, value)
            })
            .collect();

        report.total_translations += updates.len();
        merge_into(&mut target, updates);

        store::save_catalog(&target_path, &target)?;
        info!(locale, path = %target_path.display(), "saved translations");

        locale_report.status = LocaleStatus::Translated;
        report.locales.push(locale_report);
    }

    if !cfg.dry_run {
        store::save_ledger(&cfg.hashes_file, &ledger)?;
    }

    report.stats = translator.stats();
    Ok(report)
}

fn count(plan: &[PlannedKey], reason: PlanReason) -> usize {
    plan.iter().filter(|k| k.reason == reason).count()
}
