//! End-to-end runs of the sync pipeline against temp catalogs.

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use catalog_sync::config::SyncConfig;
use catalog_sync::error::{SyncError, TranslateError};
use catalog_sync::logging;
use catalog_sync::services::hash::short_hash;
use catalog_sync::services::pipeline::{self, LocaleStatus};
use catalog_sync::services::translator::TranslationBackend;
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};

/// Records every request; fails for texts listed in `fail_on`.
#[derive(Default)]
struct RecordingBackend {
    calls: RefCell<Vec<(String, String)>>,
    fail_on: Vec<String>,
}

impl RecordingBackend {
    fn failing_on(texts: &[&str]) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail_on: texts.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl TranslationBackend for RecordingBackend {
    fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Result<String, TranslateError> {
        assert_eq!(source_lang, Some("DE"));
        self.calls
            .borrow_mut()
            .push((text.to_string(), target_lang.to_string()));

        if self.fail_on.iter().any(|t| t == text) {
            return Err(TranslateError::Http {
                status: 500,
                message: "Internal error".into(),
            });
        }
        Ok(format!("<{target_lang} {text}>"))
    }
}

struct Project {
    dir: TempDir,
    cfg: SyncConfig,
}

impl Project {
    fn new(locales: &[&str]) -> Self {
        let dir = tempdir().unwrap();
        let routing = dir.path().join("src/i18n/routing.ts");
        fs::create_dir_all(routing.parent().unwrap()).unwrap();
        fs::create_dir_all(dir.path().join("src/messages")).unwrap();

        let list = locales
            .iter()
            .map(|l| format!("'{l}'"))
            .collect::<Vec<_>>()
            .join(", ");
        fs::write(
            &routing,
            format!("export const routing = defineRouting({{\n  locales: [{list}],\n  defaultLocale: 'de'\n}});\n"),
        )
        .unwrap();

        let cfg = SyncConfig::new(dir.path().join("src/messages"), routing, None);
        Self { dir, cfg }
    }

    fn write_catalog(&self, locale: &str, value: Value) {
        fs::write(
            self.cfg.catalog_path(locale),
            serde_json::to_string_pretty(&value).unwrap(),
        )
        .unwrap();
    }

    fn read_json(&self, path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    fn catalog(&self, locale: &str) -> Value {
        self.read_json(&self.cfg.catalog_path(locale))
    }

    fn ledger(&self) -> Value {
        self.read_json(&self.cfg.hashes_file)
    }
}

#[test]
fn first_run_translates_into_empty_target() {
    logging::init_test();
    let project = Project::new(&["de", "en"]);
    project.write_catalog("de", json!({ "a": { "b": "Hallo" } }));
    project.write_catalog("en", json!({}));

    let backend = RecordingBackend::default();
    let report = pipeline::run(&project.cfg, &backend).unwrap();

    assert_eq!(project.catalog("en"), json!({ "a": { "b": "<EN-US Hallo>" } }));
    assert_eq!(project.ledger(), json!({ "a.b": short_hash("Hallo") }));
    assert_eq!(report.total_translations, 1);
    assert_eq!(report.locales[0].status, LocaleStatus::Translated);
    assert_eq!(report.locales[0].missing, 1);
}

#[test]
fn rerun_without_changes_makes_no_calls() {
    let project = Project::new(&["de", "en", "ru"]);
    project.write_catalog("de", json!({ "nav": { "home": "Start" }, "title": "Titel" }));

    let first = RecordingBackend::default();
    pipeline::run(&project.cfg, &first).unwrap();
    assert_eq!(first.call_count(), 4);

    let en_before = project.catalog("en");
    let ru_before = project.catalog("ru");
    let ledger_before = project.ledger();

    let second = RecordingBackend::default();
    let report = pipeline::run(&project.cfg, &second).unwrap();

    assert_eq!(second.call_count(), 0);
    assert_eq!(project.catalog("en"), en_before);
    assert_eq!(project.catalog("ru"), ru_before);
    assert_eq!(project.ledger(), ledger_before);
    assert!(report
        .locales
        .iter()
        .all(|l| l.status == LocaleStatus::UpToDate));
}

#[test]
fn translation_error_keeps_source_text_and_run_succeeds() {
    let project = Project::new(&["de", "en"]);
    project.write_catalog("de", json!({ "x": { "y": "Kaputt" }, "ok": "Gut" }));

    let backend = RecordingBackend::failing_on(&["Kaputt"]);
    let report = pipeline::run(&project.cfg, &backend).unwrap();

    assert_eq!(
        project.catalog("en"),
        json!({ "x": { "y": "Kaputt" }, "ok": "<EN-US Gut>" })
    );
    assert_eq!(report.stats.failed, 1);
    assert!(project.ledger().get("x.y").is_some());
}

#[test]
fn changed_source_value_is_retranslated_and_others_kept() {
    let project = Project::new(&["de", "en"]);
    project.write_catalog("de", json!({ "a": "Eins", "b": "Zwei" }));
    pipeline::run(&project.cfg, &RecordingBackend::default()).unwrap();

    // Hand-edited translation for an unchanged key must survive.
    project.write_catalog("en", json!({ "a": "One (reviewed)", "b": "<EN-US Zwei>" }));
    project.write_catalog("de", json!({ "a": "Eins", "b": "Zwei!" }));

    let backend = RecordingBackend::default();
    let report = pipeline::run(&project.cfg, &backend).unwrap();

    assert_eq!(
        *backend.calls.borrow(),
        vec![("Zwei!".to_string(), "EN-US".to_string())]
    );
    assert_eq!(
        project.catalog("en"),
        json!({ "a": "One (reviewed)", "b": "<EN-US Zwei!>" })
    );
    assert_eq!(report.changed_keys, 1);
    assert_eq!(report.locales[0].changed, 1);
}

#[test]
fn key_missing_from_target_is_translated_even_when_hash_known() {
    let project = Project::new(&["de", "en"]);
    project.write_catalog("de", json!({ "a": "Eins", "b": "Zwei" }));
    pipeline::run(&project.cfg, &RecordingBackend::default()).unwrap();

    project.write_catalog("en", json!({ "a": "One" }));

    let backend = RecordingBackend::default();
    pipeline::run(&project.cfg, &backend).unwrap();

    assert_eq!(backend.call_count(), 1);
    assert_eq!(project.catalog("en"), json!({ "a": "One", "b": "<EN-US Zwei>" }));
}

#[test]
fn placeholders_and_non_strings_are_copied_verbatim() {
    let project = Project::new(&["de", "en"]);
    project.write_catalog(
        "de",
        json!({ "token": "__count__", "limit": 5, "empty": "", "text": "Hallo" }),
    );

    let backend = RecordingBackend::default();
    pipeline::run(&project.cfg, &backend).unwrap();

    assert_eq!(
        *backend.calls.borrow(),
        vec![("Hallo".to_string(), "EN-US".to_string())]
    );
    assert_eq!(
        project.catalog("en"),
        json!({ "token": "__count__", "limit": 5, "empty": "", "text": "<EN-US Hallo>" })
    );
}

#[test]
fn unsupported_locale_is_skipped() {
    let project = Project::new(&["de", "xx", "en"]);
    project.write_catalog("de", json!({ "a": "Eins" }));

    let report = pipeline::run(&project.cfg, &RecordingBackend::default()).unwrap();

    assert_eq!(report.locales[0].status, LocaleStatus::Unsupported);
    assert_eq!(report.locales[1].status, LocaleStatus::Translated);
    assert!(!project.cfg.catalog_path("xx").exists());
}

#[test]
fn dry_run_writes_nothing_and_calls_nothing() {
    let project = Project::new(&["de", "en"]);
    project.write_catalog("de", json!({ "a": "Eins" }));
    let cfg = project.cfg.clone().with_dry_run(true);

    let backend = RecordingBackend::default();
    let report = pipeline::run(&cfg, &backend).unwrap();

    assert_eq!(backend.call_count(), 0);
    assert_eq!(report.locales[0].status, LocaleStatus::Planned);
    assert_eq!(report.locales[0].scheduled(), 1);
    assert!(!cfg.catalog_path("en").exists());
    assert!(!cfg.hashes_file.exists());
}

#[test]
fn only_default_locale_is_a_no_op() {
    let project = Project::new(&["de"]);

    let report = pipeline::run(&project.cfg, &RecordingBackend::default()).unwrap();

    assert!(report.locales.is_empty());
    assert!(!project.cfg.hashes_file.exists());
}

#[test]
fn missing_source_catalog_is_fatal() {
    let project = Project::new(&["de", "en"]);

    let err = pipeline::run(&project.cfg, &RecordingBackend::default()).unwrap_err();

    assert!(matches!(err, SyncError::SourceCatalogNotFound(_)));
    assert!(project.dir.path().join("src/messages").read_dir().unwrap().next().is_none());
}

#[test]
fn ledger_from_python_script_is_honoured() {
    let project = Project::new(&["de", "en"]);
    project.write_catalog("de", json!({ "a": "Eins", "b": "Zwei" }));
    project.write_catalog("en", json!({ "a": "One (reviewed)", "b": "Two (reviewed)" }));
    fs::write(
        &project.cfg.hashes_file,
        r#"{"a": "f0d1ed3d", "b": "6139e7d0"}"#,
    )
    .unwrap();

    let backend = RecordingBackend::default();
    let report = pipeline::run(&project.cfg, &backend).unwrap();

    assert_eq!(backend.call_count(), 0);
    assert_eq!(report.changed_keys, 0);
    assert_eq!(
        project.catalog("en"),
        json!({ "a": "One (reviewed)", "b": "Two (reviewed)" })
    );
}
