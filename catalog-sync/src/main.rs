use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info, warn};

use catalog_sync::config::{
    Credentials, SyncConfig, API_KEY_ENV, DEFAULT_LOCALES_DIR, DEFAULT_ROUTING_FILE, SERVER_URL_ENV,
};
use catalog_sync::logging;
use catalog_sync::services::pipeline::{self, SyncReport};
use catalog_sync::services::translator::{DeeplClient, LanguageKind};

#[derive(Parser)]
#[command(name = "catalog-sync")]
#[command(version)]
#[command(about = "Translate new and changed message catalog keys with DeepL")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory holding <locale>.json catalogs
    #[arg(long, default_value = DEFAULT_LOCALES_DIR)]
    locales_dir: PathBuf,

    /// Routing module (or .json config) declaring locales and defaultLocale
    #[arg(long, default_value = DEFAULT_ROUTING_FILE)]
    routing_file: PathBuf,

    /// Hash ledger path [default: <locales-dir>/.translation_hashes.json]
    #[arg(long)]
    hashes_file: Option<PathBuf>,

    /// Show what would be translated without calling DeepL or writing files
    #[arg(long)]
    dry_run: bool,

    #[arg(long, env = API_KEY_ENV, hide_env_values = true, hide = true)]
    api_key: Option<String>,

    #[arg(long, env = SERVER_URL_ENV, hide = true)]
    server_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List languages supported by the DeepL account
    Languages {
        #[arg(short, long, value_enum, default_value = "target")]
        kind: LanguageKindArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LanguageKindArg {
    Source,
    Target,
}

impl From<LanguageKindArg> for LanguageKind {
    fn from(arg: LanguageKindArg) -> Self {
        match arg {
            LanguageKindArg::Source => LanguageKind::Source,
            LanguageKindArg::Target => LanguageKind::Target,
        }
    }
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let credentials = Credentials::from_values(cli.api_key.clone(), cli.server_url.clone());

    if let Some(Commands::Languages { kind }) = cli.command {
        let credentials =
            credentials.with_context(|| format!("set {API_KEY_ENV} (e.g. in CI secrets)"))?;
        return list_languages(&credentials, kind.into());
    }

    let cfg = SyncConfig::new(cli.locales_dir, cli.routing_file, cli.hashes_file)
        .with_dry_run(cli.dry_run);

    let report = if cfg.dry_run {
        // No request is ever sent in a dry run, so the key may be absent.
        let key = credentials.map(|c| c.api_key).unwrap_or_default();
        let client = DeeplClient::new(&key, None)?;
        pipeline::run(&cfg, &client)?
    } else {
        let credentials =
            credentials.with_context(|| format!("set {API_KEY_ENV} (e.g. in CI secrets)"))?;
        let client = DeeplClient::new(&credentials.api_key, credentials.server_url.as_deref())?;
        info!(endpoint = client.base_url(), "using DeepL");
        pipeline::run(&cfg, &client)?
    };

    log_summary(&report);
    Ok(())
}

fn list_languages(credentials: &Credentials, kind: LanguageKind) -> Result<()> {
    let client = DeeplClient::new(&credentials.api_key, credentials.server_url.as_deref())?;
    let languages = client
        .languages(kind)
        .context("failed to fetch DeepL languages")?;

    for lang in languages {
        let formality = if lang.supports_formality { " (formality)" } else { "" };
        println!("{:6} - {}{}", lang.language, lang.name, formality);
    }
    Ok(())
}

fn log_summary(report: &SyncReport) {
    if report.dry_run {
        let planned: usize = report.locales.iter().map(|l| l.scheduled()).sum();
        info!(planned, "dry run complete, nothing written");
        return;
    }

    if report.stats.failed > 0 {
        warn!(
            failed = report.stats.failed,
            "some keys kept their source text after translation errors"
        );
    }

    info!(
        total_translations = report.total_translations,
        changed_keys = report.changed_keys,
        api_calls = report.stats.api_calls,
        billed_characters = report.stats.billed_characters,
        "translation complete"
    );
}
