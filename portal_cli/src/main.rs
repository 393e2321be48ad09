//! # Engineering Portal CLI
//!
//! Terminal shell over `portal_core`: list and run calculators, analyze a
//! BOM file, and look up or change the interface language.
//!
//! Every command prints human-readable text by default and pretty JSON with
//! `--json`. Logs go to stderr so stdout stays machine-readable.

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use portal_core::bom::{AnalysisReport, AnalysisSession, SessionConfig, StaticCatalog, StartOutcome};
use portal_core::calculations::{Domain, FieldMap, Formula};
use portal_core::errors::{PortalError, PortalResult};
use portal_core::i18n::{translate, Locale};
use portal_core::preferences::{PreferenceStore, Preferences};
use portal_core::shell::ShellState;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Parser)]
#[command(name = "portal")]
#[command(author, version, about = "CGM Engineering Portal")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
struct GlobalOpts {
    /// Emit pretty JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Directory holding preferences.json (default: per-user config dir)
    #[arg(long, global = true, env = "PORTAL_CONFIG_DIR")]
    config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List calculators
    Formulas {
        /// electrical, mechanical, rf or thermal
        #[arg(long)]
        domain: Option<String>,
    },

    /// Run a calculator: portal calc ohms-law voltage_v=12 resistance_ohm=4
    Calc {
        /// Formula id (see `portal formulas`)
        formula: String,
        /// NAME=VALUE inputs
        fields: Vec<String>,
    },

    /// Bill of materials tools
    #[command(subcommand)]
    Bom(BomCommands),

    /// Look up a message in the localization tables
    Translate {
        key: String,
        /// en or he (default: saved preference)
        #[arg(long)]
        locale: Option<String>,
    },

    /// Show or change the interface language
    #[command(subcommand)]
    Locale(LocaleCommands),
}

#[derive(Subcommand)]
enum BomCommands {
    /// Ingest a BOM file and report lifecycle status and alternatives
    Analyze {
        file: PathBuf,
        /// Write the annotated BOM as CSV
        #[arg(long)]
        export: Option<PathBuf>,
        /// Analysis delay in milliseconds
        #[arg(long, default_value_t = 3000)]
        delay_ms: u64,
        /// JSON part catalog to use instead of the builtin one
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum LocaleCommands {
    /// Print the saved language
    Show,
    /// Save a new language
    Set { locale: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> PortalResult<()> {
    let global = cli.global;
    match cli.command {
        Commands::Formulas { domain } => list_formulas(domain.as_deref(), &global),
        Commands::Calc { formula, fields } => run_calculation(&formula, &fields, &global),
        Commands::Bom(BomCommands::Analyze {
            file,
            export,
            delay_ms,
            catalog,
        }) => analyze_bom(file, export, Duration::from_millis(delay_ms), catalog, &global),
        Commands::Translate { key, locale } => translate_key(&key, locale.as_deref(), &global),
        Commands::Locale(LocaleCommands::Show) => show_locale(&global),
        Commands::Locale(LocaleCommands::Set { locale }) => set_locale(&locale, &global),
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn store(global: &GlobalOpts) -> PortalResult<PreferenceStore> {
    match &global.config_dir {
        Some(dir) => Ok(PreferenceStore::with_dir(dir)),
        None => PreferenceStore::default_location(),
    }
}

/// Saved preferences, or defaults when they cannot be read.
fn preferences_or_default(global: &GlobalOpts) -> Preferences {
    match store(global).and_then(|s| s.load()) {
        Ok(preferences) => preferences,
        Err(e) => {
            warn!(error = %e, "preferences unavailable, using defaults");
            Preferences::default()
        }
    }
}

fn parse_locale(code: &str) -> PortalResult<Locale> {
    Locale::parse(code).ok_or_else(|| PortalError::invalid_input("locale", code, "Supported locales: en, he"))
}

fn print_json<T: Serialize>(value: &T) -> PortalResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| PortalError::serialization(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

// ============================================================================
// Commands
// ============================================================================

fn list_formulas(domain: Option<&str>, global: &GlobalOpts) -> PortalResult<()> {
    let formulas = match domain {
        Some(text) => {
            let domain = Domain::parse(text).ok_or_else(|| {
                PortalError::invalid_input("domain", text, "Expected electrical, mechanical, rf or thermal")
            })?;
            Formula::in_domain(domain)
        }
        None => Formula::all().to_vec(),
    };
    let metadata: Vec<_> = formulas.iter().map(Formula::metadata).collect();
    if global.json {
        return print_json(&metadata);
    }

    let locale = preferences_or_default(global).language;
    for meta in &metadata {
        let inputs: Vec<String> = meta
            .inputs
            .iter()
            .map(|v| if v.required { v.name.to_string() } else { format!("[{}]", v.name) })
            .collect();
        println!(
            "{:<22} {:<11} {}",
            meta.id,
            meta.domain.as_str(),
            translate(meta.title_key, locale)
        );
        println!("{:<34} {}", "", meta.expression);
        println!("{:<34} inputs: {}", "", inputs.join(" "));
    }
    Ok(())
}

fn run_calculation(id: &str, assignments: &[String], global: &GlobalOpts) -> PortalResult<()> {
    let formula = Formula::from_id(id).ok_or_else(|| PortalError::invalid_input("formula", id, "Unknown formula"))?;
    let fields = FieldMap::parse_assignments(assignments)?;
    let output = formula.build(&fields).ok().and_then(|item| item.evaluate());

    if global.json {
        return print_json(&output);
    }
    let locale = preferences_or_default(global).language;
    println!("{}", translate(formula.metadata().title_key, locale));
    match output {
        Some(output) => {
            let value = serde_json::to_value(&output).map_err(|e| PortalError::serialization(e.to_string()))?;
            if let serde_json::Value::Object(map) = value {
                for (name, value) in map.iter().filter(|(name, _)| name.as_str() != "type") {
                    match value {
                        serde_json::Value::String(text) => println!("  {} = {}", name, text),
                        other => println!("  {} = {}", name, other),
                    }
                }
            }
        }
        None => println!("  {}", translate("calculator.noResult", locale)),
    }
    Ok(())
}

fn analyze_bom(
    file: PathBuf,
    export: Option<PathBuf>,
    delay: Duration,
    catalog: Option<PathBuf>,
    global: &GlobalOpts,
) -> PortalResult<()> {
    let catalog = match catalog {
        Some(path) => StaticCatalog::load(&path)?,
        None => StaticCatalog::builtin(),
    };
    let mut session = AnalysisSession::with_config(catalog, SessionConfig { analysis_delay: delay });
    session.select_file(file);

    if let StartOutcome::AlreadyRunning = session.start(Instant::now())? {
        return Err(PortalError::calculation_failed("bom-analysis", "analysis already running"));
    }
    while session.poll(Instant::now()).is_none() {
        thread::sleep(POLL_INTERVAL);
    }
    let report = session
        .report()
        .ok_or_else(|| PortalError::missing_field("analysis"))?;

    if let Some(path) = &export {
        session.export(path)?;
    }

    if global.json {
        return print_json(report);
    }
    let locale = preferences_or_default(global).language;
    print_report(report, locale);
    if let Some(path) = &export {
        println!();
        println!(
            "{}",
            translate("bom.exported", locale).replace("{path}", &path.display().to_string())
        );
    }
    Ok(())
}

fn print_report(report: &AnalysisReport, locale: Locale) {
    let summary = &report.summary;
    println!("{}", translate("bom.results.title", locale));
    println!(
        "{}",
        translate("bom.complete", locale)
            .replace("{total}", &summary.total.to_string())
            .replace("{attention}", &summary.attention_count().to_string())
    );
    println!();
    println!("  {:<10} {}", translate("bom.stats.total", locale), summary.total);
    println!("  {:<10} {}", translate("bom.stats.active", locale), summary.active);
    println!("  {:<10} {}", translate("bom.stats.eol", locale), summary.end_of_life);
    println!("  {:<10} {}", translate("bom.stats.nrnd", locale), summary.not_recommended);
    println!("  {:<10} {}", translate("bom.stats.unknown", locale), summary.unknown);
    println!();

    for component in &report.components {
        let record = &component.record;
        println!(
            "{:<16} {:<20} {:>6} x {:>8.2} = {:>9.2}  {}",
            record.manufacturer_part_number,
            record.manufacturer,
            record.quantity,
            record.unit_price,
            record.total_cost(),
            record.lifecycle_status
        );
        for alternative in &component.alternatives {
            println!(
                "    -> {:<16} {:<20} {:>8.2}  {} ({})",
                alternative.manufacturer_part_number,
                alternative.manufacturer,
                alternative.unit_price,
                alternative.availability,
                alternative.footprint
            );
        }
    }
}

#[derive(Serialize)]
struct Translation<'a> {
    key: &'a str,
    locale: Locale,
    text: &'a str,
}

fn translate_key(key: &str, locale: Option<&str>, global: &GlobalOpts) -> PortalResult<()> {
    let locale = match locale {
        Some(code) => parse_locale(code)?,
        None => preferences_or_default(global).language,
    };
    let text = translate(key, locale);
    if global.json {
        return print_json(&Translation { key, locale, text });
    }
    println!("{}", text);
    Ok(())
}

fn print_shell(shell: &ShellState, global: &GlobalOpts) -> PortalResult<()> {
    if global.json {
        return print_json(&serde_json::json!({
            "locale": shell.locale,
            "direction": shell.direction(),
        }));
    }
    println!(
        "{}: {} ({})",
        translate("settings.language", shell.locale),
        shell.locale,
        shell.direction().as_str()
    );
    Ok(())
}

fn show_locale(global: &GlobalOpts) -> PortalResult<()> {
    let preferences = store(global)?.load()?;
    print_shell(&ShellState::from_preferences(&preferences), global)
}

fn set_locale(code: &str, global: &GlobalOpts) -> PortalResult<()> {
    let locale = parse_locale(code)?;
    let store = store(global)?;
    let mut shell = ShellState::from_preferences(&store.load()?);
    if shell.set_locale(locale) || !store.path().exists() {
        store.set_locale(locale)?;
    }
    print_shell(&shell, global)
}
