//! Top-level CLI definition and dispatch.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell as CompletionShell, generate};
use colored::control;
use serde_json::{Value, json};
use thiserror::Error;

use kube_fault_drill::catalog::CATALOG;
use kube_fault_drill::core::config::Config;
use kube_fault_drill::core::errors::DrillError;
use kube_fault_drill::core::paths;
use kube_fault_drill::logger::jsonl::{ActivityLog, EventType, LogEntry, Severity};
use kube_fault_drill::manifest::baseline_set;
use kube_fault_drill::scenario::diagnose::diagnose;
use kube_fault_drill::scenario::inject::generate as generate_drill;
use kube_fault_drill::scenario::render::{
    BRIEF_FILE, load_document_set, manifest_names, write_brief, write_document_set,
};
use kube_fault_drill::scenario::report::{render_answers, render_brief};
use kube_fault_drill::scenario::select::Difficulty;

/// kube_fault_drill — seeded Kubernetes troubleshooting drills.
#[derive(Debug, Parser)]
#[command(
    name = "kfd",
    author,
    version,
    about = "kube fault drill - reproducible Kubernetes troubleshooting drills",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Force JSON output mode.
    #[arg(long, global = true)]
    json: bool,
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Increase verbosity.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Quiet mode (errors only).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Render a seeded drill: faulty manifests plus a spoiler-free brief.
    Generate(GenerateArgs),
    /// Diagnose a rendered drill and print the faults with their fixes.
    Reveal(RevealArgs),
    /// List every cataloged fault with its one-line summary.
    Catalog,
    /// View configuration state.
    Config(ConfigArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Args)]
struct GenerateArgs {
    /// Seed for deterministic fault selection.
    #[arg(long, value_name = "SEED")]
    seed: u64,
    /// Difficulty tier: easy, medium, or hard. Falls back to the configured default.
    #[arg(long, value_name = "TIER")]
    difficulty: Option<String>,
    /// Directory to render into (overrides the configured rendered dir).
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Args, Default)]
struct RevealArgs {
    /// Directory holding the rendered drill (overrides the configured rendered dir).
    #[arg(long, value_name = "DIR")]
    rendered: Option<PathBuf>,
    /// Seed to echo in the report header.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Difficulty to echo in the report header.
    #[arg(long, value_name = "TIER")]
    difficulty: Option<String>,
}

#[derive(Debug, Clone, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    command: Option<ConfigCommand>,
}

#[derive(Debug, Clone, Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration.
    Show,
    /// Print the config file path.
    Path,
}

#[derive(Debug, Clone, Args)]
struct CompletionsArgs {
    /// Shell to generate completion script for.
    #[arg(value_enum)]
    shell: CompletionShell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

/// CLI error type with explicit exit-code mapping.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input at runtime.
    #[error("{0}")]
    User(String),
    /// Environment/runtime failure.
    #[error("{0}")]
    Runtime(String),
    /// Internal bug or invariant violation.
    #[error("{0}")]
    Internal(String),
    /// JSON serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    /// Output write failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code contract for the CLI.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::User(_) => 1,
            Self::Runtime(_) | Self::Io(_) => 2,
            Self::Internal(_) | Self::Json(_) => 3,
        }
    }
}

/// Dispatch CLI commands.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    if cli.no_color {
        control::set_override(false);
    }

    match &cli.command {
        Command::Generate(args) => run_generate(cli, args),
        Command::Reveal(args) => run_reveal(cli, args),
        Command::Catalog => run_catalog(cli),
        Command::Config(args) => run_config(cli, args),
        Command::Completions(args) => {
            let mut command = Cli::command();
            let binary_name = command.get_name().to_string();
            generate(args.shell, &mut command, binary_name, &mut io::stdout());
            Ok(())
        }
    }
}

fn run_generate(cli: &Cli, args: &GenerateArgs) -> Result<(), CliError> {
    let config = load_config(cli)?;
    let log = ActivityLog::new(config.paths.jsonl_log.clone());

    let raw_tier = args
        .difficulty
        .as_deref()
        .unwrap_or(config.scenario.default_difficulty.as_str());
    let difficulty = Difficulty::parse(raw_tier).ok_or_else(|| {
        CliError::User(format!(
            "unknown difficulty {raw_tier:?} (expected easy, medium, or hard)"
        ))
    })?;

    let dir = paths::rendered_dir(&config, args.out.as_deref());
    let drill = generate_drill(&config.scenario, args.seed, difficulty)
        .map_err(|e| logged_failure(&log, e))?;
    paths::ensure_rendered_dir(&dir).map_err(|e| logged_failure(&log, e))?;
    write_document_set(&dir, &drill.documents).map_err(|e| logged_failure(&log, e))?;

    let names = manifest_names(&drill.documents);
    let brief = render_brief(&drill.selection, &names);
    write_brief(&dir, &brief).map_err(|e| logged_failure(&log, e))?;

    let mut entry = LogEntry::new(EventType::ScenarioGenerated, Severity::Info);
    entry.seed = Some(args.seed);
    entry.difficulty = Some(difficulty.as_str().to_string());
    entry.fault_count = Some(drill.selection.chosen.len());
    entry.rendered_dir = Some(dir.display().to_string());
    log.record(&entry);

    // The chosen fault identifiers stay out of generate output on purpose;
    // the trainee who ran this command is the one meant to find them.
    match output_mode(cli) {
        OutputMode::Human => {
            if !cli.quiet {
                println!(
                    "Generated drill: seed {}, difficulty {}, {} fault(s) injected.",
                    args.seed,
                    difficulty,
                    drill.selection.chosen.len()
                );
                println!("  Manifests: {}", dir.display());
                println!("  Start with: {}", dir.join(BRIEF_FILE).display());
                if cli.verbose {
                    println!("  Activity log: {}", log.path().display());
                }
            }
        }
        OutputMode::Json => {
            let payload = json!({
                "seed": args.seed,
                "difficulty": difficulty.as_str(),
                "fault_count": drill.selection.chosen.len(),
                "rendered_dir": dir.display().to_string(),
                "manifests": names,
            });
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

fn run_reveal(cli: &Cli, args: &RevealArgs) -> Result<(), CliError> {
    let config = load_config(cli)?;
    let log = ActivityLog::new(config.paths.jsonl_log.clone());

    let dir = paths::rendered_dir(&config, args.rendered.as_deref());
    let observed = load_document_set(&dir).map_err(|e| logged_failure(&log, e))?;
    let clean = baseline_set(&config.scenario);
    let report = diagnose(&observed, &clean);

    let mut entry = LogEntry::new(EventType::DiagnosisRun, Severity::Info);
    entry.seed = args.seed;
    entry.difficulty = args.difficulty.clone();
    entry.fault_count = Some(report.findings.len());
    entry.rendered_dir = Some(dir.display().to_string());
    log.record(&entry);

    match output_mode(cli) {
        OutputMode::Human => {
            let seed = args
                .seed
                .map_or_else(|| "?".to_string(), |s| s.to_string());
            let tier = args.difficulty.as_deref().unwrap_or("?");
            print!("{}", render_answers(&seed, tier, &report));
        }
        OutputMode::Json => {
            let payload = serde_json::to_value(&report)?;
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

fn run_catalog(cli: &Cli) -> Result<(), CliError> {
    match output_mode(cli) {
        OutputMode::Human => {
            println!("Cataloged faults ({}):", CATALOG.len());
            for spec in &CATALOG {
                println!("  {:<24} {}", spec.id.as_str(), spec.summary);
            }
        }
        OutputMode::Json => {
            let entries: Vec<Value> = CATALOG
                .iter()
                .map(|spec| json!({ "id": spec.id.as_str(), "summary": spec.summary }))
                .collect();
            write_json_line(&Value::Array(entries))?;
        }
    }
    Ok(())
}

fn run_config(cli: &Cli, args: &ConfigArgs) -> Result<(), CliError> {
    let config = load_config(cli)?;
    match args.command.as_ref().unwrap_or(&ConfigCommand::Show) {
        ConfigCommand::Path => {
            println!("{}", config.paths.config_file.display());
            Ok(())
        }
        ConfigCommand::Show => match output_mode(cli) {
            OutputMode::Human => {
                let rendered = toml::to_string_pretty(&config)
                    .map_err(|e| CliError::Internal(format!("config render failed: {e}")))?;
                print!("{rendered}");
                Ok(())
            }
            OutputMode::Json => {
                let payload = serde_json::to_value(&config)?;
                write_json_line(&payload)
            }
        },
    }
}

fn load_config(cli: &Cli) -> Result<Config, CliError> {
    Config::load(cli.config.as_deref()).map_err(|e| CliError::User(e.to_string()))
}

/// Record the failure in the activity log, then map it onto the CLI exit
/// contract: boundary errors are user errors, catalog drift is internal.
fn logged_failure(log: &ActivityLog, err: DrillError) -> CliError {
    let mut entry = LogEntry::new(EventType::Error, Severity::Critical);
    entry.error_code = Some(err.code().to_string());
    entry.error_message = Some(err.to_string());
    log.record(&entry);

    if err.is_boundary() {
        CliError::User(err.to_string())
    } else if matches!(err, DrillError::CatalogDrift { .. }) {
        CliError::Internal(err.to_string())
    } else {
        CliError::Runtime(err.to_string())
    }
}

fn write_json_line(payload: &Value) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, payload)?;
    writeln!(stdout)?;
    Ok(())
}

fn output_mode(cli: &Cli) -> OutputMode {
    let env_mode = std::env::var("KFD_OUTPUT_FORMAT").ok();
    resolve_output_mode(cli.json, env_mode.as_deref(), io::stdout().is_terminal())
}

fn resolve_output_mode(json_flag: bool, env_mode: Option<&str>, stdout_is_tty: bool) -> OutputMode {
    if json_flag {
        return OutputMode::Json;
    }

    let fallback = if stdout_is_tty {
        OutputMode::Human
    } else {
        OutputMode::Json
    };

    match env_mode
        .map(str::trim)
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("json") => OutputMode::Json,
        Some("human") => OutputMode::Human,
        Some("auto") | None => fallback,
        Some(_) => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_mode_resolution_honors_precedence() {
        assert_eq!(
            resolve_output_mode(true, Some("human"), true),
            OutputMode::Json
        );
        assert_eq!(
            resolve_output_mode(false, Some("json"), true),
            OutputMode::Json
        );
        assert_eq!(
            resolve_output_mode(false, Some("human"), false),
            OutputMode::Human
        );
        assert_eq!(resolve_output_mode(false, None, true), OutputMode::Human);
        assert_eq!(resolve_output_mode(false, None, false), OutputMode::Json);
        assert_eq!(
            resolve_output_mode(false, Some("garbage"), true),
            OutputMode::Human
        );
    }

    #[test]
    fn exit_codes_match_the_contract() {
        assert_eq!(CliError::User(String::new()).exit_code(), 1);
        assert_eq!(CliError::Runtime(String::new()).exit_code(), 2);
        assert_eq!(CliError::Internal(String::new()).exit_code(), 3);
    }

    #[test]
    fn cli_parser_self_check() {
        Cli::command().debug_assert();
    }

    #[test]
    fn drift_maps_to_internal_and_boundary_to_user() {
        let dir = tempfile::tempdir().unwrap();
        let log = ActivityLog::new(dir.path().join("a.jsonl"));
        let internal = logged_failure(
            &log,
            DrillError::CatalogDrift {
                fault: "svc_selector_mismatch",
                document: "service",
                pointer: "/spec/selector/app",
            },
        );
        assert_eq!(internal.exit_code(), 3);

        let user = logged_failure(
            &log,
            DrillError::SelectionConstraint {
                requested: 8,
                available: 7,
            },
        );
        assert_eq!(user.exit_code(), 1);
        assert!(log.path().exists(), "failures must hit the activity log");
    }
}
