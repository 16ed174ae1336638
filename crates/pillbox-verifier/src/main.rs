// crates/pillbox-verifier/src/main.rs
// ============================================================================
// Module: Pillbox Verifier CLI Entry Point
// Description: Command-line driver for the backend contract probes.
// Purpose: Resolve configuration, run every probe, and map the verdict to an exit code.
// Dependencies: clap, pillbox-config, pillbox-verifier, thiserror
// ============================================================================

//! ## Overview
//! `pillbox-verifier` runs the five backend probes once and exits `0` when
//! all of them pass, `1` otherwise. Fatal setup errors (invalid overrides, an
//! unreadable env file, client construction failure) are written to stderr
//! and also exit `1`. All user-facing strings are routed through the i18n
//! catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::ArgAction;
use clap::Parser;
use clap::ValueEnum;
use pillbox_config::ConfigOverrides;
use pillbox_config::VerifierConfig;
use pillbox_config::read_env_strict;
use pillbox_config::overrides::parse_timeout_seconds;
use pillbox_verifier::ProbeClient;
use pillbox_verifier::ProbeContext;
use pillbox_verifier::RunReport;
use pillbox_verifier::default_probes;
use pillbox_verifier::i18n::Locale;
use pillbox_verifier::i18n::set_locale;
use pillbox_verifier::run_probes;
use pillbox_verifier::t;
use pillbox_verifier::write_banner;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable selecting the output language.
const LANG_ENV: &str = "PILLBOX_VERIFIER_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "pillbox-verifier",
    about = "Verify the Virtual Pillbox backend HTTP contract.",
    disable_version_flag = true
)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue)]
    show_version: bool,
    /// Preferred output language (overrides `PILLBOX_VERIFIER_LANG`).
    #[arg(long, value_enum, value_name = "LANG")]
    lang: Option<LangArg>,
    /// Env file holding `EXPO_PUBLIC_BACKEND_URL` (default `/app/frontend/.env`).
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,
    /// Backend base URL; skips the env file lookup.
    #[arg(long, value_name = "URL", value_parser = parse_backend_url)]
    backend_url: Option<String>,
    /// Minimum per-request timeout in seconds.
    #[arg(long, value_name = "SECONDS", value_parser = parse_timeout_floor)]
    timeout_floor_secs: Option<Duration>,
    /// Output format for the run.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl Cli {
    /// Returns the flag layer of the configuration.
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            backend_url: self.backend_url.clone(),
            env_file: self.env_file.clone(),
            timeout_floor: self.timeout_floor_secs,
        }
    }
}

/// Output languages accepted by `--lang`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

/// Run output formats.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Progress lines plus a human-readable summary.
    Text,
    /// A single JSON report; progress lines are suppressed.
    Json,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Parses arguments, resolves configuration, and runs the probes.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = read_env_strict(LANG_ENV).map_err(|err| {
        CliError::new(t!("i18n.lang.read_failed", env = LANG_ENV, error = err))
    })?;
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = VerifierConfig::load(&cli.overrides())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let client = ProbeClient::new()
        .map_err(|err| CliError::new(t!("client.init_failed", error = err)))?;
    let mut stdout = std::io::stdout().lock();
    let report = verify(&config, &client, cli.format, &mut stdout)?;
    Ok(exit_code(&report))
}

/// Runs every probe and writes output in the selected format.
fn verify(
    config: &VerifierConfig,
    client: &ProbeClient,
    format: OutputFormat,
    out: &mut dyn Write,
) -> CliResult<RunReport> {
    let ctx = ProbeContext {
        config,
        client,
    };
    let probes = default_probes();
    match format {
        OutputFormat::Text => {
            write_banner(config, out).map_err(|err| CliError::new(output_error("stdout", &err)))?;
            let report = run_probes(&probes, &ctx, out);
            report.write_summary(out).map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(report)
        }
        OutputFormat::Json => {
            let report = run_probes(&probes, &ctx, &mut std::io::sink());
            let rendered = report
                .to_json()
                .map_err(|err| CliError::new(t!("report.render_failed", error = err)))?;
            writeln!(out, "{rendered}")
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(report)
        }
    }
}

/// Maps the overall verdict to the process exit code.
fn exit_code(report: &RunReport) -> ExitCode {
    if report.all_passed() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

// ============================================================================
// SECTION: Argument Parsing
// ============================================================================

/// Resolves the output locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

/// Parses the `--backend-url` flag.
fn parse_backend_url(raw: &str) -> Result<String, String> {
    ConfigOverrides::validate_backend_url("--backend-url", raw).map_err(|err| err.to_string())
}

/// Parses the `--timeout-floor-secs` flag.
fn parse_timeout_floor(raw: &str) -> Result<Duration, String> {
    parse_timeout_seconds("--timeout-floor-secs", raw).map_err(|err| err.to_string())
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
