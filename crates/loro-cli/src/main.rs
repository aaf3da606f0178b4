//! # Loro CLI
//!
//! Transform templates with the Loro Template Service.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (defaults + file + env).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                        |
//! |------|--------------------------------|
//! |  0   | Success                        |
//! |  1   | Internal / system error        |
//! |  2   | User / input / validation error|
//! |  3   | Resource not found             |
//! |  4   | Configuration error            |
//! |  5   | Service or network error       |

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Load .env before anything else, including tracing init.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    // clap also renders help (exit 0) through this path; anything else is an
    // argument error (exit 2).
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 2 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let verbose = cli.global.is_verbose();

    // ── 3. Load configuration ─────────────────────────────────────────────
    let config_path = cli
        .global
        .config
        .clone()
        .unwrap_or_else(AppConfig::default_path);
    let config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => return handle_error(CliError::config(e), verbose),
    };

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global);

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    match run(cli, config, config_path, output) {
        Ok(()) => {
            info!("Loro completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, config_path: PathBuf, output: OutputManager) -> CliResult<()> {
    let global: GlobalArgs = cli.global;
    match cli.command {
        Commands::Transform(cmd) => commands::transform::execute(cmd, &global, &config, &output),
        Commands::Remote(cmd) => commands::remote::execute(cmd, &global, &config, &output),
        Commands::Config(cmd) => commands::config::execute(cmd, &config, &config_path, &output),
        Commands::List(cmd) => commands::list::execute(cmd, &config, &output),
        Commands::Validate(cmd) => commands::validate::execute(cmd, &global, &config, &output),
        Commands::Stats(cmd) => commands::stats::execute(cmd, &global, &config, &output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
    }
}

/// Translate a `CliError` into a user message and an appropriate exit code.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    // Written to stderr so the message appears even when stdout is redirected.
    let msg = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
