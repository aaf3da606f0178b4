//! Flags shared by every subcommand.
//!
//! Flattened into [`super::Cli`], so `-v`, `-q` and friends work in any
//! position on the command line.

use clap::Args;
use std::path::PathBuf;

/// Global arguments for all commands.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Increase logging verbosity.
    ///
    /// Once (`-v`) also turns on the detailed sections of each command
    /// (statistics, error chains). Conflicts with `--quiet`.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase verbosity:
    (none)  - Only warnings and errors
    -v      - Detailed command output, info logs
    -vv     - Debug logs (HTTP status, payload sizes)
    -vvv    - Trace logs, plus reqwest connection logs"
    )]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes.
    ///
    /// Automatically honoured when `NO_COLOR` is set in the environment
    /// (see <https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Configuration file path (default: ~/.loro-cli-config.json).
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// Machine-readable output format.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output format"
    )]
    pub output_format: OutputFormat,
}

impl GlobalArgs {
    /// `true` once `-v` is given.
    pub fn is_verbose(&self) -> bool {
        self.verbose > 0
    }
}

/// How the CLI should render its output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Human-readable with colors.
    Human,
    /// Plain text without colors.
    Plain,
    /// JSON output where a command supports it.
    Json,
}
