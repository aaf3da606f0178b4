//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use loro_core::domain::DataFormat;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "loro",
    bin_name = "loro",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Loro CLI - Transform templates with the Loro Template Service",
    long_about = "Loro renders Scriban templates with JSON, XML or text data \
                  through the Loro Template Service, and checks templates \
                  locally before you send them.",
    after_help = "EXAMPLES:\n\
        \x20 loro transform invoice.sbn --data order.json\n\
        \x20 loro remote 72d561bf-3c17-4b34-b48d-cee00f1f0e1e -d data.json -o out.json\n\
        \x20 loro validate invoice.sbn -v\n\
        \x20 loro config --api-key YOUR_API_KEY",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Transform a template with provided data.
    #[command(
        about = "Transform a template with provided data",
        after_help = "EXAMPLES:\n\
            \x20 loro transform letter.sbn -d person.json\n\
            \x20 loro transform -t invoice-v2 -d order.xml -f xml -o invoice.xml\n\
            \x20 loro transform -g 72d561bf-3c17-4b34-b48d-cee00f1f0e1e -d data.json -v"
    )]
    Transform(TransformArgs),

    /// Transform using a remote template by GUID.
    #[command(
        about = "Transform using a remote template by GUID",
        after_help = "EXAMPLES:\n\
            \x20 loro remote 72d561bf-3c17-4b34-b48d-cee00f1f0e1e -d data.json\n\
            \x20 loro remote 72d561bf-3c17-4b34-b48d-cee00f1f0e1e --show-template"
    )]
    Remote(RemoteArgs),

    /// Configure Loro CLI settings.
    #[command(
        about = "Configure Loro CLI settings",
        after_help = "EXAMPLES:\n\
            \x20 loro config --api-key YOUR_API_KEY\n\
            \x20 loro config --list\n\
            \x20 loro config --reset"
    )]
    Config(ConfigArgs),

    /// List available templates from the service.
    #[command(
        visible_alias = "ls",
        about = "List available templates from Loro service",
        after_help = "EXAMPLES:\n\
            \x20 loro list\n\
            \x20 loro list --limit 25 --search invoice\n\
            \x20 loro list --json"
    )]
    List(ListArgs),

    /// Validate template syntax.
    #[command(
        about = "Validate a Scriban template syntax",
        after_help = "EXAMPLES:\n\
            \x20 loro validate invoice.sbn\n\
            \x20 loro validate invoice.sbn --data order.json -v\n\
            \x20 loro validate invoice.sbn --remote"
    )]
    Validate(ValidateArgs),

    /// Show usage statistics and account information.
    #[command(about = "Show usage statistics and account information")]
    Stats(StatsArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 loro completions bash > ~/.local/share/bash-completion/completions/loro\n\
            \x20 loro completions zsh  > ~/.zfunc/_loro\n\
            \x20 loro completions fish > ~/.config/fish/completions/loro.fish"
    )]
    Completions(CompletionsArgs),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// Connection flags for commands that call the service.
#[derive(Debug, Clone, Default, Args)]
pub struct ServiceArgs {
    /// API key, overriding `LORO_API_KEY` and the config file.
    #[arg(
        short = 'k',
        long = "api-key",
        value_name = "KEY",
        help = "API key for Loro service (or set LORO_API_KEY env variable)"
    )]
    pub api_key: Option<String>,

    /// Endpoint, overriding `LORO_API_URL` and the config file.
    #[arg(
        long = "api-url",
        value_name = "URL",
        help = "Loro API URL (default: https://api.lorotemplates.com)"
    )]
    pub api_url: Option<String>,
}

/// Data file and formats for a transformation.
#[derive(Debug, Clone, Args)]
pub struct DataArgs {
    /// Data file; an empty object is sent when omitted.
    #[arg(
        short = 'd',
        long = "data",
        value_name = "PATH",
        help = "Path to JSON/XML data file"
    )]
    pub data: Option<PathBuf>,

    /// Where to write the result instead of stdout.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output file path (default: stdout)"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "json",
        help = "Output format"
    )]
    pub format: FormatArg,

    /// Format of the data file; detected from extension and content when
    /// omitted.
    #[arg(
        short = 'i',
        long = "input-format",
        value_enum,
        help = "Input data format (default: detected, sent as json)"
    )]
    pub input_format: Option<FormatArg>,
}

/// Data format as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Xml,
    #[value(alias = "txt")]
    Text,
}

impl From<FormatArg> for DataFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Self::Json,
            FormatArg::Xml => Self::Xml,
            FormatArg::Text => Self::Text,
        }
    }
}

// ── transform ─────────────────────────────────────────────────────────────────

/// Arguments for `loro transform`.
#[derive(Debug, Args)]
pub struct TransformArgs {
    /// Local template file. Ignored when `--template-id` or `--guid` is set.
    #[arg(value_name = "TEMPLATE", help = "Local template file")]
    pub template: Option<PathBuf>,

    #[command(flatten)]
    pub data: DataArgs,

    #[arg(
        short = 't',
        long = "template-id",
        value_name = "ID",
        conflicts_with = "guid",
        help = "Use a template ID from Loro service instead of local file"
    )]
    pub template_id: Option<String>,

    #[arg(
        short = 'g',
        long = "guid",
        value_name = "GUID",
        help = "Use a template GUID from Loro service"
    )]
    pub guid: Option<String>,

    #[command(flatten)]
    pub service: ServiceArgs,
}

// ── remote ────────────────────────────────────────────────────────────────────

/// Arguments for `loro remote`.
#[derive(Debug, Args)]
pub struct RemoteArgs {
    #[arg(value_name = "GUID", help = "Template GUID")]
    pub guid: String,

    #[command(flatten)]
    pub data: DataArgs,

    #[arg(
        long = "show-template",
        help = "Display the template content before transformation"
    )]
    pub show_template: bool,

    #[command(flatten)]
    pub service: ServiceArgs,
}

// ── config ────────────────────────────────────────────────────────────────────

/// Arguments for `loro config`. Without any flag the settings are prompted
/// for interactively.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[arg(short = 'k', long = "api-key", value_name = "KEY", help = "Set API key")]
    pub api_key: Option<String>,

    #[arg(short = 'u', long = "api-url", value_name = "URL", help = "Set API URL")]
    pub api_url: Option<String>,

    #[arg(
        short = 'l',
        long = "list",
        conflicts_with_all = ["reset", "api_key", "api_url"],
        help = "List current configuration"
    )]
    pub list: bool,

    #[arg(
        short = 'r',
        long = "reset",
        conflicts_with_all = ["api_key", "api_url"],
        help = "Reset configuration to defaults"
    )]
    pub reset: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `loro list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(
        short = 'l',
        long = "limit",
        value_name = "NUMBER",
        default_value_t = 10,
        help = "Number of templates to show"
    )]
    pub limit: usize,

    #[arg(
        long = "offset",
        value_name = "NUMBER",
        default_value_t = 0,
        help = "Number of templates to skip"
    )]
    pub offset: usize,

    #[arg(
        short = 's',
        long = "search",
        value_name = "QUERY",
        help = "Search templates by name or description"
    )]
    pub search: Option<String>,

    #[arg(long = "json", help = "Output in JSON format")]
    pub json: bool,
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `loro validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(value_name = "TEMPLATE", help = "Template file to check")]
    pub template: PathBuf,

    #[arg(
        short = 'd',
        long = "data",
        value_name = "PATH",
        help = "Optional: Test with sample data"
    )]
    pub data: Option<PathBuf>,

    /// Also ask the service to validate the template.
    #[arg(long = "remote", help = "Validate with the Loro service as well")]
    pub remote: bool,
}

// ── stats ─────────────────────────────────────────────────────────────────────

/// Arguments for `loro stats`.
#[derive(Debug, Args)]
pub struct StatsArgs {
    #[arg(long = "json", help = "Output in JSON format")]
    pub json: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `loro completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
