//! Diagnostics for the `loro` binary.
//!
//! Events from the three loro crates go to stderr so that rendered output
//! and `--json` listings on stdout stay clean. `-v` does double duty: it
//! raises the log level and turns on the detail sections of each command
//! (template statistics, raw usage payloads, error chains).
//!
//! | Flag(s)   | loro crates | reqwest |
//! |-----------|-------------|---------|
//! | (none)    | warn        | off     |
//! | `-v`      | info        | off     |
//! | `-vv`     | debug       | off     |
//! | `-vvv`    | trace       | debug   |
//! | `--quiet` | error       | off     |
//!
//! `RUST_LOG`, when set, replaces the table entirely.

use std::io::IsTerminal as _;

use anyhow::Context as _;
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

/// Crates whose events the verbosity flags control.
const LORO_TARGETS: [&str; 3] = ["loro", "loro_core", "loro_adapters"];

/// Install the stderr subscriber. Called once from `main`.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = level_for(args);

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(directives(level))
            .context("Failed to build the log filter")?,
    };

    // Targets only help once there are enough events to tell apart.
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_target(level >= LevelFilter::DEBUG)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("A tracing subscriber is already installed")
}

/// Level for the loro crates. `--quiet` wins over any `-v` count.
fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Filter directives for `level`. At trace, reqwest's own logs join in.
fn directives(level: LevelFilter) -> String {
    let mut parts: Vec<String> = LORO_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect();
    if level == LevelFilter::TRACE {
        parts.push("reqwest=debug".into());
    }
    parts.join(",")
}
