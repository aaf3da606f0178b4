//! Output management and formatting.
//!
//! Results go to stdout; progress (spinners and their outcome lines) goes
//! to stderr so piping `loro transform … > out.json` stays clean.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use crate::cli::global::{GlobalArgs, OutputFormat};

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags.
    pub fn new(args: &GlobalArgs) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Command result (rendered output, JSON listings). Never suppressed.
    pub fn data(&self, content: &str) -> io::Result<()> {
        self.term.write_line(content)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Dimmed separator or secondary text.
    pub fn muted(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.dimmed().to_string()
        };
        self.term.write_line(&line)
    }

    /// Paint `text` with `style` unless colours are off.
    pub fn paint(&self, text: &str, style: Paint) -> String {
        if self.no_color {
            return text.to_owned();
        }
        match style {
            Paint::Bold => text.bold().to_string(),
            Paint::Green => text.green().to_string(),
            Paint::Yellow => text.yellow().to_string(),
            Paint::Red => text.red().to_string(),
            Paint::Blue => text.blue().to_string(),
            Paint::Cyan => text.cyan().to_string(),
            Paint::Dimmed => text.dimmed().to_string(),
        }
    }

    /// Start a spinner on stderr. Hidden when quiet or stderr is no terminal;
    /// the outcome line is still printed.
    pub fn spinner(&self, msg: &str) -> Spinner {
        let bar = if self.quiet || !io::stderr().is_terminal() {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new_spinner();
            let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner());
            bar.set_style(style);
            bar.enable_steady_tick(Duration::from_millis(80));
            bar
        };
        bar.set_message(msg.to_owned());

        Spinner {
            bar,
            quiet: self.quiet,
            no_color: self.no_color,
            term: Term::stderr(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

/// Colours used by command reports.
#[derive(Debug, Clone, Copy)]
pub enum Paint {
    Bold,
    Green,
    Yellow,
    Red,
    Blue,
    Cyan,
    Dimmed,
}

/// A running progress spinner.
pub struct Spinner {
    bar: ProgressBar,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl Spinner {
    /// Change the spinner text.
    pub fn set_message(&self, msg: &str) {
        self.bar.set_message(msg.to_owned());
    }

    /// Stop with `✓ <msg>`.
    pub fn succeed(&self, msg: &str) {
        self.finish("\u{2713}", msg, Paint::Green, false);
    }

    /// Stop with `⚠ <msg>`.
    pub fn warn(&self, msg: &str) {
        self.finish("\u{26a0}", msg, Paint::Yellow, false);
    }

    /// Stop with `✗ <msg>`, also in quiet mode.
    pub fn fail(&self, msg: &str) {
        self.finish("\u{2717}", msg, Paint::Red, true);
    }

    fn finish(&self, symbol: &str, msg: &str, paint: Paint, always: bool) {
        self.bar.finish_and_clear();
        if self.quiet && !always {
            return;
        }
        let line = if self.no_color {
            format!("{symbol} {msg}")
        } else {
            match paint {
                Paint::Green => format!("{} {}", symbol.green().bold(), msg),
                Paint::Yellow => format!("{} {}", symbol.yellow().bold(), msg),
                _ => format!("{} {}", symbol.red().bold(), msg),
            }
        };
        // Progress lines are best effort; a closed stderr must not fail the command.
        let _ = self.term.write_line(&line);
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(quiet: bool, no_color: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format: format,
        };
        OutputManager::new(&args)
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.print("hello").is_ok());
    }

    #[test]
    fn quiet_suppresses_info() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.info("configuring").is_ok());
    }

    #[test]
    fn colour_follows_flag_and_format() {
        let coloured = make_manager(false, false, OutputFormat::Human);
        assert!(coloured.paint("ok", Paint::Green).contains("\u{1b}["));
        let flagged = make_manager(false, true, OutputFormat::Human);
        assert_eq!(flagged.paint("ok", Paint::Green), "ok");
        let plain = make_manager(false, false, OutputFormat::Plain);
        assert_eq!(plain.paint("ok", Paint::Bold), "ok");
    }

    #[test]
    fn paint_is_identity_without_colour() {
        let out = make_manager(false, true, OutputFormat::Human);
        assert_eq!(out.paint("42", Paint::Green), "42");
    }

    #[test]
    fn format_accessor_returns_resolved() {
        let out = make_manager(false, false, OutputFormat::Json);
        assert_eq!(out.format(), OutputFormat::Json);
    }

    #[test]
    fn quiet_spinner_is_hidden() {
        let out = make_manager(true, true, OutputFormat::Plain);
        let spinner = out.spinner("Working");
        spinner.set_message("Still working");
        spinner.succeed("Done");
        assert!(spinner.bar.is_hidden());
    }
}
