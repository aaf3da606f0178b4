//! Heuristic template syntax checks.
//!
//! Nothing here parses a template. Every check is a regular-expression or
//! substring scan over the raw text, mirroring what the Loro service users
//! expect from `loro validate`:
//!
//! 1. a text-wide balance check between lines ending in an unterminated
//!    `{{` and lines that start with `}}`;
//! 2. per line, `{{if` / `{{for` openers in a template that contains no
//!    `{{end}}` at all;
//! 3. per line, `{{ ... }}` expressions that contain a quadruple brace.
//!
//! The `{{end}}` test is global: a single `{{end}}` anywhere silences every
//! unclosed-block diagnostic. Callers and fixtures depend on that, so the
//! checks must not be tightened into real bracket matching.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static UNTERMINATED_OPENER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)\{\{[^}]*$").expect("valid opener pattern"));

static LEADING_CLOSER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^\s*\}\}").expect("valid closer pattern"));

static LINE_EXPRESSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([^}]+)\s*\}\}").expect("valid expression pattern"));

static VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*[^{}]+\s*\}\}").expect("valid variable pattern"));

static LOOP_OPENER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*for\s+").expect("valid loop pattern"));

static CONDITION_OPENER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*if\s+").expect("valid condition pattern"));

const BLOCK_END: &str = "{{end}}";
const IF_OPENER: &str = "{{if";
const FOR_OPENER: &str = "{{for";

/// Words that exclude a `{{ ... }}` match from the variable count.
const NON_VARIABLE_WORDS: [&str; 3] = ["if", "for", "end"];

// ── Diagnostics ──────────────────────────────────────────────────────────────

/// What a [`Diagnostic`] is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    UnclosedBlocks,
    UnclosedIf,
    UnclosedFor,
    InvalidVariable,
}

impl DiagnosticKind {
    pub const fn message(&self) -> &'static str {
        match self {
            Self::UnclosedBlocks => "Unclosed template blocks detected",
            Self::UnclosedIf => "Possible unclosed if statement",
            Self::UnclosedFor => "Possible unclosed for loop",
            Self::InvalidVariable => "Invalid variable syntax",
        }
    }
}

/// A single likely syntax problem.
///
/// Displays as `Line {n}: {message}` when tied to a line, or as the bare
/// message for text-wide findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// 1-based line number, `None` for text-wide findings.
    pub line: Option<usize>,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub const fn global(kind: DiagnosticKind) -> Self {
        Self { line: None, kind }
    }

    pub const fn at_line(line: usize, kind: DiagnosticKind) -> Self {
        Self {
            line: Some(line),
            kind,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "Line {line}: {}", self.kind.message()),
            None => f.write_str(self.kind.message()),
        }
    }
}

// ── Checks ───────────────────────────────────────────────────────────────────

/// Run every heuristic check and return the diagnostics in detection order.
///
/// The balance finding (if any) comes first, followed by per-line findings
/// in line order; each line reports `if`, then `for`, then variable issues.
pub fn check(template: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let openers = UNTERMINATED_OPENER.find_iter(template).count();
    let closers = LEADING_CLOSER.find_iter(template).count();
    if openers != closers {
        diagnostics.push(Diagnostic::global(DiagnosticKind::UnclosedBlocks));
    }

    let has_block_end = template.contains(BLOCK_END);

    for (index, line) in template.split('\n').enumerate() {
        let number = index + 1;

        if line.contains(IF_OPENER) && !has_block_end {
            diagnostics.push(Diagnostic::at_line(number, DiagnosticKind::UnclosedIf));
        }

        if line.contains(FOR_OPENER) && !has_block_end {
            diagnostics.push(Diagnostic::at_line(number, DiagnosticKind::UnclosedFor));
        }

        for expression in LINE_EXPRESSION.find_iter(line) {
            let text = expression.as_str();
            if text.contains("{{{{") || text.contains("}}}}") {
                diagnostics.push(Diagnostic::at_line(
                    number,
                    DiagnosticKind::InvalidVariable,
                ));
            }
        }
    }

    diagnostics
}

/// Count `{{ ... }}` expressions that are not `if`/`for`/`end` constructs.
///
/// The exclusion is a plain substring test, so `{{ information }}` and
/// `{{ format }}` are not counted either.
pub fn count_variables(template: &str) -> usize {
    VARIABLE
        .find_iter(template)
        .filter(|m| {
            !NON_VARIABLE_WORDS
                .iter()
                .any(|word| m.as_str().contains(word))
        })
        .count()
}

/// Count `{{for` openers followed by whitespace.
pub fn count_loops(template: &str) -> usize {
    LOOP_OPENER.find_iter(template).count()
}

/// Count `{{if` openers followed by whitespace.
pub fn count_conditions(template: &str) -> usize {
    CONDITION_OPENER.find_iter(template).count()
}

// ── Statistics ───────────────────────────────────────────────────────────────

/// Summary figures shown by `loro validate -v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TemplateStats {
    /// Size in bytes.
    pub size: usize,
    /// Number of `\n`-separated segments (an empty template has one).
    pub lines: usize,
    pub variables: usize,
    pub loops: usize,
    pub conditions: usize,
}

impl TemplateStats {
    pub fn of(template: &str) -> Self {
        Self {
            size: template.len(),
            lines: template.split('\n').count(),
            variables: count_variables(template),
            loops: count_loops(template),
            conditions: count_conditions(template),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn messages(template: &str) -> Vec<String> {
        check(template).iter().map(ToString::to_string).collect()
    }

    #[test]
    fn empty_template_is_clean() {
        assert!(check("").is_empty());
        assert_eq!(count_variables(""), 0);
        assert_eq!(count_loops(""), 0);
        assert_eq!(count_conditions(""), 0);
    }

    #[test]
    fn end_anywhere_silences_unclosed_if() {
        assert!(messages("{{if x}}\n{{end}}").is_empty());
    }

    #[test]
    fn end_anywhere_silences_later_openers_too() {
        let template = "{{for a in b}}\n{{end}}\n{{if c}}\nno end for this one";
        assert!(messages(template).is_empty());
    }

    #[test]
    fn missing_end_reports_if_on_its_line() {
        assert_eq!(
            messages("{{if x}}\nhello"),
            vec!["Line 1: Possible unclosed if statement"]
        );
    }

    #[test]
    fn missing_end_reports_for_loop() {
        assert_eq!(
            messages("intro\n{{for item in items}}\n{{ item }}"),
            vec!["Line 2: Possible unclosed for loop"]
        );
    }

    #[test]
    fn if_is_reported_before_for_on_the_same_line() {
        assert_eq!(
            messages("{{if a}}{{for b in c}}"),
            vec![
                "Line 1: Possible unclosed if statement",
                "Line 1: Possible unclosed for loop",
            ]
        );
    }

    #[test]
    fn quadruple_braces_are_invalid_variables() {
        assert_eq!(
            messages("{{{{ name }}}}"),
            vec!["Line 1: Invalid variable syntax"]
        );
    }

    #[test]
    fn quadruple_opener_is_reported_on_its_line() {
        let diagnostics = check("ok\n{{{{ name }}");
        assert_eq!(
            diagnostics,
            vec![Diagnostic::at_line(2, DiagnosticKind::InvalidVariable)]
        );
    }

    // The expression match stops at the first `}}`, so trailing braces are
    // never part of it.
    #[test]
    fn trailing_quadruple_closer_is_not_flagged() {
        assert!(check("{{ name }}}}").is_empty());
    }

    #[test]
    fn dangling_opener_is_unbalanced() {
        assert_eq!(
            messages("Hello {{ name\n"),
            vec!["Unclosed template blocks detected"]
        );
    }

    #[test]
    fn closer_on_its_own_line_balances_a_dangling_opener() {
        assert!(messages("{{ name\n}}").is_empty());
    }

    #[test]
    fn lone_leading_closer_is_unbalanced() {
        assert_eq!(
            messages("text\n  }} trailing"),
            vec!["Unclosed template blocks detected"]
        );
    }

    #[test]
    fn carriage_return_ends_a_line() {
        assert_eq!(
            check("{{ a\rb}}"),
            vec![Diagnostic::global(DiagnosticKind::UnclosedBlocks)]
        );
        assert!(check("{{ a }}\r\n{{ b }}\r\n").is_empty());
    }

    #[test]
    fn balance_finding_comes_before_line_findings() {
        let diagnostics = check("{{if x}}\n{{ y");
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::global(DiagnosticKind::UnclosedBlocks),
                Diagnostic::at_line(1, DiagnosticKind::UnclosedIf),
            ]
        );
    }

    #[test]
    fn check_is_idempotent() {
        let template = "{{if x}}\n{{{{ y }}}}\n{{ z";
        assert_eq!(check(template), check(template));
    }

    #[test]
    fn variable_count_skips_keyword_matches() {
        assert_eq!(count_variables("{{ name }} {{ if x }}"), 1);
    }

    #[test]
    fn variable_count_skips_names_containing_keywords() {
        assert_eq!(count_variables("{{ information }} {{ format }} {{ id }}"), 1);
    }

    #[test]
    fn loops_require_whitespace_after_keyword() {
        assert_eq!(count_loops("{{for item in items}}"), 1);
        assert_eq!(count_loops("{{forfeit}}"), 0);
        assert_eq!(count_loops("{{ for a in b }}{{for c in d}}"), 2);
    }

    #[test]
    fn conditions_require_whitespace_after_keyword() {
        assert_eq!(count_conditions("{{if ready}}{{ if done }}"), 2);
        assert_eq!(count_conditions("{{iffy}}"), 0);
    }

    #[test]
    fn stats_cover_all_counters() {
        let template = "{{for i in items}}\n{{ i.name }}\n{{if i.ok}}yes{{end}}\n{{end}}";
        let stats = TemplateStats::of(template);
        assert_eq!(stats.lines, 4);
        assert_eq!(stats.size, template.len());
        assert_eq!(stats.loops, 1);
        assert_eq!(stats.conditions, 1);
        assert_eq!(stats.variables, 1);
    }

    #[test]
    fn empty_template_has_one_line() {
        assert_eq!(TemplateStats::of("").lines, 1);
    }
}
