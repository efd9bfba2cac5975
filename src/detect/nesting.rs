//! Nested-control heuristic.
//!
//! A blunt proxy for nesting depth in the absence of indentation/AST
//! analysis. Two independent triggers, both yielding a medium
//! `nested-control-flow` issue:
//!
//! (a) two or more control-structure openers on one physical line;
//! (b) leading indentation of at least [`DEEP_INDENT_COLUMNS`] columns on a
//!     line that opens a control structure and is neither a comment nor an
//!     arrow-function body.
//!
//! Over-reporting is deliberate; consolidation and severity filtering absorb
//! the noise downstream. The two triggers can double-report one logical
//! block from two of its lines; that behavior is preserved as-is.

use lazy_static::lazy_static;
use regex::Regex;

use super::context::FileContext;
use super::rules::ids;
use super::types::{Issue, Severity};

/// Indentation threshold, in leading whitespace columns, for trigger (b).
const DEEP_INDENT_COLUMNS: usize = 16;

const MESSAGE: &str =
    "complex nested control flow (deep nesting usually hides a function waiting to be extracted)";

lazy_static! {
    static ref CONTROL_OPENER: Regex = Regex::new(r"\b(?:if|for|while|switch)\s*\(").unwrap();
}

fn indent_columns(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn is_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("//") || trimmed.starts_with('*') || trimmed.starts_with("/*")
}

/// Analyze a single line for both triggers.
pub fn analyze_line(path: &str, line_number: usize, line: &str) -> Vec<Issue> {
    let mut issues = Vec::new();

    let openers: Vec<_> = CONTROL_OPENER.find_iter(line).collect();

    // (a) multiple control openers crammed onto one physical line.
    if openers.len() >= 2 {
        let first = &openers[0];
        issues.push(Issue {
            rule: ids::NESTED_CONTROL.to_string(),
            file: path.to_string(),
            line: line_number,
            column: line[..first.start()].chars().count() + 1,
            text: line.trim().to_string(),
            message: MESSAGE.to_string(),
            severity: Severity::Medium,
        });
    }

    // (b) a control opener at deep indentation.
    let indent = indent_columns(line);
    if indent >= DEEP_INDENT_COLUMNS
        && !openers.is_empty()
        && !is_comment(line)
        && !line.contains("=>")
    {
        issues.push(Issue {
            rule: ids::NESTED_CONTROL.to_string(),
            file: path.to_string(),
            line: line_number,
            column: indent + 1,
            text: line.trim().to_string(),
            message: MESSAGE.to_string(),
            severity: Severity::Medium,
        });
    }

    issues
}

/// Run the heuristic over a whole file, honoring quiet-mode scope the same
/// way the context filter does for pattern rules.
pub fn analyze_file(path: &str, lines: &[&str], ctx: &FileContext, quiet: bool) -> Vec<Issue> {
    if quiet && ctx.is_test {
        return Vec::new();
    }
    lines
        .iter()
        .enumerate()
        .flat_map(|(idx, line)| analyze_line(path, idx + 1, line))
        .collect()
}
