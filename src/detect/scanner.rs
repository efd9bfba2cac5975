//! Per-line pattern matching and the per-file scan loop.

use super::context::{self, FileContext};
use super::nesting;
use super::rules::{DetectionRule, RuleSet};
use super::types::{Issue, RawMatch, SourceFile};

/// Run one rule against one line, returning every non-overlapping match in
/// left-to-right order. Columns are 1-based and counted in characters, like
/// an editor's.
///
/// `find_iter` carries no state across calls, so one line's exhausted
/// iteration can never leak into the next - the classic trap with reusable
/// global-flag matchers does not exist here, but the contract stays: fresh
/// matcher state per line per rule.
pub(crate) fn scan_line(line: &str, rule: &DetectionRule, line_number: usize) -> Vec<RawMatch> {
    rule.pattern
        .find_iter(line)
        .map(|m| RawMatch {
            line: line_number,
            column: line[..m.start()].chars().count() + 1,
            text: m.as_str().to_string(),
        })
        .collect()
}

/// Scan a single file against the rule set.
///
/// Pure accumulator-returning function: issues are discovered in
/// rule order x line order, then the nesting heuristic appends its own
/// findings. The caller folds per-file results together.
pub fn scan_file(file: &SourceFile, rules: &RuleSet, quiet: bool) -> Vec<Issue> {
    let lines: Vec<&str> = file.content.lines().collect();
    let ctx = FileContext::categorize(&file.path);
    let mut issues = Vec::new();

    for rule in rules.iter() {
        for (idx, line) in lines.iter().enumerate() {
            for raw in scan_line(line, rule, idx + 1) {
                if context::accept(rule, &lines, idx, &ctx, quiet) {
                    issues.push(Issue {
                        rule: rule.id.clone(),
                        file: file.path.clone(),
                        line: raw.line,
                        column: raw.column,
                        text: raw.text,
                        message: rule.composed_message(),
                        severity: rule.severity,
                    });
                }
            }
        }
    }

    issues.extend(nesting::analyze_file(&file.path, &lines, &ctx, quiet));
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::rules::{builtin_rules, ids};

    fn rule(id: &str) -> DetectionRule {
        builtin_rules()
            .into_iter()
            .find(|r| r.id == id)
            .expect("builtin rule")
    }

    #[test]
    fn test_scan_line_columns_are_one_based() {
        let r = rule(ids::PERMISSIVE_TYPE);
        let matches = scan_line("const data: any = {};", &r, 1);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line, 1);
        // The match starts at the colon, character 11.
        assert_eq!(matches[0].column, 11);
        assert_eq!(matches[0].text, ": any");
    }

    #[test]
    fn test_scan_line_multiple_matches_left_to_right() {
        let r = rule(ids::PERMISSIVE_TYPE);
        let matches = scan_line("function f(a: any, b: any) {}", &r, 1);
        assert_eq!(matches.len(), 2);
        assert!(matches[0].column < matches[1].column);
    }

    #[test]
    fn test_scan_line_state_does_not_leak_between_lines() {
        let r = rule(ids::PRODUCTION_LOGGING);
        let first = scan_line("console.log('a'); console.log('b');", &r, 1);
        let second = scan_line("console.log('c');", &r, 2);
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].column, 1);
    }

    #[test]
    fn test_scan_file_orders_by_rule_then_line() {
        let rules = RuleSet::build(None).unwrap();
        let file = SourceFile::new(
            "src/app.ts",
            "const a: any = 1;\nconsole.log(a);\nconst b: any = 2;\n",
        );
        let issues = scan_file(&file, &rules, false);
        let positions: Vec<(String, usize)> =
            issues.iter().map(|i| (i.rule.clone(), i.line)).collect();
        // permissive-type-usage precedes production-logging in the registry,
        // so both of its findings come first, in line order.
        assert_eq!(
            positions,
            vec![
                (ids::PERMISSIVE_TYPE.to_string(), 1),
                (ids::PERMISSIVE_TYPE.to_string(), 3),
                (ids::PRODUCTION_LOGGING.to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_scan_file_composes_message() {
        let rules = RuleSet::build(None).unwrap();
        let file = SourceFile::new("src/app.ts", "const a: any = 1;\n");
        let issues = scan_file(&file, &rules, false);
        assert_eq!(issues.len(), 1);
        let r = rule(ids::PERMISSIVE_TYPE);
        assert_eq!(issues[0].message, format!("{} ({})", r.message, r.description));
    }
}
