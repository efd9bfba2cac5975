//! The detection entry point.

use rayon::prelude::*;

use crate::config::{Config, ConfigError};
use crate::score;

use super::consolidate::consolidate;
use super::rules::RuleSet;
use super::scanner::scan_file;
use super::types::{DetectionReport, SourceFile};

/// Run the full detection pipeline over pre-read file contents.
///
/// The registry is built (and the configuration validated) exactly once,
/// before any file is scanned; a malformed configuration aborts the run with
/// no partial registry. Files are independent of one another, so they fan
/// out across threads; scanning within one file stays sequential because the
/// context filter reads neighboring lines. Results are collected in input
/// order, keeping discovery order deterministic.
pub fn run_detection(
    files: &[SourceFile],
    config: Option<&Config>,
    quiet: bool,
) -> Result<DetectionReport, ConfigError> {
    let rules = RuleSet::build(config)?;

    let issues: Vec<_> = files
        .par_iter()
        .map(|file| scan_file(file, &rules, quiet))
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect();

    let consolidated = consolidate(&issues);
    let score = score::calculate(&issues);

    Ok(DetectionReport {
        issues,
        consolidated,
        score,
        scanned: files.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CustomRule;

    #[test]
    fn test_clean_input_yields_zero_score() {
        let files = vec![SourceFile::new(
            "src/math.ts",
            "export function add(a: number, b: number): number {\n  return a + b;\n}\n",
        )];
        let report = run_detection(&files, None, false).unwrap();
        assert!(report.issues.is_empty());
        assert_eq!(report.score.total, 0);
        assert_eq!(report.scanned, 1);
    }

    #[test]
    fn test_results_follow_file_order() {
        let files = vec![
            SourceFile::new("src/b.ts", "const x: any = 1;\n"),
            SourceFile::new("src/a.ts", "const y: any = 2;\n"),
        ];
        let report = run_detection(&files, None, false).unwrap();
        let file_order: Vec<_> = report.issues.iter().map(|i| i.file.as_str()).collect();
        assert_eq!(file_order, vec!["src/b.ts", "src/a.ts"]);
    }

    #[test]
    fn test_invalid_config_aborts_before_scanning() {
        let config = Config {
            rules: vec![CustomRule {
                id: Some("broken".to_string()),
                pattern: Some("[".to_string()),
                message: Some("m".to_string()),
                severity: Some("low".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let files = vec![SourceFile::new("src/a.ts", "const x: any = 1;\n")];
        assert!(run_detection(&files, Some(&config), false).is_err());
    }

    #[test]
    fn test_custom_rule_produces_findings() {
        let config = Config {
            rules: vec![CustomRule {
                id: Some("no-moment".to_string()),
                pattern: Some(r"from\s+'moment'".to_string()),
                message: Some("moment is deprecated here".to_string()),
                severity: Some("medium".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let files = vec![SourceFile::new(
            "src/dates.ts",
            "import dayjs from 'moment';\n",
        )];
        let report = run_detection(&files, Some(&config), false).unwrap();
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].rule, "no-moment");
        // Custom rules without a weight entry contribute the default 3.
        assert_eq!(report.score.total, crate::score::DEFAULT_WEIGHT);
    }
}
