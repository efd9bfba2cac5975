//! Integration tests for configuration loading and its effect on a run.

use slopcheck::detect::{ids, run_detection, Severity, SourceFile};
use slopcheck::{Config, ConfigError};

#[test]
fn test_custom_rules_extend_the_registry() {
    let json = r#"{
        "rules": [
            {
                "id": "no-var",
                "pattern": "\\bvar\\s+",
                "message": "var leaks scope",
                "severity": "medium",
                "description": "use let or const"
            }
        ]
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    let files = vec![SourceFile::new("src/legacy.ts", "var count = 0;\n")];
    let report = run_detection(&files, Some(&config), false).unwrap();

    assert_eq!(report.issues.len(), 1);
    let issue = &report.issues[0];
    assert_eq!(issue.rule, "no-var");
    assert_eq!(issue.severity, Severity::Medium);
    assert_eq!(issue.message, "var leaks scope (use let or const)");
}

#[test]
fn test_builtin_rules_run_before_custom_rules() {
    let json = r#"{
        "rules": [
            {"id": "zz-custom", "pattern": "console", "message": "m", "severity": "low"}
        ]
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    let files = vec![SourceFile::new("src/app.ts", "console.log('x');\n")];
    let report = run_detection(&files, Some(&config), false).unwrap();

    let rules: Vec<_> = report.issues.iter().map(|i| i.rule.as_str()).collect();
    assert_eq!(rules, vec![ids::PRODUCTION_LOGGING, "zz-custom"]);
}

#[test]
fn test_malformed_config_aborts_with_index_and_id() {
    let json = r#"{
        "rules": [
            {"id": "ok", "pattern": "x", "message": "m", "severity": "low"},
            {"id": "bad-rule", "pattern": "x", "message": "m", "severity": "urgent"}
        ]
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    let files = vec![SourceFile::new("src/app.ts", "x\n")];
    let err = run_detection(&files, Some(&config), false).unwrap_err();
    match err {
        ConfigError::InvalidSeverity { index, id, value } => {
            assert_eq!(index, 1);
            assert_eq!(id, "bad-rule");
            assert_eq!(value, "urgent");
        }
        other => panic!("expected InvalidSeverity, got {:?}", other),
    }
}

#[test]
fn test_override_map_tolerates_unknown_ids() {
    let json = r#"{
        "severity": {
            "permissive-type-usage": "low",
            "some-future-rule": "critical"
        }
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    let files = vec![SourceFile::new("src/app.ts", "const a: any = 1;\n")];
    let report = run_detection(&files, Some(&config), false).unwrap();

    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].severity, Severity::Low);
}

#[test]
fn test_config_file_round_trip() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("slopcheck.json");
    std::fs::write(
        &path,
        r#"{
            "rules": [
                {"id": "no-moment", "pattern": "from 'moment'", "message": "use date-fns", "severity": "high"}
            ],
            "ignorePaths": ["**/fixtures/**"],
            "strict": true
        }"#,
    )
    .unwrap();

    let config = Config::parse_file(&path).unwrap();
    assert!(config.validate().is_ok());
    assert!(config.strict);
    assert_eq!(config.ignore_paths, vec!["**/fixtures/**"]);

    let files = vec![SourceFile::new(
        "src/dates.ts",
        "import moment from 'moment';\n",
    )];
    let report = run_detection(&files, Some(&config), false).unwrap();
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].severity, Severity::High);
}
