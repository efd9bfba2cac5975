//! Tests for the JSON report format.

use slopcheck::detect::{run_detection, SourceFile};
use slopcheck::report;

fn sample_report() -> slopcheck::DetectionReport {
    let files = vec![
        SourceFile::new("src/a.ts", "const a: any = 1;\nconst b: any = 2;\n"),
        SourceFile::new("src/b.ts", "console.log('x');\n"),
    ];
    run_detection(&files, None, false).unwrap()
}

#[test]
fn test_json_report_fields() {
    let detection = sample_report();
    let json = report::to_json("src", &detection);

    assert_eq!(json.path, "src");
    assert_eq!(json.files_scanned, 2);
    assert_eq!(json.issue_count, 3);
    assert_eq!(json.version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_json_serialization_shape() {
    let detection = sample_report();
    let text = serde_json::to_string_pretty(&report::to_json("src", &detection)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    // Identical `: any` findings in one file consolidate to one entry with
    // two locations.
    let issues = value["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0]["rule"], "permissive-type-usage");
    assert_eq!(issues[0]["severity"], "high");
    assert_eq!(
        issues[0]["locations"],
        serde_json::json!(["1:8", "2:8"])
    );
    assert_eq!(issues[1]["rule"], "production-logging");

    let score = &value["score"];
    assert_eq!(
        score["total"],
        score["utility"].as_u64().unwrap()
            + score["quality"].as_u64().unwrap()
            + score["style"].as_u64().unwrap()
    );
}

#[test]
fn test_json_file_output() {
    let detection = sample_report();
    let temp = tempfile::TempDir::new().unwrap();
    let out = temp.path().join("report.json");

    report::write_json_file("src", &detection, &out).unwrap();
    let text = std::fs::read_to_string(&out).unwrap();
    let back: report::JsonReport = serde_json::from_str(&text).unwrap();
    assert_eq!(back.issue_count, detection.issues.len());
}
