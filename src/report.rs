//! Output formatting for detection results.
//!
//! Two formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::detect::{ConsolidatedIssue, DetectionReport, Severity};
use crate::score::ScoreBreakdown;

/// Top-level JSON report structure.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub files_scanned: usize,
    pub issue_count: usize,
    pub score: ScoreBreakdown,
    pub issues: Vec<ConsolidatedIssue>,
}

/// Build the JSON report value.
pub fn to_json(path: &str, report: &DetectionReport) -> JsonReport {
    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        files_scanned: report.scanned,
        issue_count: report.issues.len(),
        score: report.score,
        issues: report.consolidated.clone(),
    }
}

/// Serialize the report to a JSON file on disk.
pub fn write_json_file(path: &str, report: &DetectionReport, output: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&to_json(path, report))?;
    std::fs::write(output, json)?;
    Ok(())
}

/// Print the report as JSON on stdout.
pub fn print_json(path: &str, report: &DetectionReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&to_json(path, report))?;
    println!("{}", json);
    Ok(())
}

/// Print the human-readable report.
pub fn print_pretty(path: &str, report: &DetectionReport, quiet: bool) {
    println!();
    print!("  {}", "slopcheck".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Scanning: ".dimmed());
    print!("{}", path);
    if quiet {
        print!("  {}", "(quiet mode)".dimmed());
    }
    println!();
    print!("  {}", "Files:    ".dimmed());
    println!("{}", report.scanned);
    println!();

    if report.issues.is_empty() {
        println!("  {}  no slop detected", "✓ CLEAN".green().bold());
        println!();
        return;
    }

    // Findings, most severe first; discovery order within a severity.
    let mut groups: Vec<&ConsolidatedIssue> = report.consolidated.iter().collect();
    groups.sort_by_key(|g| g.severity.rank());

    println!(
        "  {} ({} unique, {} total):",
        "Findings".bold(),
        report.consolidated.len(),
        report.issues.len()
    );
    println!();

    for group in groups {
        write_severity_tag(&group.severity);
        print!(" {:<28}", group.rule.dimmed());
        print!("{}", group.file.blue());
        print!("{}", format!(":{}", group.locations[0]).dimmed());
        if group.locations.len() > 1 {
            print!(
                "  {}",
                format!("(+{} more)", group.locations.len() - 1).dimmed()
            );
        }
        println!();
        println!("             {}", group.message);
        println!();
    }

    write_score(&report.score);
    println!();
}

fn write_severity_tag(severity: &Severity) {
    match severity {
        Severity::Critical => print!("    {}", "CRIT ".red().bold()),
        Severity::High => print!("    {}", "HIGH ".red()),
        Severity::Medium => print!("    {}", "MED  ".yellow()),
        Severity::Low => print!("    {}", "LOW  ".blue()),
    }
}

fn write_score(score: &ScoreBreakdown) {
    println!("  {}", "Slop score:".bold());
    println!("    {:<12} {:>4}", "utility", score.utility);
    println!("    {:<12} {:>4}", "quality", score.quality);
    println!("    {:<12} {:>4}", "style", score.style);
    print!("    {:<12} ", "total");
    match score.total {
        0 => println!("{}", "0".green().bold()),
        t if t <= 15 => println!("{}", t.to_string().green()),
        t if t <= 40 => println!("{}", t.to_string().yellow()),
        t => println!("{}", t.to_string().red()),
    }
}
