//! Core types for detection results.

use serde::{Deserialize, Serialize};

/// Severity levels for findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Ordering rank for report sorting (critical first).
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::High => 1,
            Severity::Medium => 2,
            Severity::Low => 3,
        }
    }

    /// Whether this severity fails the run under default (non-strict) rules.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Severity::Critical | Severity::High)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// A source file handed to the engine. The engine performs no I/O;
/// collaborators read contents up front.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// A raw pattern hit before the context filter has ruled on it.
/// Never exposed outside the engine.
#[derive(Debug, Clone)]
pub(crate) struct RawMatch {
    /// 1-based line number
    pub line: usize,
    /// 1-based column of the match start, in characters
    pub column: usize,
    /// The matched substring
    pub text: String,
}

/// A single accepted finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub rule: String,
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub text: String,
    pub message: String,
    pub severity: Severity,
}

/// Results of a full detection run.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionReport {
    pub issues: Vec<Issue>,
    pub consolidated: Vec<super::ConsolidatedIssue>,
    pub score: crate::score::ScoreBreakdown,
    /// Number of files scanned
    pub scanned: usize,
}

impl DetectionReport {
    /// Check if there are any findings that fail the run.
    pub fn has_blocking_issues(&self, strict: bool) -> bool {
        if strict {
            !self.issues.is_empty()
        } else {
            self.issues.iter().any(|i| i.severity.is_blocking())
        }
    }
}
