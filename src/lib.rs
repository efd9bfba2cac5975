//! Slopcheck - quality gate for AI-assisted TypeScript.
//!
//! Slopcheck scans TypeScript/React sources for patterns correlated with
//! low-quality machine-generated code: permissive `any` typing, hallucinated
//! framework imports, missing error handling around network calls,
//! placeholder content, and stray debug logging.
//!
//! # Architecture
//!
//! The engine is deliberately line/regex-based - no AST. Precision loss
//! versus a real parser is an accepted trade-off:
//!
//! - `detect`: the core engine - rule registry, per-line scanner, context
//!   filter, scope heuristics, nesting heuristic, consolidation
//! - `score`: weighted three-axis scoring (utility, quality, style)
//! - `config`: configuration schema with eager whole-batch validation
//! - `report`: output formatting (pretty, JSON)
//! - `cli`: file discovery and orchestration
//!
//! The engine performs no I/O: it consumes `(path, content)` pairs plus an
//! optional validated configuration and returns findings plus a score.
//!
//! # Adding a New Rule
//!
//! Built-in rules are data, not control flow. Append a row to the table in
//! `detect/rules.rs`; if the rule needs a legitimate-use exception, add a
//! carve-out arm in `detect/context.rs`.

pub mod cli;
pub mod config;
pub mod detect;
pub mod report;
pub mod score;

pub use config::{Config, ConfigError, CustomRule};
pub use detect::{
    consolidate, run_detection, ConsolidatedIssue, DetectionReport, DetectionRule, Issue, RuleSet,
    Severity, SourceFile,
};
pub use score::ScoreBreakdown;
