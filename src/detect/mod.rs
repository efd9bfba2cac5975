//! The detection engine: registry, scanner, context filter, heuristics,
//! consolidation.
//!
//! Everything in here is I/O-free. Collaborators read files and load
//! configuration; the engine consumes `(path, content)` pairs and returns
//! findings plus a score.

mod consolidate;
mod context;
mod nesting;
mod rules;
mod runner;
mod scanner;
mod scope;
mod types;

pub use consolidate::{consolidate, ConsolidatedIssue};
pub use context::FileContext;
pub use rules::{builtin_rules, ids, DetectionRule, RuleSet};
pub use runner::run_detection;
pub use scanner::scan_file;
pub use types::{DetectionReport, Issue, Severity, SourceFile};
