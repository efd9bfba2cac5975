//! Weighted slop scoring.
//!
//! Every accepted finding contributes its rule's weight to exactly one of
//! three axes:
//!
//! - **utility**: noise and boilerplate (comment spam, redundant constructs)
//! - **quality**: hallucinations, placeholders, unverified assumptions
//! - **style**: taste and overconfidence (everything else)
//!
//! Accumulation is commutative, so the score is independent of issue order.

use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::detect::Issue;

/// Weight applied for rules absent from the table (custom rules included).
pub const DEFAULT_WEIGHT: u32 = 3;

/// Per-rule point weights.
static WEIGHTS: phf::Map<&'static str, u32> = phf_map! {
    "hallucinated-framework-import" => 10,
    "hallucinated-hook-import" => 10,
    "permissive-type-usage" => 5,
    "unsafe-type-cast" => 5,
    "placeholder-implementation" => 6,
    "empty-catch-block" => 6,
    "placeholder-content" => 4,
    "missing-error-handling" => 4,
    "nested-control-flow" => 3,
    "placeholder-todo" => 3,
    "non-null-assertion" => 2,
    "production-logging" => 2,
    "assumption-comment" => 2,
    "boilerplate-catch-log" => 2,
    "comment-noise" => 1,
    "redundant-await" => 1,
};

/// The three scoring axes plus their sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub utility: u32,
    pub quality: u32,
    pub style: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Utility,
    Quality,
    Style,
}

/// Classify a rule id into its axis by fixed substring markers. Quality
/// markers win over utility markers when both appear in one id.
fn axis_for(rule_id: &str) -> Axis {
    const QUALITY_MARKERS: &[&str] = &["hallucinat", "placeholder", "assumption"];
    const UTILITY_MARKERS: &[&str] = &["comment", "boilerplate", "redundan"];

    if QUALITY_MARKERS.iter().any(|m| rule_id.contains(m)) {
        Axis::Quality
    } else if UTILITY_MARKERS.iter().any(|m| rule_id.contains(m)) {
        Axis::Utility
    } else {
        Axis::Style
    }
}

fn weight_for(rule_id: &str) -> u32 {
    WEIGHTS.get(rule_id).copied().unwrap_or(DEFAULT_WEIGHT)
}

/// Fold issues into the three-axis breakdown.
pub fn calculate(issues: &[Issue]) -> ScoreBreakdown {
    let mut score = ScoreBreakdown::default();

    for issue in issues {
        let weight = weight_for(&issue.rule);
        match axis_for(&issue.rule) {
            Axis::Utility => score.utility += weight,
            Axis::Quality => score.quality += weight,
            Axis::Style => score.style += weight,
        }
    }

    score.total = score.utility + score.quality + score.style;
    score
}
