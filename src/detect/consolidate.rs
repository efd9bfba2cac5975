//! Deduplication of repeated findings into one record per unique issue.

use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::types::{Issue, Severity};

/// A group of identical findings, carrying every location they occurred at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidatedIssue {
    pub rule: String,
    pub file: String,
    pub text: String,
    pub message: String,
    pub severity: Severity,
    /// `"line:column"` strings, in discovery order. Never empty.
    pub locations: Vec<String>,
}

#[derive(Hash, PartialEq, Eq)]
struct IssueKey {
    rule: String,
    file: String,
    text: String,
    message: String,
    severity: Severity,
}

/// Group issues by (rule, file, matched text, message, severity), keeping
/// first-seen order for both the groups and each group's locations.
///
/// Pure and total: the sum of location counts over the output equals the
/// number of input issues.
pub fn consolidate(issues: &[Issue]) -> Vec<ConsolidatedIssue> {
    let mut order: Vec<ConsolidatedIssue> = Vec::new();
    let mut index: HashMap<IssueKey, usize> = HashMap::new();

    for issue in issues {
        let key = IssueKey {
            rule: issue.rule.clone(),
            file: issue.file.clone(),
            text: issue.text.clone(),
            message: issue.message.clone(),
            severity: issue.severity,
        };
        let location = format!("{}:{}", issue.line, issue.column);

        match index.entry(key) {
            Entry::Occupied(entry) => order[*entry.get()].locations.push(location),
            Entry::Vacant(entry) => {
                entry.insert(order.len());
                order.push(ConsolidatedIssue {
                    rule: issue.rule.clone(),
                    file: issue.file.clone(),
                    text: issue.text.clone(),
                    message: issue.message.clone(),
                    severity: issue.severity,
                    locations: vec![location],
                });
            }
        }
    }

    order
}
