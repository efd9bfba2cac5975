//! Configuration schema and eager validation.
//!
//! Configuration is loaded once, before any file is scanned, and rejected in
//! full if any custom rule is malformed. A partially-applied configuration is
//! never built.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::detect::Severity;

/// Validation failure for a loaded configuration.
///
/// Every variant names the offending rule's index and id (where one was
/// given) so callers can surface the exact violation and abort.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("custom rule #{index} ({id}): missing required field `{field}`")]
    MissingField {
        index: usize,
        id: String,
        field: &'static str,
    },
    #[error("custom rule #{index} ({id}): unrecognized severity {value:?}")]
    InvalidSeverity {
        index: usize,
        id: String,
        value: String,
    },
    #[error("custom rule #{index} ({id}): pattern does not compile: {source}")]
    InvalidPattern {
        index: usize,
        id: String,
        #[source]
        source: regex::Error,
    },
    #[error("severity override for {id:?}: unrecognized severity {value:?}")]
    InvalidOverride { id: String, value: String },
}

/// A user-supplied detection rule.
///
/// `id`, `pattern`, `message` and `severity` are mandatory; the fields are
/// optional here only so validation can name which one is missing instead of
/// failing opaquely at deserialization.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomRule {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fix: Option<String>,
    #[serde(default)]
    pub learn_more: Option<String>,
}

/// Root configuration, read from `slopcheck.json`, `.slopcheckrc.json`,
/// or `slopcheck.yaml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Custom rules appended after the built-in registry, in declaration order.
    #[serde(default)]
    pub rules: Vec<CustomRule>,
    /// Severity overrides by rule id. Unknown ids are ignored, not errors -
    /// config authors may target rules added in a later version.
    #[serde(default)]
    pub severity: HashMap<String, String>,
    /// Glob patterns for paths to exclude from scanning.
    #[serde(default)]
    pub ignore_paths: Vec<String>,
    /// When true, any finding fails the run, not just critical/high.
    #[serde(default)]
    pub strict: bool,
}

impl Config {
    /// Parse a configuration file. JSON is the native format of the scanned
    /// ecosystem; `.yaml`/`.yml` files are accepted as well.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let config: Config = match ext {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };
        Ok(config)
    }

    /// Validate every custom rule and severity override.
    ///
    /// Rejects the whole configuration on the first violation: a missing
    /// mandatory field, an unrecognized severity value, or a pattern that
    /// does not compile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, rule) in self.rules.iter().enumerate() {
            let id = rule.id.clone().unwrap_or_else(|| "<unnamed>".to_string());
            if rule.id.as_deref().map_or(true, str::is_empty) {
                return Err(ConfigError::MissingField {
                    index,
                    id,
                    field: "id",
                });
            }
            let pattern = match rule.pattern.as_deref() {
                Some(p) if !p.is_empty() => p,
                _ => {
                    return Err(ConfigError::MissingField {
                        index,
                        id,
                        field: "pattern",
                    })
                }
            };
            if rule.message.as_deref().map_or(true, str::is_empty) {
                return Err(ConfigError::MissingField {
                    index,
                    id,
                    field: "message",
                });
            }
            let severity = match rule.severity.as_deref() {
                Some(s) if !s.is_empty() => s,
                _ => {
                    return Err(ConfigError::MissingField {
                        index,
                        id,
                        field: "severity",
                    })
                }
            };
            if severity.parse::<Severity>().is_err() {
                return Err(ConfigError::InvalidSeverity {
                    index,
                    id,
                    value: severity.to_string(),
                });
            }
            if let Err(source) = regex::Regex::new(pattern) {
                return Err(ConfigError::InvalidPattern { index, id, source });
            }
        }

        for (id, value) in &self.severity {
            if value.parse::<Severity>().is_err() {
                return Err(ConfigError::InvalidOverride {
                    id: id.clone(),
                    value: value.clone(),
                });
            }
        }

        Ok(())
    }
}
