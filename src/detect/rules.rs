//! The declarative rule registry.
//!
//! Built-in rules are data, not control flow: a fixed table of compiled
//! patterns plus metadata. New detections are added by appending a row, never
//! by writing new conditionals. Custom rules from configuration are appended
//! after the built-ins in declaration order, then severity overrides are
//! applied by id.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{Config, ConfigError};

use super::types::Severity;

/// Stable rule ids referenced by the context filter and the score table.
pub mod ids {
    pub const PERMISSIVE_TYPE: &str = "permissive-type-usage";
    pub const UNSAFE_CAST: &str = "unsafe-type-cast";
    pub const NON_NULL_ASSERTION: &str = "non-null-assertion";
    pub const HALLUCINATED_FRAMEWORK_IMPORT: &str = "hallucinated-framework-import";
    pub const HALLUCINATED_HOOK_IMPORT: &str = "hallucinated-hook-import";
    pub const MISSING_ERROR_HANDLING: &str = "missing-error-handling";
    pub const PRODUCTION_LOGGING: &str = "production-logging";
    pub const EMPTY_CATCH: &str = "empty-catch-block";
    pub const PLACEHOLDER_IMPLEMENTATION: &str = "placeholder-implementation";
    pub const PLACEHOLDER_CONTENT: &str = "placeholder-content";
    pub const PLACEHOLDER_TODO: &str = "placeholder-todo";
    pub const ASSUMPTION_COMMENT: &str = "assumption-comment";
    pub const COMMENT_NOISE: &str = "comment-noise";
    pub const REDUNDANT_AWAIT: &str = "redundant-await";
    pub const BOILERPLATE_CATCH_LOG: &str = "boilerplate-catch-log";
    /// Issued by the nesting heuristic, not matched from this registry.
    pub const NESTED_CONTROL: &str = "nested-control-flow";
}

/// A single detection rule. Immutable once registered, except for severity,
/// which configuration may override.
#[derive(Debug, Clone)]
pub struct DetectionRule {
    pub id: String,
    pub pattern: Regex,
    pub message: String,
    pub severity: Severity,
    pub description: String,
    pub fix: Option<String>,
    pub learn_more: Option<String>,
    pub skip_in_tests: bool,
    pub skip_in_mocks: bool,
}

impl DetectionRule {
    /// Compose the user-facing message: `<message> (<description>)`.
    pub fn composed_message(&self) -> String {
        if self.description.is_empty() {
            self.message.clone()
        } else {
            format!("{} ({})", self.message, self.description)
        }
    }
}

struct BuiltinRule {
    id: &'static str,
    pattern: &'static str,
    message: &'static str,
    severity: Severity,
    description: &'static str,
    fix: Option<&'static str>,
    learn_more: Option<&'static str>,
    skip_in_tests: bool,
    skip_in_mocks: bool,
}

/// The built-in rule table. Registry order is scan order.
const BUILTIN_RULES: &[BuiltinRule] = &[
    BuiltinRule {
        id: ids::PERMISSIVE_TYPE,
        pattern: r"[:<,]\s*\bany\b",
        message: "`any` defeats the type checker",
        severity: Severity::High,
        description: "an `any` annotation silently opts this value out of type safety",
        fix: Some("type the value, or use `unknown` and narrow it"),
        learn_more: Some("https://typescript-eslint.io/rules/no-explicit-any"),
        skip_in_tests: false,
        skip_in_mocks: true,
    },
    BuiltinRule {
        id: ids::UNSAFE_CAST,
        pattern: r"\bas\s+any\b",
        message: "`as any` cast discards the inferred type",
        severity: Severity::High,
        description: "casting to `any` hides real type errors at the call site",
        fix: Some("cast through `unknown` to a concrete type instead"),
        learn_more: Some("https://typescript-eslint.io/rules/no-explicit-any"),
        skip_in_tests: true,
        skip_in_mocks: true,
    },
    BuiltinRule {
        id: ids::NON_NULL_ASSERTION,
        pattern: r"[A-Za-z0-9_\)\]]!\s*[\.\[\)]",
        message: "non-null assertion",
        severity: Severity::Medium,
        description: "`!` asserts a value is present without checking it",
        fix: Some("guard with an explicit null check or optional chaining"),
        learn_more: Some("https://typescript-eslint.io/rules/no-non-null-assertion"),
        skip_in_tests: true,
        skip_in_mocks: false,
    },
    BuiltinRule {
        id: ids::HALLUCINATED_FRAMEWORK_IMPORT,
        pattern: r#"import\s*\{[^}]*\b(useRouter|useNavigate|usePathname|useSearchParams|useParams|Link|NavLink|Head|Image)\b[^}]*\}\s*from\s*['"]react['"]"#,
        message: "symbol is not exported by 'react'",
        severity: Severity::Critical,
        description: "router and navigation APIs live in next/* or react-router-dom, not react",
        fix: Some("import from the framework package that actually exports the symbol"),
        learn_more: None,
        skip_in_tests: false,
        skip_in_mocks: false,
    },
    BuiltinRule {
        id: ids::HALLUCINATED_HOOK_IMPORT,
        pattern: r#"import\s*\{[^}]*\b(useState|useEffect|useCallback|useMemo|useRef|useContext)\b[^}]*\}\s*from\s*['"]next/(?:router|navigation|link|head)['"]"#,
        message: "core React hook imported from a next/* module",
        severity: Severity::Critical,
        description: "useState and friends are exported by react, not by next",
        fix: Some("import the hook from 'react'"),
        learn_more: None,
        skip_in_tests: false,
        skip_in_mocks: false,
    },
    BuiltinRule {
        id: ids::MISSING_ERROR_HANDLING,
        pattern: r"\bfetch\s*\(|\baxios\s*[.(]",
        message: "network call without visible error handling",
        severity: Severity::Medium,
        description: "no try/catch or .catch() found in the enclosing scope",
        fix: Some("wrap the call in try/catch or attach a .catch() handler"),
        learn_more: None,
        skip_in_tests: true,
        skip_in_mocks: true,
    },
    BuiltinRule {
        id: ids::PRODUCTION_LOGGING,
        pattern: r"\bconsole\.(log|debug|info|warn|error)\s*\(",
        message: "console call left in application code",
        severity: Severity::Low,
        description: "stray console output suggests debug scaffolding was never removed",
        fix: Some("delete the call or route it through the project logger"),
        learn_more: None,
        skip_in_tests: false,
        skip_in_mocks: false,
    },
    BuiltinRule {
        id: ids::EMPTY_CATCH,
        pattern: r"catch\s*(\([^)]*\)\s*)?\{\s*\}",
        message: "empty catch block swallows the error",
        severity: Severity::High,
        description: "failures disappear silently; nothing is logged or rethrown",
        fix: Some("handle the error, or at minimum log and rethrow it"),
        learn_more: None,
        skip_in_tests: false,
        skip_in_mocks: false,
    },
    BuiltinRule {
        id: ids::PLACEHOLDER_IMPLEMENTATION,
        pattern: r#"(?i)throw\s+new\s+Error\s*\(\s*['"`]\s*(not\s+implemented|unimplemented|todo|implement\s+me|placeholder)"#,
        message: "placeholder implementation",
        severity: Severity::High,
        description: "the function throws instead of doing its job",
        fix: Some("implement the function or remove it"),
        learn_more: None,
        skip_in_tests: false,
        skip_in_mocks: false,
    },
    BuiltinRule {
        id: ids::PLACEHOLDER_CONTENT,
        pattern: r"(?i)\blorem\s+ipsum\b|\bjohn\s+doe\b|\bexample\.(com|org)\b|test@(test|example)\.com|\b555-\d{4}\b|YOUR_API_KEY|INSERT_\w+_HERE|\bchangeme\b",
        message: "placeholder content",
        severity: Severity::Medium,
        description: "sample data that was never replaced with the real thing",
        fix: Some("substitute real values or move the sample into a fixture"),
        learn_more: None,
        skip_in_tests: true,
        skip_in_mocks: true,
    },
    BuiltinRule {
        id: ids::PLACEHOLDER_TODO,
        pattern: r"(?i)//\s*(?:todo|fixme)\b\s*:?\s*(?:implement|finish|fix|complete|add|handle)?\s*(?:this|later|here|me|it)?\s*$",
        message: "context-free TODO",
        severity: Severity::Medium,
        description: "a TODO with no actionable detail is a stub marker, not a plan",
        fix: Some("state the concrete follow-up, or do it now"),
        learn_more: None,
        skip_in_tests: false,
        skip_in_mocks: false,
    },
    BuiltinRule {
        id: ids::ASSUMPTION_COMMENT,
        pattern: r"(?i)//.*\b(assuming\s+th|should\s+work|probably\s+(works|fine)|might\s+work|hopefully|this\s+should\s+be\s+(fine|ok|okay))\b",
        message: "unverified assumption in comment",
        severity: Severity::Low,
        description: "the author guessed instead of checking",
        fix: Some("verify the behavior and replace the hedge with a fact"),
        learn_more: None,
        skip_in_tests: false,
        skip_in_mocks: false,
    },
    BuiltinRule {
        id: ids::COMMENT_NOISE,
        pattern: r"(?i)^\s*//+\s*(-{4,}|={4,}|\*{4,}|step\s+\d+|first,?\s+we\s|then,?\s+we\s|now,?\s+we\s|finally,?\s+we\s)",
        message: "narration comment",
        severity: Severity::Low,
        description: "banner or step-by-step comments restate what the code already says",
        fix: Some("delete the comment"),
        learn_more: None,
        skip_in_tests: false,
        skip_in_mocks: false,
    },
    BuiltinRule {
        id: ids::REDUNDANT_AWAIT,
        pattern: r"\breturn\s+await\s+",
        message: "redundant `return await`",
        severity: Severity::Low,
        description: "awaiting a returned promise adds a tick for nothing outside try/catch",
        fix: Some("return the promise directly"),
        learn_more: Some("https://eslint.org/docs/latest/rules/no-return-await"),
        skip_in_tests: false,
        skip_in_mocks: false,
    },
    BuiltinRule {
        id: ids::BOILERPLATE_CATCH_LOG,
        pattern: r"catch\s*\([^)]*\)\s*\{\s*console\.(error|log|warn)\s*\(",
        message: "catch block only logs",
        severity: Severity::Low,
        description: "log-and-continue error handling leaves the caller none the wiser",
        fix: Some("rethrow, surface to the user, or return an error state"),
        learn_more: None,
        skip_in_tests: false,
        skip_in_mocks: false,
    },
];

/// Built-in rules, compiled once per process. Patterns are static and
/// known-good.
static COMPILED_BUILTINS: Lazy<Vec<DetectionRule>> = Lazy::new(|| {
    BUILTIN_RULES
        .iter()
        .map(|r| DetectionRule {
            id: r.id.to_string(),
            pattern: Regex::new(r.pattern).unwrap(),
            message: r.message.to_string(),
            severity: r.severity,
            description: r.description.to_string(),
            fix: r.fix.map(str::to_string),
            learn_more: r.learn_more.map(str::to_string),
            skip_in_tests: r.skip_in_tests,
            skip_in_mocks: r.skip_in_mocks,
        })
        .collect()
});

/// Clone the built-in rule list as the base of a new registry.
pub fn builtin_rules() -> Vec<DetectionRule> {
    COMPILED_BUILTINS.clone()
}

/// The active rule set for a run: built-ins plus validated custom rules,
/// with severity overrides applied. Read-only after construction.
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<DetectionRule>,
}

impl RuleSet {
    /// Build the registry from the built-in table and an optional
    /// configuration. Fails without building anything if the configuration
    /// does not validate.
    pub fn build(config: Option<&Config>) -> Result<Self, ConfigError> {
        let mut rules = builtin_rules();

        if let Some(config) = config {
            config.validate()?;

            for custom in &config.rules {
                // validate() guarantees the mandatory fields are present and
                // well-formed; unwraps here cannot fire.
                rules.push(DetectionRule {
                    id: custom.id.clone().unwrap(),
                    pattern: Regex::new(custom.pattern.as_deref().unwrap()).unwrap(),
                    message: custom.message.clone().unwrap(),
                    severity: custom.severity.as_deref().unwrap().parse().unwrap(),
                    description: custom.description.clone().unwrap_or_default(),
                    fix: custom.fix.clone(),
                    learn_more: custom.learn_more.clone(),
                    skip_in_tests: false,
                    skip_in_mocks: false,
                });
            }

            // Unknown ids in the override map are ignored, not errors.
            for rule in &mut rules {
                if let Some(value) = config.severity.get(&rule.id) {
                    rule.severity = value.parse().unwrap();
                }
            }
        }

        Ok(Self { rules })
    }

    pub fn iter(&self) -> impl Iterator<Item = &DetectionRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&DetectionRule> {
        self.rules.iter().find(|r| r.id == id)
    }
}
