//! Context-aware suppression of raw matches.
//!
//! A chain of predicates consulted per candidate match, short-circuiting on
//! the first rejection:
//!
//! 1. file-category exemptions (test/mock files, per rule flags)
//! 2. declaration-file exemption for permissive-type rules
//! 3. explicit acknowledgment markers on the current or preceding line
//! 4. pattern-specific legitimate-use carve-outs
//! 5. the error-handling scope heuristic (missing-error-handling only)
//! 6. quiet-mode scope restriction
//!
//! Every carve-out in stage 4 is a textual containment check on the raw
//! line, not a semantic check. False negatives there are accepted.

use lazy_static::lazy_static;
use regex::Regex;

use super::rules::{ids, DetectionRule};
use super::scope;

lazy_static! {
    /// Inline markers by which an author knowingly opts into a flagged
    /// pattern: linter disables and type-system error suppressions.
    static ref ACKNOWLEDGMENT: Regex = Regex::new(
        r"eslint-disable|@ts-ignore|@ts-expect-error|@ts-nocheck"
    ).unwrap();
}

/// Rules whose findings concern the permissive escape-hatch type. These are
/// the rules that acknowledgment markers and declaration-file exemptions
/// apply to.
const PERMISSIVE_TYPE_RULES: &[&str] = &[
    ids::PERMISSIVE_TYPE,
    ids::UNSAFE_CAST,
    ids::NON_NULL_ASSERTION,
];

/// Path-derived category of a file, computed once per file.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileContext {
    pub is_test: bool,
    pub is_mock: bool,
    pub is_declaration: bool,
}

impl FileContext {
    /// Categorize a file by path convention.
    pub fn categorize(path: &str) -> Self {
        let normalized = path.replace('\\', "/");
        let lower = normalized.to_lowercase();

        let is_test = lower.contains("/__tests__/")
            || lower.contains("/tests/")
            || lower.contains("/test/")
            || lower.starts_with("tests/")
            || lower.starts_with("test/")
            || lower.contains(".test.")
            || lower.contains(".spec.");

        let is_mock = lower.contains("/__mocks__/")
            || lower.contains("/mocks/")
            || lower.starts_with("mocks/")
            || lower.contains(".mock.");

        let is_declaration = lower.ends_with(".d.ts");

        Self {
            is_test,
            is_mock,
            is_declaration,
        }
    }
}

fn is_permissive_type_rule(id: &str) -> bool {
    PERMISSIVE_TYPE_RULES.contains(&id)
}

/// Decide whether a raw match survives to become an issue.
///
/// `idx` is the 0-based index of the matched line within `lines`.
pub fn accept(
    rule: &DetectionRule,
    lines: &[&str],
    idx: usize,
    ctx: &FileContext,
    quiet: bool,
) -> bool {
    let line = lines[idx];

    // 1. File-category exemptions. The test category covers mock paths too;
    //    the mock flag exists for rules that tolerate tests but not mocks.
    if rule.skip_in_tests && (ctx.is_test || ctx.is_mock) {
        return false;
    }
    if rule.skip_in_mocks && ctx.is_mock {
        return false;
    }

    // 2. Declaration files carry no executable code; permissive types there
    //    are interface surface, not slop.
    if ctx.is_declaration && is_permissive_type_rule(&rule.id) {
        return false;
    }

    // 3. Explicit acknowledgment on this line or the one above. The author
    //    opted in; nothing below may override this.
    if is_permissive_type_rule(&rule.id) {
        let acknowledged = ACKNOWLEDGMENT.is_match(line)
            || (idx > 0 && ACKNOWLEDGMENT.is_match(lines[idx - 1]));
        if acknowledged {
            return false;
        }
    }

    // 4. Pattern-specific legitimate-use carve-outs.
    if !passes_carve_outs(rule, lines, idx) {
        return false;
    }

    // 5. Error-handling heuristic, for the missing-error-handling rule only.
    if rule.id == ids::MISSING_ERROR_HANDLING && scope::is_call_handled(lines, idx) {
        return false;
    }

    // 6. Quiet mode focuses reports on core application code; logging calls
    //    remain interesting everywhere.
    if quiet && ctx.is_test && rule.id != ids::PRODUCTION_LOGGING {
        return false;
    }

    true
}

/// Narrow per-rule exceptions for idioms that look like slop but aren't.
fn passes_carve_outs(rule: &DetectionRule, lines: &[&str], idx: usize) -> bool {
    let line = lines[idx];
    match rule.id.as_str() {
        ids::PERMISSIVE_TYPE => {
            // Test-framework matches-any helpers.
            if line.contains("expect.any(") {
                return false;
            }
            // JSON parsing and response-shape typing have no better type
            // to offer.
            if line.contains("JSON.parse") || line.contains(".json()") {
                return false;
            }
            // `catch (e: any)` was mandatory before TS 4.4 `unknown` catch
            // bindings.
            if line.contains("catch (") || line.contains("catch(") {
                return false;
            }
            true
        }
        ids::UNSAFE_CAST => {
            if line.contains("expect.any(") {
                return false;
            }
            // Spread-with-cast: `{...(props as any)}`.
            if line.contains("...(") {
                return false;
            }
            // Dynamic index access: `(obj as any)[key]`.
            if line.contains("as any)[") {
                return false;
            }
            if line.contains("JSON.parse") || line.contains(".json()") || line.contains("axios") {
                return false;
            }
            // The safe two-step double cast already acknowledges the hole.
            if line.contains("as unknown as") {
                return false;
            }
            true
        }
        ids::PRODUCTION_LOGGING => {
            // Logging inside error-handling code is not a stray debug call.
            !scope::is_in_guarded_scope(lines, idx)
        }
        _ => true,
    }
}
