//! Text-based scope heuristics.
//!
//! Function boundaries and try/catch enclosure are approximated from brace
//! balance over raw lines; no parser is involved. Both helpers are pure
//! functions over `(lines, index)` so a lightweight tokenizer could replace
//! them later without touching call sites.

use lazy_static::lazy_static;
use regex::Regex;

/// How far back to look for the start of the enclosing function.
const FUNCTION_LOOKBACK: usize = 20;

/// How far forward to follow a promise chain for a rejection handler.
const CHAIN_LOOKAHEAD: usize = 5;

lazy_static! {
    /// Lines that look like the start of a function: a definition keyword,
    /// an arrow, or a hook declaration, combined with an opening brace or
    /// arrow on the same line.
    static ref FUNCTION_ANCHOR: Regex = Regex::new(
        r"\bfunction\b|=>|\buse(Effect|Callback|Memo|State)\s*\("
    ).unwrap();

    /// Tokens that indicate a guarded scope: a try block opener or a
    /// rejection handler.
    static ref GUARD_TOKEN: Regex = Regex::new(
        r"\btry\b\s*\{|\.catch\s*\(|\bcatch\b\s*\("
    ).unwrap();

    /// A catch-block opener specifically (used by the enclosure scan).
    static ref CATCH_OPENER: Regex = Regex::new(r"\bcatch\b\s*[\(\{]|\.catch\s*\(").unwrap();
}

fn brace_delta(line: &str) -> (i32, bool) {
    let mut delta = 0;
    let mut opened = false;
    for ch in line.chars() {
        match ch {
            '{' => {
                delta += 1;
                opened = true;
            }
            '}' => delta -= 1,
            _ => {}
        }
    }
    (delta, opened)
}

/// Locate the enclosing function as a `[start, end]` line range, or `None`
/// when no plausible boundary exists within the lookback window.
pub fn find_enclosing_function(lines: &[&str], target: usize) -> Option<(usize, usize)> {
    let lookback_floor = target.saturating_sub(FUNCTION_LOOKBACK);
    let start = (lookback_floor..=target)
        .rev()
        .find(|&i| FUNCTION_ANCHOR.is_match(lines[i]) && (lines[i].contains('{') || lines[i].contains("=>")))?;

    // Forward brace balance: the scope ends when depth returns to zero
    // after first reaching one.
    let mut depth = 0i32;
    let mut entered = false;
    for (offset, line) in lines[start..].iter().enumerate() {
        let (delta, opened) = brace_delta(line);
        depth += delta;
        entered = entered || opened;
        if entered && depth <= 0 {
            return Some((start, start + offset));
        }
    }
    // Unterminated scope: treat the rest of the file as the body.
    Some((start, lines.len() - 1))
}

/// Approximate "is this call inside a guarded scope".
///
/// Best effort only: deeply nested closures and multi-statement chains may
/// misclassify, which is an accepted trade-off of staying parser-free.
pub fn is_call_handled(lines: &[&str], call_idx: usize) -> bool {
    if let Some((start, end)) = find_enclosing_function(lines, call_idx) {
        if lines[start..=end].iter().any(|l| GUARD_TOKEN.is_match(l)) {
            return true;
        }
    } else {
        // No boundable scope: fall back to a two-line window around the call.
        let lo = call_idx.saturating_sub(2);
        let hi = (call_idx + 2).min(lines.len().saturating_sub(1));
        if lines[lo..=hi].iter().any(|l| GUARD_TOKEN.is_match(l)) {
            return true;
        }
    }

    // A chained call may pick up its handler a few lines down, before the
    // statement terminates.
    if is_chained(lines[call_idx]) {
        let limit = (call_idx + 1 + CHAIN_LOOKAHEAD).min(lines.len());
        for line in &lines[call_idx + 1..limit] {
            if line.contains(".catch(") {
                return true;
            }
            let trimmed = line.trim_end();
            if trimmed.ends_with(';') {
                break;
            }
        }
    }

    false
}

/// Whether the call line continues into a chained expression, i.e. the
/// statement has not terminated on this line.
fn is_chained(line: &str) -> bool {
    let trimmed = line.trim_end();
    !trimmed.is_empty() && !trimmed.ends_with(';')
}

/// Whether the target line sits inside a catch block.
///
/// Scans backward tracking brace depth; true as soon as a catch opener is
/// found with an unmatched opening brace between it and the target.
/// Processing characters right-to-left makes `} catch (e) {` resolve to the
/// catch's own opening brace first, which is the one that encloses the
/// target.
pub fn is_in_guarded_scope(lines: &[&str], target: usize) -> bool {
    let mut balance = 0i32;
    for i in (0..target).rev() {
        let is_catch_line = CATCH_OPENER.is_match(lines[i]);
        for ch in lines[i].chars().rev() {
            match ch {
                '{' => {
                    balance += 1;
                    if balance > 0 && is_catch_line {
                        return true;
                    }
                }
                '}' => balance -= 1,
                _ => {}
            }
        }
    }
    false
}
