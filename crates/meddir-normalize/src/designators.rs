//! Corporate-designator stripping and name-variant generation.
//!
//! Facility names in the source dataset routinely carry legal-entity
//! prefixes (医療法人社団, 社会福祉法人, abbreviated bracket forms) that the
//! application-side records omit. Matching compares designator-stripped
//! variants of both sides instead of the raw strings.

use unicode_normalization::UnicodeNormalization;

use crate::compare::normalize_fuzzy;

/// Legal-entity designators recognized at the start of a facility name.
///
/// Ordered longest-first so compound forms win over their own prefixes
/// (医療法人社団 before 医療法人). Bracketed abbreviations are listed in
/// their half-width form; NFKC folds the full-width variants onto them.
const DESIGNATORS: &[&str] = &[
    "独立行政法人労働者健康安全機構",
    "独立行政法人国立病院機構",
    "特定非営利活動法人",
    "国家公務員共済組合",
    "地方独立行政法人",
    "社会医療法人財団",
    "社会医療法人社団",
    "公立大学法人",
    "国立大学法人",
    "独立行政法人",
    "社会医療法人",
    "医療法人財団",
    "医療法人社団",
    "公益社団法人",
    "公益財団法人",
    "一般社団法人",
    "一般財団法人",
    "社会福祉法人",
    "健康保険組合",
    "医療法人",
    "学校法人",
    "宗教法人",
    "株式会社",
    "有限会社",
    "合同会社",
    "(医)",
    "(社)",
    "(財)",
    "(福)",
    "医)",
];

/// Strips leading legal-entity designators from a facility name.
///
/// Repeatedly removes the longest matching designator (and any separator
/// that follows it) from the front of the NFKC-folded, trimmed name.
/// Returns `None` when no designator was present, so callers can tell
/// "no designator" apart from "stripped to empty". Each successful strip
/// shortens the string, so the loop terminates even on adversarial
/// repeated prefixes.
pub fn strip_corporate_designators(name: &str) -> Option<String> {
    let folded: String = name.nfkc().collect();
    let mut rest = folded.trim().to_string();
    let mut stripped = false;

    loop {
        let Some(tail) = DESIGNATORS.iter().find_map(|d| rest.strip_prefix(d)) else {
            break;
        };
        rest = tail
            .trim_start_matches(|c: char| c.is_whitespace() || c == '・')
            .to_string();
        stripped = true;
    }

    stripped.then_some(rest)
}

/// Removes parenthesized phrases anywhere in the string.
///
/// Designators also appear mid-name in bracketed form
/// (いしい内科クリニック（医療法人社団）); those spans are dropped whole.
fn remove_bracketed(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

fn push_variant(variants: &mut Vec<String>, candidate: String) {
    if !candidate.is_empty() && !variants.contains(&candidate) {
        variants.push(candidate);
    }
}

/// Generates the deduplicated, fuzzy-normalized name variants used for
/// comparison.
///
/// Contains the normalized original, the designator-stripped form, the
/// form with the leading whitespace-delimited token dropped, and the form
/// with bracketed phrases removed mid-string. Never contains the empty
/// string; an empty input yields no variants at all.
pub fn name_variants(name: &str) -> Vec<String> {
    let mut variants = Vec::new();

    push_variant(&mut variants, normalize_fuzzy(name));

    if let Some(stripped) = strip_corporate_designators(name) {
        push_variant(&mut variants, normalize_fuzzy(&stripped));
    }

    let folded: String = name.nfkc().collect();
    let mut tokens = folded.split_whitespace();
    if tokens.next().is_some() {
        let remainder = tokens.collect::<Vec<_>>().join("");
        if !remainder.is_empty() {
            push_variant(&mut variants, normalize_fuzzy(&remainder));
        }
    }

    push_variant(&mut variants, normalize_fuzzy(&remove_bracketed(&folded)));

    variants
}
