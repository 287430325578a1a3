//! Comparison-key normalization.
//!
//! Facility names arrive in mixed scripts: full-width and half-width forms,
//! katakana readings next to hiragana ones, decorative punctuation. NFKC
//! handles the width folding (full-width ASCII, half-width katakana,
//! ideographic spaces); the remaining CJK punctuation is stripped from an
//! enumerated set.

use unicode_normalization::UnicodeNormalization;

/// Punctuation and bracket characters removed from comparison keys.
///
/// Enumerated post-NFKC: width variants that NFKC folds to ASCII (（, ．,
/// ／, …) are covered by their ASCII entry.
const STRIP_CHARS: &[char] = &[
    ',', '.', '、', '。', '・', ';', ':', '\'', '"', '’', '‘', '“', '”', '-', '‐', '−', '–', '—',
    '―', '~', '〜', 'ー', '(', ')', '[', ']', '{', '}', '<', '>', '「', '」', '『', '』', '【',
    '】', '〈', '〉', '《', '》',
];

fn is_stripped(c: char) -> bool {
    c.is_whitespace() || STRIP_CHARS.contains(&c)
}

/// Katakana to hiragana, leaving everything else untouched.
///
/// Covers the small-kana and ヵ/ヶ range; the prolonged sound mark is part of
/// the strip set, not folded here.
fn fold_kana(c: char) -> char {
    match c {
        'ァ'..='ヶ' => char::from_u32(c as u32 - 0x60).unwrap_or(c),
        _ => c,
    }
}

/// Normalizes a string into a comparison key.
///
/// NFKC compatibility composition, lowercasing, and removal of the
/// enumerated whitespace/punctuation/bracket set. Returns `""` for empty
/// input. Idempotent.
pub fn normalize_for_comparison(s: &str) -> String {
    s.nfkc()
        .collect::<String>()
        .to_lowercase()
        .chars()
        .filter(|c| !is_stripped(*c))
        .collect()
}

/// Like [`normalize_for_comparison`], additionally folding katakana to
/// hiragana so script variants of the same reading compare equal.
///
/// Full-width digits and half-width katakana are already folded by NFKC.
pub fn normalize_fuzzy(s: &str) -> String {
    s.nfkc()
        .collect::<String>()
        .to_lowercase()
        .chars()
        .filter(|c| !is_stripped(*c))
        .map(fold_kana)
        .collect()
}
