//! Tokenization for address and name fields.

use unicode_normalization::UnicodeNormalization;

use crate::compare::normalize_fuzzy;

/// Separator characters, applied after NFKC folding.
///
/// The prolonged sound mark is deliberately not a separator: it appears
/// inside katakana words and is handled by the fuzzy normalizer instead.
const SEPARATORS: &[char] = &[
    ',', '.', ';', ':', '/', '、', '。', '・', '(', ')', '[', ']', '{', '}', '「', '」', '『',
    '』', '【', '】', '-', '‐', '−', '–', '—', '―', '~', '〜',
];

fn is_separator(c: char) -> bool {
    c.is_whitespace() || SEPARATORS.contains(&c)
}

/// Splits a string on the separator set and fuzzy-normalizes each piece.
///
/// Empty pieces are dropped; order is preserved and duplicates are kept
/// (callers de-duplicate through a set where needed).
pub fn tokenize(s: &str) -> Vec<String> {
    s.nfkc()
        .collect::<String>()
        .split(is_separator)
        .map(normalize_fuzzy)
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_japanese_punctuation() {
        assert_eq!(
            tokenize("東京都中野区・沼袋３−２８−９"),
            vec!["東京都中野区", "沼袋3", "28", "9"]
        );
    }

    #[test]
    fn keeps_duplicates_in_order() {
        assert_eq!(tokenize("内科 外科 内科"), vec!["内科", "外科", "内科"]);
    }

    #[test]
    fn empty_and_separator_only_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("・、 - ／").is_empty());
    }

    #[test]
    fn pieces_are_fuzzy_normalized() {
        assert_eq!(tokenize("イシイ内科／ｸﾘﾆｯｸ"), vec!["いしい内科", "くりにっく"]);
    }
}
