//! Quote-aware CSV line parsing and row-to-field resolution.

use std::collections::BTreeMap;

use meddir_normalize::normalize_for_comparison;

/// Parses one CSV line into trimmed fields.
///
/// Double quotes escape by doubling; commas inside quotes are preserved.
/// Returns `None` for a line whose quoting cannot be balanced - callers
/// skip and count such lines instead of failing the import.
pub fn parse_csv_line(line: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                // Check for escaped quote ("")
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => {
                current.push(c);
            }
        }
    }

    if in_quotes {
        return None;
    }

    fields.push(current.trim().to_string());
    Some(fields)
}

/// Flat mapping from canonicalized header to cell value for one data line.
///
/// Ephemeral: built per line, consumed into a typed record, discarded.
#[derive(Debug)]
pub struct RawRecord {
    values: BTreeMap<String, String>,
}

impl RawRecord {
    /// Pairs canonicalized headers with the line's fields.
    ///
    /// Extra fields beyond the header width are ignored; missing trailing
    /// fields read as absent.
    pub fn new(headers: &[String], fields: Vec<String>) -> Self {
        let values = headers
            .iter()
            .zip(fields)
            .filter(|(h, v)| !h.is_empty() && !v.is_empty())
            .map(|(h, v)| (h.clone(), v))
            .collect();
        Self { values }
    }

    /// Resolves a field through its alias list, taking the first alias
    /// with a non-empty value.
    pub fn first<'a, I>(&self, aliases: I) -> Option<&str>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        aliases.into_iter().find_map(|alias| {
            self.values
                .get(&canonical_header(alias.as_ref()))
                .map(String::as_str)
        })
    }
}

/// Canonicalizes a header spelling for alias lookup.
pub fn canonical_header(header: &str) -> String {
    normalize_for_comparison(header)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_line() {
        assert_eq!(
            parse_csv_line("a,b,c"),
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn preserves_commas_inside_quotes() {
        assert_eq!(
            parse_csv_line("\"沼袋, 中野区\",東京都"),
            Some(vec!["沼袋, 中野区".to_string(), "東京都".to_string()])
        );
    }

    #[test]
    fn unescapes_doubled_quotes() {
        assert_eq!(
            parse_csv_line("\"いしい\"\"内科\"\"\",b"),
            Some(vec!["いしい\"内科\"".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn unbalanced_quote_is_rejected() {
        assert_eq!(parse_csv_line("\"unterminated,b"), None);
    }

    #[test]
    fn trims_fields() {
        assert_eq!(
            parse_csv_line("  a  ,  b  "),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn resolves_first_nonempty_alias() {
        let headers: Vec<String> = ["ID", "正式名称", "略称"]
            .iter()
            .map(|h| canonical_header(h))
            .collect();
        let raw = RawRecord::new(
            &headers,
            vec![
                "1322136100011".to_string(),
                "医療法人社団いしい内科".to_string(),
                String::new(),
            ],
        );
        // 略称 is empty, so the second alias wins.
        assert_eq!(
            raw.first(["略称", "正式名称"]),
            Some("医療法人社団いしい内科")
        );
        assert_eq!(raw.first(["通称名"]), None);
    }

    #[test]
    fn header_width_variants_collide() {
        let headers = vec![canonical_header("正式名称（フリガナ）")];
        let raw = RawRecord::new(&headers, vec!["イシイナイカ".to_string()]);
        assert_eq!(raw.first(["正式名称(フリガナ)"]), Some("イシイナイカ"));
    }
}
