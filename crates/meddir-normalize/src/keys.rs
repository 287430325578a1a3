//! Composite comparison keys for migration-era identity.
//!
//! Legacy exports referenced master items by a `kind:category|name` string
//! before canonical ids existed. The key is built over normalized parts so
//! width and case variants of the same item collide as intended.

use crate::compare::normalize_for_comparison;

/// Builds the legacy comparable key for a master item.
///
/// Returns `None` when any part normalizes to empty; a partial key would
/// alias unrelated items.
pub fn comparable_key(kind: &str, category: &str, name: &str) -> Option<String> {
    let kind = normalize_for_comparison(kind);
    let category = normalize_for_comparison(category);
    let name = normalize_for_comparison(name);
    if kind.is_empty() || category.is_empty() || name.is_empty() {
        return None;
    }
    Some(format!("{kind}:{category}|{name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_normalized_key() {
        assert_eq!(
            comparable_key("department", "内科系", "内科"),
            Some("department:内科系|内科".to_string())
        );
    }

    #[test]
    fn width_variants_collide() {
        assert_eq!(
            comparable_key("department", "内科系", "ＡＢＣクリニック"),
            comparable_key("DEPARTMENT", "内科系", "abcクリニック")
        );
    }

    #[test]
    fn empty_part_yields_none() {
        assert_eq!(comparable_key("", "内科系", "内科"), None);
        assert_eq!(comparable_key("department", "　", "内科"), None);
        assert_eq!(comparable_key("department", "内科系", "・・"), None);
    }
}
