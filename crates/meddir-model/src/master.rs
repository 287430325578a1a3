use serde::{Deserialize, Serialize};

/// A canonical master item used during data migration.
///
/// Legacy exports referenced items by composite `kind:category|name` keys
/// before canonical ids existed; `aliases` carries any such keys plus
/// synonyms collected over successive migration passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterRecord {
    /// Canonical identifier.
    pub id: String,
    /// Item kind (e.g. "department", "symptom").
    pub kind: String,
    pub category: String,
    pub name: String,
    /// Alias strings that should resolve to this record.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Raw legacy composite key carried over from old exports, when present.
    #[serde(default)]
    pub legacy_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_without_optional_fields() {
        let rec: MasterRecord = serde_json::from_str(
            r#"{"id":"m-1","kind":"department","category":"内科系","name":"内科"}"#,
        )
        .expect("deserialize master record");
        assert_eq!(rec.id, "m-1");
        assert!(rec.aliases.is_empty());
        assert!(rec.legacy_key.is_none());
    }
}
