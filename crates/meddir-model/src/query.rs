use serde::{Deserialize, Serialize};

use crate::facility::FacilityClass;

/// The application-side clinic record being resolved against the reference
/// dataset. Never mutated by the matcher.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryRecord {
    /// Name candidates in preference order (registered name, signage name,
    /// user-entered aliases). May be empty.
    pub names: Vec<String>,
    /// Free-form search keyword; checked against candidate identifiers.
    pub keyword: Option<String>,
    pub prefecture: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    /// Facility-class hint when the application knows it.
    pub class_hint: Option<FacilityClass>,
}

impl QueryRecord {
    /// Convenience constructor for the common name + locality lookup.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            names: vec![name.into()],
            ..Self::default()
        }
    }

    pub fn with_prefecture(mut self, prefecture: impl Into<String>) -> Self {
        self.prefecture = Some(prefecture.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_locality() {
        let q = QueryRecord::named("いしい内科クリニック")
            .with_prefecture("東京都")
            .with_city("中野区");
        assert_eq!(q.names.len(), 1);
        assert_eq!(q.prefecture.as_deref(), Some("東京都"));
        assert_eq!(q.city.as_deref(), Some("中野区"));
        assert!(q.postal_code.is_none());
    }

    #[test]
    fn serializes_round_trip() {
        let q = QueryRecord::named("テスト").with_postal_code("165-0025");
        let json = serde_json::to_string(&q).expect("serialize query");
        let round: QueryRecord = serde_json::from_str(&json).expect("deserialize query");
        assert_eq!(round.names, q.names);
        assert_eq!(round.postal_code, q.postal_code);
    }
}
