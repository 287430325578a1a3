//! Per-facility search cache and the pool that owns it.
//!
//! Building the cache is the dominant cost of preparing a large reference
//! pool; it happens lazily on first use and is memoized per entry, so
//! repeated match calls against the same pool pay O(1) amortized. The pool
//! owns the records - the cache lives in a side cell instead of mutating
//! the otherwise-immutable `FacilityRecord`.

use std::cell::OnceCell;
use std::collections::BTreeSet;

use meddir_model::FacilityRecord;
use meddir_normalize::{name_variants, normalize_for_comparison, normalize_fuzzy, tokenize};

/// Derived, read-only projection of a facility used during matching.
#[derive(Debug, Clone, Default)]
pub struct SearchCache {
    /// Variants of the short-name fields.
    pub short_variants: Vec<String>,
    /// Variants of the official and foreign-script names.
    pub full_variants: Vec<String>,
    /// Merged token set from name and address fields.
    pub tokens: BTreeSet<String>,
    /// Fuzzy-normalized prefecture token; empty when unknown.
    pub prefecture: String,
    /// Fuzzy-normalized city token; empty when unknown.
    pub city: String,
    /// Digits-only postal code.
    pub postal: String,
    /// Uppercased identifier for keyword containment checks.
    pub id_upper: String,
}

/// Digits-only rendering of a postal code, tolerant of 〒 and separators.
pub(crate) fn postal_digits(postal: &str) -> String {
    normalize_for_comparison(postal)
        .chars()
        .filter(char::is_ascii_digit)
        .collect()
}

impl SearchCache {
    /// Builds the cache from every available name field plus its
    /// designator variants, and the address/locale fields.
    pub fn build(record: &FacilityRecord) -> Self {
        let mut short_variants = Vec::new();
        for name in [&record.short_name, &record.short_name_kana] {
            for variant in name_variants(name) {
                if !short_variants.contains(&variant) {
                    short_variants.push(variant);
                }
            }
        }

        let mut full_variants = Vec::new();
        for name in [
            &record.official_name,
            &record.official_name_kana,
            &record.foreign_name,
        ] {
            for variant in name_variants(name) {
                if !full_variants.contains(&variant) {
                    full_variants.push(variant);
                }
            }
        }

        let mut tokens = BTreeSet::new();
        for field in record.names().chain([
            record.address.as_str(),
            record.city.as_str(),
            record.prefecture.as_str(),
        ]) {
            tokens.extend(tokenize(field));
        }

        Self {
            short_variants,
            full_variants,
            tokens,
            prefecture: normalize_fuzzy(&record.prefecture),
            city: normalize_fuzzy(&record.city),
            postal: postal_digits(&record.postal_code),
            id_upper: record.id.to_uppercase(),
        }
    }
}

struct PoolEntry {
    record: FacilityRecord,
    cache: OnceCell<SearchCache>,
}

/// Owns the reference records and their lazily-built search caches.
pub struct FacilityPool {
    entries: Vec<PoolEntry>,
}

impl FacilityPool {
    pub fn new(records: Vec<FacilityRecord>) -> Self {
        let entries = records
            .into_iter()
            .map(|record| PoolEntry {
                record,
                cache: OnceCell::new(),
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The reference records, in load order.
    pub fn records(&self) -> impl Iterator<Item = &FacilityRecord> {
        self.entries.iter().map(|e| &e.record)
    }

    /// Records paired with their caches, building each cache on first use.
    pub(crate) fn cached_entries(
        &self,
    ) -> impl Iterator<Item = (&FacilityRecord, &SearchCache)> {
        self.entries.iter().map(|entry| {
            let cache = entry.cache.get_or_init(|| SearchCache::build(&entry.record));
            (&entry.record, cache)
        })
    }
}

impl FromIterator<FacilityRecord> for FacilityPool {
    fn from_iter<I: IntoIterator<Item = FacilityRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FacilityRecord {
        FacilityRecord {
            id: "1322136100011".to_string(),
            official_name: "医療法人社団あんず会いしい内科クリニック".to_string(),
            short_name: "いしい内科クリニック".to_string(),
            prefecture: "東京都".to_string(),
            city: "中野区".to_string(),
            address: "東京都中野区沼袋３－２８－９".to_string(),
            postal_code: "〒165-0025".to_string(),
            ..FacilityRecord::default()
        }
    }

    #[test]
    fn cache_carries_designator_stripped_variants() {
        let cache = SearchCache::build(&sample());
        assert!(cache.short_variants.contains(&"いしい内科くりにっく".to_string()));
        assert!(cache.full_variants.contains(&"あんず会いしい内科くりにっく".to_string()));
    }

    #[test]
    fn cache_normalizes_locale_signals() {
        let cache = SearchCache::build(&sample());
        assert_eq!(cache.prefecture, "東京都");
        assert_eq!(cache.city, "中野区");
        assert_eq!(cache.postal, "1650025");
    }

    #[test]
    fn cache_tokens_merge_names_and_address() {
        let cache = SearchCache::build(&sample());
        assert!(cache.tokens.contains("東京都中野区沼袋3"));
        assert!(cache.tokens.contains("いしい内科くりにっく"));
    }

    #[test]
    fn cache_is_built_once_per_entry() {
        let pool = FacilityPool::new(vec![sample()]);
        let first: *const SearchCache = pool.cached_entries().next().unwrap().1;
        let second: *const SearchCache = pool.cached_entries().next().unwrap().1;
        assert_eq!(first, second, "memoized, not recomputed");
    }

    #[test]
    fn empty_fields_produce_empty_signals() {
        let cache = SearchCache::build(&FacilityRecord::default());
        assert!(cache.short_variants.is_empty());
        assert!(cache.full_variants.is_empty());
        assert!(cache.tokens.is_empty());
        assert!(cache.postal.is_empty());
    }
}
