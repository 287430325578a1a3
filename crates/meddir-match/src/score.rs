//! Weighted candidate scoring.
//!
//! Additive scoring over name-variant overlap and locale signals. The
//! relative order of the bonuses and penalties is the contract (asserted
//! in tests below); the magnitudes are tunable per deployment.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use meddir_model::{FacilityRecord, QueryRecord};
use meddir_normalize::{name_variants, normalize_fuzzy, tokenize};
use serde::{Deserialize, Serialize};

use crate::cache::{FacilityPool, SearchCache, postal_digits};

/// Default candidate cap for interactive lookups; batch reconciliation
/// passes a higher limit.
pub const DEFAULT_MATCH_LIMIT: usize = 8;

/// Minimum variant length (in chars) for substring containment, so a
/// single shared character never counts as a name match.
const MIN_CONTAINMENT_CHARS: usize = 2;

/// Tunable scoring magnitudes.
///
/// Higher is better; penalties are negative. The defaults keep the
/// contracted order: exact postal > short-name > full-name > prefecture >
/// city > postal prefix > the small keyword/class/token bonuses, with the
/// name-miss penalty large enough that address evidence alone does not
/// outrank a strong name mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    /// Starting score, so weak-evidence candidates stay orderable.
    pub base: f64,
    /// Candidate identifier contains the uppercased query keyword.
    pub id_keyword: f64,
    /// A query name variant matches a short-name variant.
    pub short_name: f64,
    /// A query name variant matches a full-name variant.
    pub full_name: f64,
    /// No variant match although both sides carry names. Negative.
    pub name_miss: f64,
    /// Exact prefecture-token match. Mismatch with both sides known is a
    /// hard filter, not a penalty.
    pub prefecture: f64,
    /// City-token equality.
    pub city: f64,
    /// City tokens present on both sides but different. Negative.
    pub city_mismatch: f64,
    /// Exact postal-code match; the single largest bonus.
    pub postal_exact: f64,
    /// Shared 3-digit postal prefix.
    pub postal_prefix: f64,
    /// Per shared address token. Linear and uncapped.
    pub address_token: f64,
    /// Facility-class hint agreement.
    pub class_hint: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            base: 10.0,
            id_keyword: 5.0,
            short_name: 40.0,
            full_name: 30.0,
            name_miss: -25.0,
            prefecture: 20.0,
            city: 12.0,
            city_mismatch: -4.0,
            postal_exact: 50.0,
            postal_prefix: 8.0,
            address_token: 2.0,
            class_hint: 3.0,
        }
    }
}

/// A component contributing to a candidate's score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    /// Component name (e.g. "short name match").
    pub name: &'static str,
    /// Contribution; negative for penalties.
    pub value: f64,
}

/// One scored candidate from the reference pool.
#[derive(Debug, Clone)]
pub struct MatchCandidate<'a> {
    pub facility: &'a FacilityRecord,
    pub score: f64,
    /// Exact postal-code match, used as a tie-break signal.
    pub postal_match: bool,
    /// Breakdown of the score for explainability.
    pub components: Vec<ScoreComponent>,
}

impl MatchCandidate<'_> {
    /// Human-readable explanation of the score.
    pub fn explain(&self) -> String {
        self.components
            .iter()
            .map(|c| format!("{}: {:+.1}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Query-side keys, computed once per match call.
struct QueryKeys {
    variants: Vec<String>,
    tokens: BTreeSet<String>,
    prefecture: String,
    city: String,
    postal: String,
    keyword_upper: Option<String>,
}

impl QueryKeys {
    fn build(query: &QueryRecord) -> Self {
        let mut variants = Vec::new();
        for name in &query.names {
            for variant in name_variants(name) {
                if !variants.contains(&variant) {
                    variants.push(variant);
                }
            }
        }
        let tokens = query
            .address
            .as_deref()
            .map(tokenize)
            .unwrap_or_default()
            .into_iter()
            .collect();
        Self {
            variants,
            tokens,
            prefecture: normalize_fuzzy(query.prefecture.as_deref().unwrap_or("")),
            city: normalize_fuzzy(query.city.as_deref().unwrap_or("")),
            postal: postal_digits(query.postal_code.as_deref().unwrap_or("")),
            keyword_upper: query
                .keyword
                .as_deref()
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_uppercase),
        }
    }
}

/// Ranks the reference pool against a query with the default weights.
///
/// Returns at most `limit` candidates, best first. Empty queries and empty
/// pools are legal and yield a (possibly empty) low-confidence list.
pub fn match_facilities<'a>(
    query: &QueryRecord,
    pool: &'a FacilityPool,
    limit: usize,
) -> Vec<MatchCandidate<'a>> {
    match_facilities_with(query, pool, limit, &MatchWeights::default())
}

/// Like [`match_facilities`], with caller-tuned weights.
pub fn match_facilities_with<'a>(
    query: &QueryRecord,
    pool: &'a FacilityPool,
    limit: usize,
    weights: &MatchWeights,
) -> Vec<MatchCandidate<'a>> {
    let keys = QueryKeys::build(query);

    let mut candidates: Vec<MatchCandidate<'a>> = pool
        .cached_entries()
        .filter_map(|(record, cache)| score_candidate(query, &keys, record, cache, weights))
        .collect();

    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.postal_match.cmp(&a.postal_match))
            .then_with(|| a.facility.id.cmp(&b.facility.id))
    });
    candidates.truncate(limit);

    tracing::debug!(
        pool = pool.len(),
        returned = candidates.len(),
        "matched query against reference pool"
    );
    candidates
}

/// Scores one candidate; `None` when the prefecture hard filter excludes it.
fn score_candidate<'a>(
    query: &QueryRecord,
    keys: &QueryKeys,
    record: &'a FacilityRecord,
    cache: &SearchCache,
    weights: &MatchWeights,
) -> Option<MatchCandidate<'a>> {
    // Differing known prefectures exclude the candidate entirely.
    let prefecture_known = !keys.prefecture.is_empty() && !cache.prefecture.is_empty();
    if prefecture_known && keys.prefecture != cache.prefecture {
        return None;
    }

    let mut components = vec![ScoreComponent {
        name: "base",
        value: weights.base,
    }];
    let mut postal_match = false;

    if let Some(keyword) = &keys.keyword_upper
        && cache.id_upper.contains(keyword)
    {
        components.push(ScoreComponent {
            name: "keyword in identifier",
            value: weights.id_keyword,
        });
    }

    if !keys.variants.is_empty() {
        if variants_match(&keys.variants, &cache.short_variants) {
            components.push(ScoreComponent {
                name: "short name match",
                value: weights.short_name,
            });
        } else if variants_match(&keys.variants, &cache.full_variants) {
            components.push(ScoreComponent {
                name: "full name match",
                value: weights.full_name,
            });
        } else if !cache.short_variants.is_empty() || !cache.full_variants.is_empty() {
            // Penalized, not just unscored: address-only agreement must not
            // outrank a strong name mismatch unless overwhelming.
            components.push(ScoreComponent {
                name: "name mismatch",
                value: weights.name_miss,
            });
        }
    }

    if prefecture_known {
        components.push(ScoreComponent {
            name: "prefecture match",
            value: weights.prefecture,
        });
    }

    if !keys.city.is_empty() && !cache.city.is_empty() {
        if keys.city == cache.city {
            components.push(ScoreComponent {
                name: "city match",
                value: weights.city,
            });
        } else {
            components.push(ScoreComponent {
                name: "city mismatch",
                value: weights.city_mismatch,
            });
        }
    }

    if !keys.postal.is_empty() && !cache.postal.is_empty() {
        if keys.postal == cache.postal {
            postal_match = true;
            components.push(ScoreComponent {
                name: "postal match",
                value: weights.postal_exact,
            });
        } else if keys.postal.len() >= 3
            && cache.postal.len() >= 3
            && keys.postal[..3] == cache.postal[..3]
        {
            components.push(ScoreComponent {
                name: "postal prefix match",
                value: weights.postal_prefix,
            });
        }
    }

    let shared_tokens = keys.tokens.intersection(&cache.tokens).count();
    if shared_tokens > 0 {
        components.push(ScoreComponent {
            name: "shared address tokens",
            value: weights.address_token * shared_tokens as f64,
        });
    }

    if let Some(hint) = query.class_hint
        && hint == record.class
    {
        components.push(ScoreComponent {
            name: "facility class match",
            value: weights.class_hint,
        });
    }

    let score = components.iter().map(|c| c.value).sum();
    Some(MatchCandidate {
        facility: record,
        score,
        postal_match,
        components,
    })
}

/// Whether any query variant matches any candidate variant: exact
/// equality, or substring containment in either direction with the
/// minimum-length guard.
fn variants_match(query: &[String], candidate: &[String]) -> bool {
    query
        .iter()
        .any(|q| candidate.iter().any(|c| variant_pair_matches(q, c)))
}

fn variant_pair_matches(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    let a_chars = a.chars().count();
    let b_chars = b.chars().count();
    (a_chars >= MIN_CONTAINMENT_CHARS && b_chars > a_chars && b.contains(a))
        || (b_chars >= MIN_CONTAINMENT_CHARS && a_chars > b_chars && a.contains(b))
}
