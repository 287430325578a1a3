//! Facility identity matching.
//!
//! Ranks reference facilities against an application-side clinic record
//! using normalized name-variant overlap and locale signals. The pool
//! memoizes per-record search caches, so preparing a large reference
//! dataset is paid once and every later query is cache-hit only.
//!
//! # Usage
//!
//! ```ignore
//! use meddir_match::{DEFAULT_MATCH_LIMIT, FacilityPool, match_facilities};
//! use meddir_model::QueryRecord;
//!
//! let pool = FacilityPool::new(records);
//! let query = QueryRecord::named("いしい内科クリニック").with_prefecture("東京都");
//! let ranked = match_facilities(&query, &pool, DEFAULT_MATCH_LIMIT);
//! ```

pub mod cache;
pub mod score;

pub use cache::{FacilityPool, SearchCache};
pub use score::{
    DEFAULT_MATCH_LIMIT, MatchCandidate, MatchWeights, ScoreComponent, match_facilities,
    match_facilities_with,
};
