//! Text normalization primitives for facility matching.
//!
//! Pure, total functions shared by ingestion, matching and alias
//! resolution: comparison-key normalization, fuzzy script folding,
//! tokenization, corporate-designator stripping, name-variant generation,
//! legacy comparable keys and an auxiliary Jaro-Winkler primitive. No I/O
//! happens anywhere in this crate.

pub mod compare;
pub mod designators;
pub mod keys;
pub mod similarity;
pub mod tokens;

pub use compare::{normalize_for_comparison, normalize_fuzzy};
pub use designators::{name_variants, strip_corporate_designators};
pub use keys::comparable_key;
pub use similarity::jaro_winkler;
pub use tokens::tokenize;
