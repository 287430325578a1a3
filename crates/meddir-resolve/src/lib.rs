//! Alias-based master-key resolution for data migration.
//!
//! Historical exports referenced master items by raw ids, synonyms, and
//! legacy `kind:category|name` composite keys. The resolver binds every
//! such alias to one canonical [`MasterRecord`] and resolves arbitrary
//! import-entry payloads back to it. An unresolved entry is not an error;
//! callers leave it unchanged and re-resolve on a later migration pass.

pub mod resolver;

pub use resolver::AliasResolver;
