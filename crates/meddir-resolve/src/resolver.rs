//! The alias table and its resolution order.

use std::collections::HashMap;

use meddir_model::MasterRecord;
use meddir_normalize::{comparable_key, normalize_for_comparison};
use serde_json::Value;

/// Field names checked for a direct canonical-id reference.
const CANONICAL_ID_FIELDS: &[&str] = &["master_id", "masterId"];

/// Id-like field names checked, in order, after the canonical reference.
const ID_FIELDS: &[&str] = &["id", "item_id", "itemId", "code", "key", "legacy_key", "legacyKey"];

/// Field names carrying the item category.
const CATEGORY_FIELDS: &[&str] = &["category", "group", "分類"];

/// Field names carrying the item name.
const NAME_FIELDS: &[&str] = &["name", "title", "名称", "名前"];

/// Maps many alias keys to one canonical master record.
///
/// Every alias binds to at most one record at a time; registering a record
/// whose alias is already bound elsewhere overwrites the binding. That is
/// deliberate: migrations re-resolve over multiple passes and the last
/// registration is the freshest.
#[derive(Debug, Default)]
pub struct AliasResolver {
    records: Vec<MasterRecord>,
    aliases: HashMap<String, usize>,
}

impl AliasResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a master record, binding its canonical id, every explicit
    /// alias, the legacy comparable key, and any raw legacy key.
    pub fn register(&mut self, record: MasterRecord) {
        let slot = self.records.len();

        self.bind(&normalize_for_comparison(&record.id), slot);
        for alias in &record.aliases {
            self.bind(alias.trim(), slot);
            self.bind(&normalize_for_comparison(alias), slot);
        }
        if let Some(key) = comparable_key(&record.kind, &record.category, &record.name) {
            self.bind(&key, slot);
        }
        if let Some(legacy) = &record.legacy_key {
            self.bind(legacy.trim(), slot);
        }

        self.records.push(record);
    }

    /// Number of registered records, counting superseded registrations.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolves an import-time entry of arbitrary shape.
    ///
    /// Checks, in order: a direct canonical-id reference, the id-like
    /// field aliases, and finally the comparable key built from the
    /// entry's category and name. Returns `None` when nothing matches;
    /// callers treat that as "leave the entry unchanged". The entry is
    /// never mutated.
    pub fn resolve(&self, kind: &str, entry: &Value) -> Option<&MasterRecord> {
        for field in CANONICAL_ID_FIELDS {
            if let Some(found) = str_field(entry, field).and_then(|v| self.lookup(v)) {
                return Some(found);
            }
        }

        for field in ID_FIELDS {
            if let Some(found) = str_field(entry, field).and_then(|v| self.lookup(v)) {
                return Some(found);
            }
        }

        let category = first_field(entry, CATEGORY_FIELDS)?;
        let name = first_field(entry, NAME_FIELDS)?;
        let key = comparable_key(kind, category, name)?;
        self.lookup(&key)
    }

    fn bind(&mut self, key: &str, slot: usize) {
        if !key.is_empty() {
            self.aliases.insert(key.to_string(), slot);
        }
    }

    /// Looks an alias up by its raw trimmed form, then by its normalized
    /// form, so width and case variants of the same key still resolve.
    fn lookup(&self, raw: &str) -> Option<&MasterRecord> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Some(&slot) = self.aliases.get(trimmed) {
            return Some(&self.records[slot]);
        }
        let folded = normalize_for_comparison(trimmed);
        self.aliases.get(&folded).map(|&slot| &self.records[slot])
    }
}

fn str_field<'a>(entry: &'a Value, field: &str) -> Option<&'a str> {
    entry
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn first_field<'a>(entry: &'a Value, fields: &[&str]) -> Option<&'a str> {
    fields.iter().find_map(|field| str_field(entry, field))
}
