//! Field tables - the flat name-to-value lookup an upstream export is parsed into.
//!
//! The interpreter and the extractors only ever read through [`FieldSource`];
//! [`FieldTable`] is the in-memory provider the engine builds from an export.

use indexmap::IndexMap;
use regex_lite::Regex;

use crate::value::SheetValue;

/// Read-only query surface over a field table.
///
/// Both operations must be pure and return stable results for the lifetime
/// of one import run.
pub trait FieldSource: Send + Sync {
    /// Exact key lookup. `None` means the field is absent.
    fn get(&self, name: &str) -> Option<&SheetValue>;

    /// Values of every field whose name matches `pattern`, in table order.
    ///
    /// Duplicated values are preserved.
    fn query_by_pattern(&self, pattern: &Regex) -> Vec<&SheetValue>;
}

/// Insertion-ordered field table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldTable {
    values: IndexMap<String, SheetValue>,
}

impl FieldTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, value)` pairs, keeping their order.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<SheetValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut table = Self::new();
        for (name, value) in pairs {
            table.insert(name, value);
        }
        table
    }

    /// Flatten a nested JSON export into dotted field names.
    ///
    /// Objects contribute their keys and arrays their indices as path
    /// segments, so `{"classes": {"id-00001": {"name": "Fighter"}}}` yields
    /// `classes.id-00001.name`. Only scalars end up as values.
    pub fn from_json(root: &serde_json::Value) -> Self {
        let mut table = Self::new();
        flatten_into(&mut table, String::new(), root);
        table
    }

    /// Insert or replace a field. A replaced field keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<SheetValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Field names in table order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Text value of a field, if it holds text.
    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(SheetValue::as_str)
    }
}

impl FieldSource for FieldTable {
    fn get(&self, name: &str) -> Option<&SheetValue> {
        self.values.get(name)
    }

    fn query_by_pattern(&self, pattern: &Regex) -> Vec<&SheetValue> {
        self.values
            .iter()
            .filter(|(name, _)| pattern.is_match(name))
            .map(|(_, value)| value)
            .collect()
    }
}

fn flatten_into(table: &mut FieldTable, prefix: String, value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, child) in map {
                flatten_into(table, join_path(&prefix, key), child);
            }
        }
        serde_json::Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(table, join_path(&prefix, &index.to_string()), child);
            }
        }
        scalar => {
            if !prefix.is_empty() {
                table.insert(prefix, SheetValue::from(scalar));
            }
        }
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
