//! Sheet values - the scalar and nested values that flow through an import.
//!
//! Field tables hold scalar `SheetValue`s; resolved output records are
//! nested `SheetValue::Object`s whose shape mirrors the mapping template.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Literal an unchecked checkbox is exported as.
pub const CHECKBOX_OFF: &str = "Off";

/// Literal a checked checkbox is exported as.
pub const CHECKBOX_ON: &str = "True";

/// A value read from a field table or produced by the interpreter.
///
/// Serializes untagged so an output record is plain JSON for the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum SheetValue {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<SheetValue>),
    Object(IndexMap<String, SheetValue>),
}

impl SheetValue {
    /// Build an empty object value.
    pub fn object() -> Self {
        SheetValue::Object(IndexMap::new())
    }

    /// Truthiness as the upstream exports define it.
    ///
    /// Null, `false`, zero, NaN, and the empty string are falsy. Empty lists
    /// and empty objects are truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            SheetValue::Null => false,
            SheetValue::Boolean(value) => *value,
            SheetValue::Integer(value) => *value != 0,
            SheetValue::Float(value) => *value != 0.0 && !value.is_nan(),
            SheetValue::String(value) => !value.is_empty(),
            SheetValue::List(_) | SheetValue::Object(_) => true,
        }
    }

    /// Collapse the export's inconsistent empty markers.
    ///
    /// `"Off"` becomes `false` and `""` becomes null; everything else is
    /// returned unchanged.
    pub fn normalized(self) -> Self {
        match self {
            SheetValue::String(ref value) if value == CHECKBOX_OFF => SheetValue::Boolean(false),
            SheetValue::String(ref value) if value.is_empty() => SheetValue::Null,
            other => other,
        }
    }

    /// Strip leading and trailing whitespace from text; other values pass through.
    pub fn trimmed(self) -> Self {
        match self {
            SheetValue::String(value) => {
                let trimmed = value.trim();
                if trimmed.len() == value.len() {
                    SheetValue::String(value)
                } else {
                    SheetValue::String(trimmed.to_string())
                }
            }
            other => other,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SheetValue::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, SheetValue>> {
        match self {
            SheetValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a dotted path inside nested objects (e.g. `"data.abilities.str.value"`).
    pub fn pointer(&self, path: &str) -> Option<&SheetValue> {
        path.split('.').try_fold(self, |current, key| match current {
            SheetValue::Object(map) => map.get(key),
            _ => None,
        })
    }

    /// Render a scalar as text, the way the host displays it.
    ///
    /// Returns `None` for null, lists, and objects.
    pub fn to_text(&self) -> Option<String> {
        match self {
            SheetValue::String(value) => Some(value.clone()),
            SheetValue::Integer(value) => Some(value.to_string()),
            SheetValue::Float(value) => Some(value.to_string()),
            SheetValue::Boolean(value) => Some(value.to_string()),
            SheetValue::Null | SheetValue::List(_) | SheetValue::Object(_) => None,
        }
    }
}

impl From<&str> for SheetValue {
    fn from(value: &str) -> Self {
        SheetValue::String(value.to_string())
    }
}

impl From<String> for SheetValue {
    fn from(value: String) -> Self {
        SheetValue::String(value)
    }
}

impl From<i64> for SheetValue {
    fn from(value: i64) -> Self {
        SheetValue::Integer(value)
    }
}

impl From<i32> for SheetValue {
    fn from(value: i32) -> Self {
        SheetValue::Integer(value.into())
    }
}

impl From<f64> for SheetValue {
    fn from(value: f64) -> Self {
        SheetValue::Float(value)
    }
}

impl From<bool> for SheetValue {
    fn from(value: bool) -> Self {
        SheetValue::Boolean(value)
    }
}

impl From<Vec<SheetValue>> for SheetValue {
    fn from(values: Vec<SheetValue>) -> Self {
        SheetValue::List(values)
    }
}

impl<T: Into<SheetValue>> From<Option<T>> for SheetValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SheetValue::Null, Into::into)
    }
}

impl From<&serde_json::Value> for SheetValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => SheetValue::Null,
            serde_json::Value::Bool(value) => SheetValue::Boolean(*value),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(integer) => SheetValue::Integer(integer),
                None => number
                    .as_f64()
                    .map_or(SheetValue::Null, SheetValue::Float),
            },
            serde_json::Value::String(value) => SheetValue::String(value.clone()),
            serde_json::Value::Array(values) => {
                SheetValue::List(values.iter().map(SheetValue::from).collect())
            }
            serde_json::Value::Object(map) => SheetValue::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), SheetValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&SheetValue> for serde_json::Value {
    fn from(value: &SheetValue) -> Self {
        match value {
            SheetValue::Null => serde_json::Value::Null,
            SheetValue::Boolean(value) => serde_json::Value::Bool(*value),
            SheetValue::Integer(value) => serde_json::Value::from(*value),
            SheetValue::Float(value) => serde_json::Number::from_f64(*value)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            SheetValue::String(value) => serde_json::Value::String(value.clone()),
            SheetValue::List(values) => {
                serde_json::Value::Array(values.iter().map(serde_json::Value::from).collect())
            }
            SheetValue::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), serde_json::Value::from(value)))
                    .collect(),
            ),
        }
    }
}
