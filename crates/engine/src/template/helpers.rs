//! Lookup strategies used inside computed leaves.
//!
//! Each strategy is a plain function over a [`FieldSource`] so it can be
//! tested without a template. [`Helper`] wraps them with argument checking
//! for use as template leaves.

use pcimport_domain::{FieldSource, ImportError, SheetValue, CHECKBOX_OFF, CHECKBOX_ON};

/// Placeholder the PDF form uses for a blank list entry.
const BLANK_PLACEHOLDER: &str = " ";

/// Look up each name in order, keeping non-empty values that are not the
/// single-space placeholder.
pub fn map_array<S: AsRef<str>>(source: &dyn FieldSource, names: &[S]) -> Vec<SheetValue> {
    names
        .iter()
        .filter_map(|name| source.get(name.as_ref()))
        .filter(|value| value.is_truthy() && value.as_str() != Some(BLANK_PLACEHOLDER))
        .cloned()
        .collect()
}

/// Map a checkbox field to 0/1: `"True"` is 1, `"Off"`, absence, and anything else are 0.
pub fn boolean_field_to_int(source: &dyn FieldSource, name: &str) -> i64 {
    match source.get(name).and_then(SheetValue::as_str) {
        Some(CHECKBOX_OFF) => 0,
        Some(CHECKBOX_ON) => 1,
        _ => 0,
    }
}

/// Count how many of the named checkbox fields are `"True"`.
///
/// With an (expertise, proficiency) pair this yields the 0/1/2 proficiency
/// rank. The two flags are not checked for mutual exclusion.
pub fn sum_proficiency_flags<S: AsRef<str>>(source: &dyn FieldSource, names: &[S]) -> i64 {
    names
        .iter()
        .filter(|name| source.get(name.as_ref()).and_then(SheetValue::as_str) == Some(CHECKBOX_ON))
        .count() as i64
}

/// Lower-case every element of a list of text values.
///
/// A non-text element means the template was pointed at the wrong fields,
/// so it is an error rather than a silent skip.
pub fn lowercase_list(values: Vec<SheetValue>) -> Result<Vec<SheetValue>, ImportError> {
    values
        .into_iter()
        .map(|value| match value {
            SheetValue::String(text) => Ok(SheetValue::String(text.to_lowercase())),
            other => Err(ImportError::not_text("lowercase_list", &other)),
        })
        .collect()
}

/// Named lookup strategy bound to a fixed list of field names in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Helper {
    /// [`map_array`]
    MapArray,
    /// [`map_array`] followed by [`lowercase_list`]
    LowercaseMapArray,
    /// [`boolean_field_to_int`]; takes exactly one field name
    BooleanToInt,
    /// [`sum_proficiency_flags`]
    ProficiencyRank,
}

impl Helper {
    pub fn name(&self) -> &'static str {
        match self {
            Helper::MapArray => "map_array",
            Helper::LowercaseMapArray => "lowercase_map_array",
            Helper::BooleanToInt => "boolean_field_to_int",
            Helper::ProficiencyRank => "sum_proficiency_flags",
        }
    }

    /// Run the strategy against `source` with the names fixed at authoring time.
    pub fn apply(
        &self,
        source: &dyn FieldSource,
        names: &[String],
    ) -> Result<SheetValue, ImportError> {
        match self {
            Helper::MapArray => Ok(SheetValue::List(map_array(source, names))),
            Helper::LowercaseMapArray => {
                lowercase_list(map_array(source, names)).map(SheetValue::List)
            }
            Helper::BooleanToInt => match names {
                [name] => Ok(SheetValue::Integer(boolean_field_to_int(source, name))),
                _ => Err(ImportError::invalid_arguments(
                    self.name(),
                    format!("expected exactly 1 field name, got {}", names.len()),
                )),
            },
            Helper::ProficiencyRank => {
                Ok(SheetValue::Integer(sum_proficiency_flags(source, names)))
            }
        }
    }
}
