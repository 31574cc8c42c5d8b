//! Mapping templates and the interpreter that resolves them.
//!
//! A template is a static tree describing the target record. Resolving it
//! against a [`FieldSource`] yields a [`SheetValue`] with the same shape,
//! every leaf replaced by its looked-up, normalized value.
//!
//! # Leaf kinds
//!
//! - [`Template::Literal`]: constant, used verbatim
//! - [`Template::Field`]: field-table lookup (see [`FieldRef`])
//! - [`Template::Computed`]: a function of the field table
//! - [`Template::Subtree`]: nested object, resolved entry by entry
//! - [`Template::ArrayOf`]: list of templates; falsy results are dropped
//!
//! After every node resolves, `"Off"` becomes `false` and `""` becomes null.

mod helpers;

pub use helpers::{
    boolean_field_to_int, lowercase_list, map_array, sum_proficiency_flags, Helper,
};

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use pcimport_domain::{FieldSource, ImportError, SheetValue};

/// Signature of a computed leaf.
pub type ComputeFn = dyn Fn(&dyn FieldSource) -> Result<SheetValue, ImportError> + Send + Sync;

/// How a field reference reads the table.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRef {
    /// Bare field name. Absent resolves to null; text is trimmed.
    Plain(String),
    /// Field name with a fallback. A falsy lookup resolves to `default`,
    /// or null when there is none. Text is not trimmed.
    WithDefault {
        name: String,
        default: Option<SheetValue>,
    },
}

impl FieldRef {
    fn resolve(&self, source: &dyn FieldSource) -> SheetValue {
        match self {
            FieldRef::Plain(name) => source.get(name).cloned().unwrap_or_default().trimmed(),
            FieldRef::WithDefault { name, default } => source
                .get(name)
                .filter(|value| value.is_truthy())
                .cloned()
                .or_else(|| default.clone())
                .unwrap_or_default(),
        }
    }
}

/// A computed leaf: a labelled pure function of the field table.
#[derive(Clone)]
pub struct Computed {
    label: String,
    func: Arc<ComputeFn>,
}

impl Computed {
    pub fn new<F>(label: impl Into<String>, func: F) -> Self
    where
        F: Fn(&dyn FieldSource) -> Result<SheetValue, ImportError> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            func: Arc::new(func),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Invoke the leaf. Errors are returned untouched.
    pub fn call(&self, source: &dyn FieldSource) -> Result<SheetValue, ImportError> {
        (self.func)(source)
    }
}

impl fmt::Debug for Computed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Computed").field("label", &self.label).finish()
    }
}

/// One node of a mapping template.
#[derive(Debug, Clone)]
pub enum Template {
    Literal(SheetValue),
    Field(FieldRef),
    Computed(Computed),
    Subtree(IndexMap<String, Template>),
    ArrayOf(Vec<Template>),
}

impl Template {
    pub fn literal(value: impl Into<SheetValue>) -> Self {
        Template::Literal(value.into())
    }

    pub fn null() -> Self {
        Template::Literal(SheetValue::Null)
    }

    /// An always-empty list (`[]` in the target record).
    pub fn empty_list() -> Self {
        Template::ArrayOf(Vec::new())
    }

    /// Bare field lookup: null when absent, text trimmed.
    pub fn field(name: impl Into<String>) -> Self {
        Template::Field(FieldRef::Plain(name.into()))
    }

    /// Field lookup falling back to `default` when the value is falsy.
    pub fn field_with_default(name: impl Into<String>, default: impl Into<SheetValue>) -> Self {
        Template::Field(FieldRef::WithDefault {
            name: name.into(),
            default: Some(default.into()),
        })
    }

    /// Field lookup falling back to null when the value is falsy. Not trimmed.
    pub fn field_ref(name: impl Into<String>) -> Self {
        Template::Field(FieldRef::WithDefault {
            name: name.into(),
            default: None,
        })
    }

    pub fn computed<F>(label: impl Into<String>, func: F) -> Self
    where
        F: Fn(&dyn FieldSource) -> Result<SheetValue, ImportError> + Send + Sync + 'static,
    {
        Template::Computed(Computed::new(label, func))
    }

    /// Bind a lookup strategy to a fixed list of field names.
    pub fn helper<I, S>(helper: Helper, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let label = format!("{}({})", helper.name(), names.join(", "));
        Template::computed(label, move |source| helper.apply(source, &names))
    }

    pub fn map_array<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::helper(Helper::MapArray, names)
    }

    pub fn lowercase_map_array<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::helper(Helper::LowercaseMapArray, names)
    }

    pub fn boolean_to_int(name: impl Into<String>) -> Self {
        Self::helper(Helper::BooleanToInt, [name.into()])
    }

    /// Proficiency rank from an (expertise, proficiency) flag pair.
    pub fn proficiency_rank(expertise: impl Into<String>, proficient: impl Into<String>) -> Self {
        Self::helper(Helper::ProficiencyRank, [expertise.into(), proficient.into()])
    }

    pub fn subtree<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Template)>,
        K: Into<String>,
    {
        Template::Subtree(
            entries
                .into_iter()
                .map(|(key, child)| (key.into(), child))
                .collect(),
        )
    }

    pub fn array(elements: impl IntoIterator<Item = Template>) -> Self {
        Template::ArrayOf(elements.into_iter().collect())
    }

    /// Resolve this template against `source`.
    pub fn resolve(&self, source: &dyn FieldSource) -> Result<SheetValue, ImportError> {
        resolve(self, source)
    }
}

/// Resolve `template` against `source`.
///
/// Pure with respect to the field table: the same inputs always produce the
/// same record. The only error source is a computed leaf; it is returned as
/// is so the caller can abort the import.
pub fn resolve(template: &Template, source: &dyn FieldSource) -> Result<SheetValue, ImportError> {
    let value = match template {
        Template::Literal(value) => value.clone(),
        Template::ArrayOf(elements) => {
            let mut kept = Vec::with_capacity(elements.len());
            for element in elements {
                let value = resolve(element, source)?;
                if value.is_truthy() {
                    kept.push(value);
                }
            }
            SheetValue::List(kept)
        }
        Template::Field(field) => field.resolve(source),
        Template::Computed(computed) => computed.call(source)?,
        Template::Subtree(children) => {
            let mut record = IndexMap::with_capacity(children.len());
            for (key, child) in children {
                record.insert(key.clone(), resolve(child, source)?);
            }
            SheetValue::Object(record)
        }
    };
    Ok(value.normalized())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcimport_domain::FieldTable;

    fn sample_table() -> FieldTable {
        FieldTable::from_pairs([
            ("AdvLog.PC Name", "  Ayla  "),
            ("Str", "16"),
            ("Str ST Prof", "True"),
            ("Inspiration", "Off"),
            ("Background", ""),
            ("Acr Exp", "Off"),
            ("Acr Prof", "True"),
        ])
    }

    #[test]
    fn literal_is_verbatim() {
        let table = FieldTable::new();
        assert_eq!(
            Template::literal("character").resolve(&table),
            Ok(SheetValue::from("character"))
        );
        assert_eq!(Template::literal(0).resolve(&table), Ok(SheetValue::Integer(0)));
        assert_eq!(Template::null().resolve(&table), Ok(SheetValue::Null));
    }

    #[test]
    fn plain_field_trims_and_defaults_to_null() {
        let table = sample_table();
        assert_eq!(
            Template::field("AdvLog.PC Name").resolve(&table),
            Ok(SheetValue::from("Ayla"))
        );
        assert_eq!(Template::field("Missing").resolve(&table), Ok(SheetValue::Null));
    }

    #[test]
    fn plain_field_with_single_space_becomes_null() {
        let table = FieldTable::from_pairs([("Speed", " ")]);
        assert_eq!(Template::field("Speed").resolve(&table), Ok(SheetValue::Null));
    }

    #[test]
    fn field_default_used_when_absent_or_falsy() {
        let table = sample_table();
        assert_eq!(
            Template::field_with_default("Missing", "dnd5e").resolve(&table),
            Ok(SheetValue::from("dnd5e"))
        );
        assert_eq!(
            Template::field_with_default("Background", 150).resolve(&table),
            Ok(SheetValue::Integer(150))
        );
        assert_eq!(
            Template::field_with_default("Str", "10").resolve(&table),
            Ok(SheetValue::from("16"))
        );
        assert_eq!(Template::field_ref("Missing").resolve(&table), Ok(SheetValue::Null));
    }

    #[test]
    fn field_default_is_not_trimmed() {
        let table = FieldTable::from_pairs([("Name", " Ayla ")]);
        assert_eq!(
            Template::field_ref("Name").resolve(&table),
            Ok(SheetValue::from(" Ayla "))
        );
    }

    #[test]
    fn off_becomes_false_and_empty_becomes_null() {
        let table = sample_table();
        assert_eq!(
            Template::field("Inspiration").resolve(&table),
            Ok(SheetValue::Boolean(false))
        );
        assert_eq!(Template::field("Background").resolve(&table), Ok(SheetValue::Null));
        assert_eq!(Template::literal("").resolve(&table), Ok(SheetValue::Null));
        assert_eq!(
            Template::literal("Off").resolve(&table),
            Ok(SheetValue::Boolean(false))
        );
    }

    #[test]
    fn array_drops_falsy_results() {
        let table = FieldTable::new();
        let template = Template::array([Template::literal(0), Template::literal("x")]);
        assert_eq!(
            template.resolve(&table),
            Ok(SheetValue::List(vec![SheetValue::from("x")]))
        );
    }

    #[test]
    fn array_drops_off_and_blank_fields() {
        let table = sample_table();
        let template = Template::array([
            Template::field("Inspiration"),
            Template::field("Background"),
            Template::field("Missing"),
            Template::field("Str"),
        ]);
        assert_eq!(
            template.resolve(&table),
            Ok(SheetValue::List(vec![SheetValue::from("16")]))
        );
    }

    #[test]
    fn empty_list_stays_a_list() {
        let table = FieldTable::new();
        assert_eq!(
            Template::empty_list().resolve(&table),
            Ok(SheetValue::List(vec![]))
        );
    }

    #[test]
    fn subtree_mirrors_template_shape() {
        let table = sample_table();
        let template = Template::subtree([
            ("name", Template::field("AdvLog.PC Name")),
            ("type", Template::literal("character")),
            (
                "abilities",
                Template::subtree([(
                    "str",
                    Template::subtree([
                        ("value", Template::field("Str")),
                        ("proficient", Template::boolean_to_int("Str ST Prof")),
                        ("prof", Template::literal(0)),
                    ]),
                )]),
            ),
        ]);

        let record = template.resolve(&table).expect("resolves");

        assert_eq!(record.pointer("name"), Some(&SheetValue::from("Ayla")));
        assert_eq!(record.pointer("type"), Some(&SheetValue::from("character")));
        assert_eq!(
            record.pointer("abilities.str.value"),
            Some(&SheetValue::from("16"))
        );
        assert_eq!(
            record.pointer("abilities.str.proficient"),
            Some(&SheetValue::Integer(1))
        );
        assert_eq!(
            record.pointer("abilities.str.prof"),
            Some(&SheetValue::Integer(0))
        );
        let keys: Vec<_> = record
            .as_object()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default();
        assert_eq!(keys, vec!["name", "type", "abilities"]);
    }

    #[test]
    fn computed_leaf_reads_the_table() {
        let table = sample_table();
        assert_eq!(
            Template::proficiency_rank("Acr Exp", "Acr Prof").resolve(&table),
            Ok(SheetValue::Integer(1))
        );

        let shouted = Template::computed("shout", |source| {
            Ok(source
                .get("Str")
                .and_then(SheetValue::as_str)
                .map(|s| format!("{s}!"))
                .into())
        });
        assert_eq!(shouted.resolve(&table), Ok(SheetValue::from("16!")));
    }

    #[test]
    fn computed_leaf_result_is_normalized() {
        let table = FieldTable::new();
        let template = Template::computed("off", |_| Ok(SheetValue::from("Off")));
        assert_eq!(template.resolve(&table), Ok(SheetValue::Boolean(false)));
    }

    #[test]
    fn computed_failure_propagates() {
        let table = sample_table();
        let template = Template::subtree([
            ("name", Template::field("AdvLog.PC Name")),
            (
                "broken",
                Template::computed("broken", |_| {
                    Err(ImportError::computation("broken", "template/data mismatch"))
                }),
            ),
        ]);

        assert_eq!(
            template.resolve(&table),
            Err(ImportError::computation("broken", "template/data mismatch"))
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        let table = sample_table();
        let template = Template::subtree([
            ("name", Template::field("AdvLog.PC Name")),
            ("langs", Template::map_array(["Str", "Missing"])),
            ("skill", Template::proficiency_rank("Acr Exp", "Acr Prof")),
        ]);

        let first = template.resolve(&table).expect("first pass");
        let second = template.resolve(&table).expect("second pass");
        assert_eq!(first, second);
    }

    #[test]
    fn computed_label_names_helper_and_fields() {
        match Template::boolean_to_int("Dex ST Prof") {
            Template::Computed(computed) => {
                assert_eq!(computed.label(), "boolean_field_to_int(Dex ST Prof)");
            }
            other => panic!("expected computed leaf, got {other:?}"),
        }
    }
}
