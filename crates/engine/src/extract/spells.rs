//! Spell-list extraction.
//!
//! The form export repeats its spell sheet in front/back sections whose
//! field names look like `P1.SSfront.spells.name`. Every section is queried
//! and spell names are collapsed to one record each, in first-seen order.

use indexmap::IndexSet;
use pcimport_domain::{FieldSource, ImportError, ItemRecord, Regex, SheetValue};

/// Field-name pattern of the repeated spell-sheet name columns.
pub const SPELL_NAME_PATTERN: &str = r"\.SS[a-zA-Z]+\.spells\.name";

/// One spell record per unique, non-blank value of fields matching `pattern`.
pub fn spell_names_matching(
    source: &dyn FieldSource,
    pattern: &str,
) -> Result<Vec<ItemRecord>, ImportError> {
    let pattern = Regex::new(pattern)?;

    let names: IndexSet<String> = source
        .query_by_pattern(&pattern)
        .into_iter()
        .filter_map(SheetValue::to_text)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();

    Ok(names.into_iter().map(ItemRecord::spell).collect())
}

/// Known spells from the form export's spell sheets.
pub fn spell_list(source: &dyn FieldSource) -> Result<Vec<ItemRecord>, ImportError> {
    spell_names_matching(source, SPELL_NAME_PATTERN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcimport_domain::FieldTable;

    fn names(items: &[ItemRecord]) -> Vec<&str> {
        items.iter().map(|item| item.name.as_str()).collect()
    }

    #[test]
    fn duplicate_spells_collapse() {
        let table = FieldTable::from_pairs([
            ("P1.SSfront.spells.name", "Fireball"),
            ("P2.SSmore.spells.name", "Fireball"),
            ("P3.SSfront.spells.name", "Shield"),
        ]);

        let items = spell_list(&table).expect("extraction succeeds");
        assert_eq!(names(&items), vec!["Fireball", "Shield"]);
    }

    #[test]
    fn blank_rows_and_other_fields_are_ignored() {
        let table = FieldTable::from_pairs([
            ("P1.SSfront.spells.name", " "),
            ("P1.SSfront.spells.remember", "Mage Armor"),
            ("Spell save DC 1", "14"),
            ("P2.SSfront.spells.name", " Mage Hand "),
            ("P3.SSfront.spells.name", ""),
        ]);

        let items = spell_list(&table).expect("extraction succeeds");
        assert_eq!(names(&items), vec!["Mage Hand"]);
    }

    #[test]
    fn no_spell_sheet_yields_nothing() {
        let table = FieldTable::from_pairs([("Str", "16")]);
        assert!(spell_list(&table).expect("no error").is_empty());
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let table = FieldTable::new();
        let result = spell_names_matching(&table, "(unclosed");
        assert!(matches!(result, Err(ImportError::InvalidPattern(_))));
    }
}
