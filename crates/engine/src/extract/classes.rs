//! Class/level extraction.
//!
//! Structured exports name the class and level directly. Free-text exports
//! only carry a "Class Features" summary such as
//! `level 3: Feature (Fighter 1, Battle Master 3)`, which is parsed
//! heuristically. The first level-1 grant is taken as the base class, so
//! multi-classed characters only report their first class.

use std::sync::OnceLock;

use indexmap::IndexSet;
use pcimport_domain::{FieldSource, ImportError, ItemRecord, SheetValue};

/// Structured export field holding the first class name.
pub const STRUCTURED_CLASS_NAME_FIELD: &str = "classes.id-00001.name";

/// Structured export field holding the first class level.
pub const STRUCTURED_CLASS_LEVEL_FIELD: &str = "classes.id-00001.level";

/// Free-text field summarizing the features gained per level.
pub const CLASS_FEATURES_FIELD: &str = "Class Features";

/// Highest character level a level marker may carry.
const MAX_CHARACTER_LEVEL: u8 = 20;

// Static regex patterns for the class features summary (compiled once)
static LEVEL_REGEX: OnceLock<regex_lite::Regex> = OnceLock::new();
static BASE_CLASS_REGEX: OnceLock<regex_lite::Regex> = OnceLock::new();
static LEVEL_MARKER_REGEX: OnceLock<regex_lite::Regex> = OnceLock::new();

fn level_regex() -> &'static regex_lite::Regex {
    LEVEL_REGEX.get_or_init(|| {
        regex_lite::Regex::new(r"level ([0-9]+):").expect("LEVEL_REGEX pattern is invalid")
    })
}

fn base_class_regex() -> &'static regex_lite::Regex {
    BASE_CLASS_REGEX.get_or_init(|| {
        regex_lite::Regex::new(r"\(([A-Za-z]+) 1[^0-9]")
            .expect("BASE_CLASS_REGEX pattern is invalid")
    })
}

fn level_marker_regex() -> &'static regex_lite::Regex {
    LEVEL_MARKER_REGEX.get_or_init(|| {
        regex_lite::Regex::new(r"[(,]\s*([A-Za-z][A-Za-z ]*) (\d{1,2})\b")
            .expect("LEVEL_MARKER_REGEX pattern is invalid")
    })
}

/// What the class features summary yields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassFeatures {
    /// First `level N:` marker.
    pub level: Option<String>,
    /// Names granting a feature at level 1, first-seen order.
    pub base_classes: IndexSet<String>,
    /// Names with any level marker that are not base classes, first-seen order.
    pub subclasses: IndexSet<String>,
}

impl ClassFeatures {
    /// The single class record the summary describes, if the heuristic found
    /// both a level and a base class.
    pub fn to_item(&self) -> Option<ItemRecord> {
        let level = self.level.clone()?;
        let name = self.base_classes.first()?;
        Some(ItemRecord::class(
            name.clone(),
            Some(level),
            self.subclasses.first().cloned(),
        ))
    }
}

/// Parse a class features summary.
pub fn parse_class_features(text: &str) -> ClassFeatures {
    let level = level_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    let base_classes: IndexSet<String> = base_class_regex()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect();

    let subclasses = level_marker_regex()
        .captures_iter(text)
        .filter(|caps| {
            caps.get(2)
                .and_then(|m| m.as_str().parse::<u8>().ok())
                .is_some_and(|level| (1..=MAX_CHARACTER_LEVEL).contains(&level))
        })
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !base_classes.contains(name))
        .collect();

    ClassFeatures {
        level,
        base_classes,
        subclasses,
    }
}

/// Class record from the free-text summary; empty when the heuristic misses.
pub fn free_text_class(source: &dyn FieldSource) -> Result<Vec<ItemRecord>, ImportError> {
    let Some(text) = source.get(CLASS_FEATURES_FIELD).and_then(SheetValue::as_str) else {
        return Ok(Vec::new());
    };
    Ok(parse_class_features(text).to_item().into_iter().collect())
}

/// Class record read from the structured export. The subclass is never
/// present in that export.
pub fn structured_class(source: &dyn FieldSource) -> Result<Vec<ItemRecord>, ImportError> {
    let name = source
        .get(STRUCTURED_CLASS_NAME_FIELD)
        .and_then(SheetValue::to_text)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());
    let Some(name) = name else {
        return Ok(Vec::new());
    };

    let levels = source
        .get(STRUCTURED_CLASS_LEVEL_FIELD)
        .and_then(SheetValue::to_text)
        .map(|level| level.trim().to_string())
        .filter(|level| !level.is_empty());

    Ok(vec![ItemRecord::class(name, levels, None)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcimport_domain::{FieldTable, ItemKind};

    const FIGHTER_FEATURES: &str = "level 3: Feature (Fighter 1, Battle Master 3)\n\
        Second Wind (Fighter 1…\n\
        Action Surge (Fighter 2, PHB 72)";

    #[test]
    fn parses_level_base_class_and_subclass() {
        let features = parse_class_features(FIGHTER_FEATURES);

        assert_eq!(features.level.as_deref(), Some("3"));
        assert_eq!(features.base_classes.first().map(String::as_str), Some("Fighter"));
        assert_eq!(features.base_classes.len(), 1);
        assert_eq!(
            features.subclasses.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["Battle Master"]
        );
    }

    #[test]
    fn first_level_marker_wins() {
        let features = parse_class_features("level 5: Extra Attack (Fighter 5)\nlevel 4: ASI");
        assert_eq!(features.level.as_deref(), Some("5"));
    }

    #[test]
    fn page_references_are_not_subclasses() {
        let features = parse_class_features("level 1: Rage (Barbarian 1, PHB 48)");
        assert!(features.subclasses.is_empty());
    }

    #[test]
    fn short_page_reference_trails_the_real_subclass() {
        let features = parse_class_features(
            "level 3: Rage (Barbarian 1, PHB 48)\n\
             Ancestral Protectors (Path of the Ancestral Guardian 3, XGtE 9)",
        );

        // Low page numbers pass the level filter but only follow the subclass
        assert_eq!(
            features.subclasses.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["Path of the Ancestral Guardian", "XGtE"]
        );
        assert_eq!(
            features.to_item(),
            Some(ItemRecord::class(
                "Barbarian",
                Some("3".to_string()),
                Some("Path of the Ancestral Guardian".to_string())
            ))
        );
    }

    #[test]
    fn multiclass_takes_first_base_class() {
        let features =
            parse_class_features("level 4: (Wizard 1, PHB 114) (Cleric 1, PHB 56) (Life Domain 1)");
        assert_eq!(features.base_classes.first().map(String::as_str), Some("Wizard"));
        assert_eq!(
            features.to_item().and_then(|item| item.subclass),
            Some("Life Domain".to_string())
        );
    }

    #[test]
    fn free_text_class_emits_one_record() {
        let table = FieldTable::from_pairs([(CLASS_FEATURES_FIELD, FIGHTER_FEATURES)]);

        let items = free_text_class(&table).expect("extraction succeeds");
        assert_eq!(
            items,
            vec![ItemRecord::class(
                "Fighter",
                Some("3".to_string()),
                Some("Battle Master".to_string())
            )]
        );
    }

    #[test]
    fn free_text_class_misses_are_empty() {
        let missing = FieldTable::new();
        assert!(free_text_class(&missing).expect("no error").is_empty());

        let no_level = FieldTable::from_pairs([(CLASS_FEATURES_FIELD, "(Fighter 1, PHB 72)")]);
        assert!(free_text_class(&no_level).expect("no error").is_empty());

        let no_class = FieldTable::from_pairs([(CLASS_FEATURES_FIELD, "level 2: nothing here")]);
        assert!(free_text_class(&no_class).expect("no error").is_empty());
    }

    #[test]
    fn structured_class_reads_name_and_level() {
        let mut table = FieldTable::new();
        table.insert(STRUCTURED_CLASS_NAME_FIELD, "Rogue");
        table.insert(STRUCTURED_CLASS_LEVEL_FIELD, 5);

        let items = structured_class(&table).expect("extraction succeeds");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, ItemKind::Class);
        assert_eq!(items[0].name, "Rogue");
        assert_eq!(items[0].levels.as_deref(), Some("5"));
        assert_eq!(items[0].subclass, None);
    }

    #[test]
    fn structured_class_without_name_is_empty() {
        let table = FieldTable::from_pairs([(STRUCTURED_CLASS_LEVEL_FIELD, "5")]);
        assert!(structured_class(&table).expect("no error").is_empty());
    }
}
