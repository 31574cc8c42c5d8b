//! Item records - derived sub-entities (class levels, known spells).
//!
//! Extractors produce these once per import run; the matching layer looks
//! each one up in a compendium and never mutates it.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// Value written into every generated item's `data.source`.
pub const ITEM_SOURCE: &str = "PC Importer";

/// Default icon for generated class items.
pub const CLASS_ITEM_IMG: &str = "systems/dnd5e/icons/skills/blue_13.jpg";

/// Kind of derived item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Class,
    Spell,
}

impl ItemKind {
    /// The host's item type string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Class => "class",
            ItemKind::Spell => "spell",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One derived item.
///
/// `levels` and `subclass` are only meaningful for class items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: String,
    pub kind: ItemKind,
    #[serde(default)]
    pub levels: Option<String>,
    #[serde(default)]
    pub subclass: Option<String>,
}

impl ItemRecord {
    pub fn class(
        name: impl Into<String>,
        levels: Option<String>,
        subclass: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Class,
            levels,
            subclass,
        }
    }

    pub fn spell(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Spell,
            levels: None,
            subclass: None,
        }
    }

    /// The host item-data shape for this record, used when no compendium
    /// entry matched and the item is created from scratch.
    pub fn to_item_data(&self) -> serde_json::Value {
        match self.kind {
            ItemKind::Class => json!({
                "name": self.name,
                "type": self.kind.as_str(),
                "img": CLASS_ITEM_IMG,
                "data": {
                    "description": {"value": "", "chat": "", "unidentified": ""},
                    "source": ITEM_SOURCE,
                    "levels": self.levels,
                    "subclass": self.subclass,
                    "hitDice": null,
                    "hitDiceUsed": 0,
                    "skills": {},
                    "spellcasting": null,
                    "damage": {"parts": []}
                }
            }),
            ItemKind::Spell => json!({
                "flags": {},
                "name": self.name,
                "type": self.kind.as_str(),
                "img": null,
                "data": {}
            }),
        }
    }
}
