//! Post-processing extractors.
//!
//! Extractors run after the template pass against the same field table and
//! derive item records that a plain lookup cannot express. A heuristic miss
//! yields an empty list; only a malformed extractor (bad pattern) errors.

pub mod classes;
pub mod spells;

use std::fmt;

use pcimport_domain::{FieldSource, ImportError, ItemRecord};

pub use classes::{free_text_class, parse_class_features, structured_class, ClassFeatures};
pub use spells::{spell_list, spell_names_matching};

/// Signature every extractor implements.
pub type ExtractFn = fn(&dyn FieldSource) -> Result<Vec<ItemRecord>, ImportError>;

/// A named extractor attached to an import format.
#[derive(Clone, Copy)]
pub struct Extractor {
    pub name: &'static str,
    run: ExtractFn,
}

impl Extractor {
    pub const fn new(name: &'static str, run: ExtractFn) -> Self {
        Self { name, run }
    }

    pub fn run(&self, source: &dyn FieldSource) -> Result<Vec<ItemRecord>, ImportError> {
        (self.run)(source)
    }
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor").field("name", &self.name).finish()
    }
}

/// Class level from a structured export.
pub const STRUCTURED_CLASS: Extractor = Extractor::new("structured_class", structured_class);

/// Class level parsed from the free-text class features field.
pub const FREE_TEXT_CLASS: Extractor = Extractor::new("free_text_class", free_text_class);

/// Known spells enumerated from the repeated spell-sheet sections.
pub const SPELL_LIST: Extractor = Extractor::new("spell_list", spell_list);
