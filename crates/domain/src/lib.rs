//! PC Importer domain types.
//!
//! Vocabulary shared by the template interpreter, the format-specific
//! extractors, and the item-matching layer. Nothing in this crate performs
//! I/O.

pub mod dnd5e;
pub mod error;
pub mod field_table;
pub mod item;
pub mod value;

pub use error::ImportError;
pub use field_table::{FieldSource, FieldTable};
pub use item::{ItemKind, ItemRecord};
pub use value::{SheetValue, CHECKBOX_OFF, CHECKBOX_ON};

// Re-exported so providers and callers name the same pattern type
pub use regex_lite::Regex;
