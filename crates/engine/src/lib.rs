//! PC Importer engine library.
//!
//! Converts character-sheet exports into dnd5e actor records.
//!
//! ## Structure
//!
//! - `template/` - Mapping templates and the interpreter that resolves them
//! - `extract/` - Post-processing extractors for derived items
//! - `formats/` - Template + extractor pairs per source format
//! - `use_cases/` - Import orchestration and compendium matching
//! - `infrastructure/` - Ports and file-backed adapters
//! - `config` - Environment configuration

pub mod config;
pub mod extract;
pub mod formats;
pub mod infrastructure;
pub mod template;
pub mod use_cases;

pub use config::{ImporterConfig, ItemPackConfig};
pub use formats::{FormatRegistry, ImportFormat};
pub use template::{resolve, Template};
pub use use_cases::{ImportResult, Importer, ItemMatcher, MatchOutcome, PackIndexCache};
