//! Use cases - import orchestration.
//!
//! Each module contains the use cases for one step of an import.

pub mod import;
pub mod matching;

pub use import::{ExportError, ImportResult, Importer};
pub use matching::{ItemMatcher, MatchOutcome, PackIndexCache};
