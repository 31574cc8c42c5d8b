//! Character import use case.
//!
//! Turns a field table into an actor record plus derived items for a given
//! source format, and optionally writes the result as JSON.

mod importer;

pub use importer::{ExportError, ImportResult, Importer};
