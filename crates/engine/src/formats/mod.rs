//! Import formats.
//!
//! A format pairs a mapping template with the extractors that run after it.
//! Adding a source format means authoring a new pair and registering it; the
//! interpreter is never touched.

mod actor5e;
pub mod fantasy_grounds;
pub mod mpmb;

use std::sync::Arc;

use crate::extract::Extractor;
use crate::template::Template;

/// One supported source format.
#[derive(Debug, Clone)]
pub struct ImportFormat {
    /// Identifier used in configuration (e.g. `"mpmb"`).
    pub id: &'static str,
    /// Human-readable name.
    pub display_name: &'static str,
    /// Template describing the actor record.
    pub template: Template,
    /// Extractors run in order after the template pass.
    pub extractors: Vec<Extractor>,
}

/// Registry of available import formats.
pub struct FormatRegistry {
    formats: Vec<Arc<ImportFormat>>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatRegistry {
    /// Create a new registry with all built-in formats.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(mpmb::format()));
        registry.register(Arc::new(fantasy_grounds::format()));
        registry
    }

    /// Create an empty registry without built-in formats.
    pub fn empty() -> Self {
        Self {
            formats: Vec::new(),
        }
    }

    /// Register a format. Lookups return the first format registered under an id.
    pub fn register(&mut self, format: Arc<ImportFormat>) {
        self.formats.push(format);
    }

    /// Get a format by its ID.
    pub fn get(&self, format_id: &str) -> Option<Arc<ImportFormat>> {
        self.formats.iter().find(|f| f.id == format_id).cloned()
    }

    /// List all registered format IDs.
    pub fn list_formats(&self) -> Vec<&str> {
        self.formats.iter().map(|f| f.id).collect()
    }

    /// List all registered formats with their display names.
    pub fn list_formats_with_names(&self) -> Vec<(&str, &str)> {
        self.formats
            .iter()
            .map(|f| (f.id, f.display_name))
            .collect()
    }
}
