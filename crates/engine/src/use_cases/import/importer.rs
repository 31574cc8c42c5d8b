//! Import orchestration: template pass, then extractors.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pcimport_domain::{FieldSource, ImportError, ItemKind, ItemRecord, SheetValue};
use serde::Serialize;
use thiserror::Error;
use tokio::fs;

use crate::formats::ImportFormat;

/// File name used when the actor has no name.
const UNNAMED_ACTOR: &str = "unnamed";

/// Errors that can occur while exporting an import result.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Actor record and derived items from one import run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportResult {
    pub format_id: String,
    pub actor: SheetValue,
    pub items: Vec<ItemRecord>,
}

impl ImportResult {
    /// The resolved actor name, if the export had one.
    pub fn actor_name(&self) -> Option<&str> {
        self.actor.pointer("name").and_then(SheetValue::as_str)
    }

    /// Number of derived items of `kind`.
    pub fn count(&self, kind: ItemKind) -> usize {
        self.items.iter().filter(|item| item.kind == kind).count()
    }

    /// File name the export is written under: `fvtt-<name>.json`.
    pub fn export_file_name(&self) -> String {
        let name: String = self
            .actor_name()
            .unwrap_or(UNNAMED_ACTOR)
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '\0' => '_',
                other => other,
            })
            .collect();
        format!("fvtt-{name}.json")
    }

    /// Pretty JSON with the actor record and the host shape of every item.
    pub fn to_json(&self) -> Result<String, ExportError> {
        let items: Vec<serde_json::Value> =
            self.items.iter().map(ItemRecord::to_item_data).collect();
        let document = serde_json::json!({
            "actor": serde_json::Value::from(&self.actor),
            "items": items,
        });
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Write [`Self::to_json`] into `dir` and return the file path.
    pub async fn export_to_json(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(self.export_file_name());
        fs::write(&path, self.to_json()?).await?;
        tracing::info!(path = %path.display(), "Exported import result");
        Ok(path)
    }
}

/// Runs one import format against a field table.
#[derive(Debug, Clone)]
pub struct Importer {
    format: Arc<ImportFormat>,
}

impl Importer {
    pub fn new(format: Arc<ImportFormat>) -> Self {
        Self { format }
    }

    /// Resolve the actor template, then run every extractor in order.
    ///
    /// A computed-leaf failure aborts the whole import; nothing partial is
    /// returned.
    pub fn run(&self, source: &dyn FieldSource) -> Result<ImportResult, ImportError> {
        tracing::info!(format = %self.format.id, "Starting import");

        let actor = self.format.template.resolve(source).inspect_err(|e| {
            tracing::error!(format = %self.format.id, error = %e, "Actor template failed");
        })?;

        let mut items = Vec::new();
        for extractor in &self.format.extractors {
            let extracted = extractor.run(source)?;
            tracing::debug!(
                extractor = extractor.name,
                items = extracted.len(),
                "Extractor finished"
            );
            items.extend(extracted);
        }

        let result = ImportResult {
            format_id: self.format.id.to_string(),
            actor,
            items,
        };
        tracing::info!(
            format = %self.format.id,
            actor = result.actor_name().unwrap_or(UNNAMED_ACTOR),
            items = result.items.len(),
            "Import complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{Extractor, FREE_TEXT_CLASS, SPELL_LIST};
    use crate::formats::FormatRegistry;
    use crate::template::Template;
    use pcimport_domain::FieldTable;

    fn mpmb_sheet() -> FieldTable {
        FieldTable::from_pairs([
            ("AdvLog.PC Name", "Brakka"),
            ("Str", "16"),
            (
                "Class Features",
                "level 3: Combat Superiority (Fighter 1, Battle Master 3)\nSecond Wind (Fighter 1, PHB 72)",
            ),
            ("P1.SSfront.spells.name", "Fireball"),
            ("P2.SSmore.spells.name", "Fireball"),
            ("P3.SSfront.spells.name", "Shield"),
        ])
    }

    fn mpmb_importer() -> Importer {
        let format = FormatRegistry::new().get("mpmb").expect("mpmb registered");
        Importer::new(format)
    }

    #[test]
    fn runs_template_then_extractors() {
        let result = mpmb_importer().run(&mpmb_sheet()).expect("import succeeds");

        assert_eq!(result.format_id, "mpmb");
        assert_eq!(result.actor_name(), Some("Brakka"));
        assert_eq!(
            result.items,
            vec![
                ItemRecord::class(
                    "Fighter",
                    Some("3".to_string()),
                    Some("Battle Master".to_string())
                ),
                ItemRecord::spell("Fireball"),
                ItemRecord::spell("Shield"),
            ]
        );
        assert_eq!(result.count(ItemKind::Class), 1);
        assert_eq!(result.count(ItemKind::Spell), 2);
    }

    #[test]
    fn extractor_miss_still_imports_actor() {
        let table = FieldTable::from_pairs([("AdvLog.PC Name", "Nobody")]);
        let result = mpmb_importer().run(&table).expect("import succeeds");

        assert_eq!(result.actor_name(), Some("Nobody"));
        assert!(result.items.is_empty());
    }

    #[test]
    fn computed_failure_aborts_import() {
        let format = ImportFormat {
            id: "broken",
            display_name: "Broken",
            template: Template::subtree([("langs", Template::lowercase_map_array(["Lang"]))]),
            extractors: vec![FREE_TEXT_CLASS, SPELL_LIST],
        };
        let mut table = FieldTable::new();
        table.insert("Lang", 7);

        let result = Importer::new(Arc::new(format)).run(&table);
        assert!(matches!(result, Err(ImportError::NotText { .. })));
    }

    #[test]
    fn extractor_error_aborts_import() {
        fn bad_pattern(source: &dyn FieldSource) -> Result<Vec<ItemRecord>, ImportError> {
            crate::extract::spell_names_matching(source, "[")
        }
        let format = ImportFormat {
            id: "bad",
            display_name: "Bad",
            template: Template::subtree([("name", Template::field("Name"))]),
            extractors: vec![Extractor::new("bad_pattern", bad_pattern)],
        };

        let result = Importer::new(Arc::new(format)).run(&FieldTable::new());
        assert!(matches!(result, Err(ImportError::InvalidPattern(_))));
    }

    #[test]
    fn export_file_name_is_sanitized() {
        let result = ImportResult {
            format_id: "mpmb".to_string(),
            actor: SheetValue::from(&serde_json::json!({"name": "../Brakka"})),
            items: Vec::new(),
        };
        assert_eq!(result.export_file_name(), "fvtt-.._Brakka.json");

        let unnamed = ImportResult {
            format_id: "mpmb".to_string(),
            actor: SheetValue::object(),
            items: Vec::new(),
        };
        assert_eq!(unnamed.export_file_name(), "fvtt-unnamed.json");
    }

    #[tokio::test]
    async fn export_writes_actor_and_items() {
        let result = mpmb_importer().run(&mpmb_sheet()).expect("import succeeds");
        let dir = tempfile::tempdir().expect("tempdir");

        let path = result.export_to_json(dir.path()).await.expect("export");
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("fvtt-Brakka.json"));

        let written = tokio::fs::read_to_string(&path).await.expect("read export");
        let json: serde_json::Value = serde_json::from_str(&written).expect("valid json");
        assert_eq!(json["actor"]["name"], "Brakka");
        assert_eq!(json["actor"]["data"]["abilities"]["str"]["value"], "16");
        assert_eq!(json["items"][0]["type"], "class");
        assert_eq!(json["items"][0]["data"]["subclass"], "Battle Master");
        assert_eq!(json["items"][2]["name"], "Shield");
    }
}
