//! Field-table loading from exported files.
//!
//! Exports arrive as JSON documents. Nested objects are flattened into
//! dotted field names by [`FieldTable::from_json`].

use std::path::{Path, PathBuf};

use pcimport_domain::FieldTable;
use thiserror::Error;
use tokio::fs;

/// Errors that can occur while loading a field table.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Export at {0} is not a JSON object")]
    NotAnObject(PathBuf),
}

/// Read a JSON export and build its field table.
pub async fn load_field_table(path: &Path) -> Result<FieldTable, SourceError> {
    let content = fs::read_to_string(path).await?;
    let root: serde_json::Value = serde_json::from_str(&content)?;
    if !root.is_object() {
        return Err(SourceError::NotAnObject(path.to_path_buf()));
    }

    let table = FieldTable::from_json(&root);
    tracing::debug!(path = %path.display(), fields = table.len(), "Loaded field table");
    Ok(table)
}
