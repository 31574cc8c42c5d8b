//! File-backed compendium.
//!
//! Each pack is a JSON array at `<root>/<pack>.json`. Every element is a full
//! item document carrying at least `_id` and `name`. A pack file is read
//! and parsed once, then served from memory.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use tokio::fs;

use super::ports::{CompendiumIndex, MatchError, PackEntry};

/// Compendium packs stored as JSON files in one directory.
#[derive(Debug, Clone)]
pub struct JsonPackDirectory {
    root: PathBuf,
    documents: DashMap<String, Arc<Vec<serde_json::Value>>>,
}

impl JsonPackDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            documents: DashMap::new(),
        }
    }

    async fn read_pack(&self, pack: &str) -> Result<Arc<Vec<serde_json::Value>>, MatchError> {
        // Prevent path traversal
        if pack.contains("..") || pack.contains('/') || pack.contains('\\') {
            return Err(MatchError::index_unavailable(pack, "invalid pack name"));
        }

        if let Some(cached) = self.documents.get(pack) {
            return Ok(Arc::clone(cached.value()));
        }

        let path = self.root.join(format!("{pack}.json"));
        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| MatchError::index_unavailable(pack, e))?;
        let documents: Vec<serde_json::Value> =
            serde_json::from_str(&content).map_err(|e| MatchError::index_unavailable(pack, e))?;

        let documents = Arc::new(documents);
        self.documents.insert(pack.to_string(), Arc::clone(&documents));
        tracing::debug!(pack, documents = documents.len(), "Loaded compendium pack file");
        Ok(documents)
    }
}

#[async_trait]
impl CompendiumIndex for JsonPackDirectory {
    async fn pack_index(&self, pack: &str) -> Result<Vec<PackEntry>, MatchError> {
        let documents = self.read_pack(pack).await?;
        let entries = documents
            .iter()
            .filter_map(|doc| match PackEntry::deserialize(doc) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(pack, error = %e, "Skipping malformed pack entry");
                    None
                }
            })
            .collect();
        Ok(entries)
    }

    async fn entry(&self, pack: &str, id: &str) -> Result<Option<serde_json::Value>, MatchError> {
        let documents = self
            .read_pack(pack)
            .await
            .map_err(|e| MatchError::entry_lookup(pack, id, e))?;
        Ok(documents
            .iter()
            .find(|doc| doc.get("_id").and_then(serde_json::Value::as_str) == Some(id))
            .cloned())
    }
}
