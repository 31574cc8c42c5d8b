//! Compendium port: the host's catalog of ready-made items.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::MatchError;

/// One row of a pack index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub img: Option<String>,
}

impl PackEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            img: None,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompendiumIndex: Send + Sync {
    /// Index rows of `pack`, in the pack's own order.
    async fn pack_index(&self, pack: &str) -> Result<Vec<PackEntry>, MatchError>;

    /// Full item data of one entry. `None` when the ID is not in the pack.
    async fn entry(&self, pack: &str, id: &str) -> Result<Option<serde_json::Value>, MatchError>;
}
