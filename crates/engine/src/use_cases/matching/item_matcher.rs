//! Matching derived items against compendium entries.

use std::sync::Arc;

use pcimport_domain::{ItemKind, ItemRecord};
use serde_json::Value;

use super::pack_cache::PackIndexCache;
use crate::infrastructure::ports::{MatchError, PackEntry};

/// Whether a compendium name matches an extracted item name.
///
/// The compendium name must start with the item name, so "Fireball" finds
/// "Fireball" but "Magic Missile" does not find "Jim's Magic Missile".
pub fn is_fuzzy_match(reference: &str, candidate: &str) -> bool {
    reference.starts_with(candidate)
}

/// Result of matching one item.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// A compendium entry was found; `data` is ready to attach to the actor.
    Matched {
        item: ItemRecord,
        entry: PackEntry,
        data: Value,
    },
    /// No entry was found, or looking one up failed.
    Unmatched { item: ItemRecord },
}

impl MatchOutcome {
    pub fn item(&self) -> &ItemRecord {
        match self {
            MatchOutcome::Matched { item, .. } | MatchOutcome::Unmatched { item } => item,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, MatchOutcome::Matched { .. })
    }
}

/// Resolves derived items to compendium entries through a populated cache.
pub struct ItemMatcher {
    cache: Arc<PackIndexCache>,
}

impl ItemMatcher {
    pub fn new(cache: Arc<PackIndexCache>) -> Self {
        Self { cache }
    }

    /// Match every item in order, one at a time.
    ///
    /// A failure for one item is logged and reported as unmatched; the
    /// remaining items are still processed.
    pub async fn match_items(&self, items: &[ItemRecord]) -> Vec<MatchOutcome> {
        let mut outcomes = Vec::with_capacity(items.len());
        for item in items {
            let outcome = match self.match_item(item).await {
                Ok(Some((entry, data))) => MatchOutcome::Matched {
                    item: item.clone(),
                    entry,
                    data,
                },
                Ok(None) => {
                    tracing::debug!(item = %item.name, kind = %item.kind, "No compendium match");
                    MatchOutcome::Unmatched { item: item.clone() }
                }
                Err(e) => {
                    tracing::warn!(
                        item = %item.name,
                        kind = %item.kind,
                        error = %e,
                        "Item matching failed"
                    );
                    MatchOutcome::Unmatched { item: item.clone() }
                }
            };
            outcomes.push(outcome);
        }

        let matched = outcomes.iter().filter(|o| o.is_matched()).count();
        tracing::info!(matched, total = outcomes.len(), "Item matching complete");
        outcomes
    }

    /// Best match for one item: the first cached row whose name matches.
    pub async fn match_item(
        &self,
        item: &ItemRecord,
    ) -> Result<Option<(PackEntry, Value)>, MatchError> {
        let Some(entry) = self
            .cache
            .find_first(item.kind, |entry| is_fuzzy_match(&entry.name, &item.name))
        else {
            return Ok(None);
        };

        let Some(mut data) = self.cache.fetch_entry(item.kind, &entry.id).await? else {
            return Ok(None);
        };

        if item.kind == ItemKind::Class {
            apply_class_levels(&mut data, item);
        }
        Ok(Some((entry, data)))
    }
}

/// Overwrite the entry's level and subclass with what was extracted.
fn apply_class_levels(document: &mut Value, item: &ItemRecord) {
    let Value::Object(root) = document else {
        return;
    };
    let data = root
        .entry("data")
        .or_insert_with(|| Value::Object(serde_json::Map::new()));
    if let Value::Object(data) = data {
        data.insert("levels".to_string(), item.levels.clone().into());
        data.insert("subclass".to_string(), item.subclass.clone().into());
    }
}
