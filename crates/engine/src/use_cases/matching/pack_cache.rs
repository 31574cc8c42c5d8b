//! Process-scoped cache of compendium pack indexes.
//!
//! The cache is filled explicitly with [`PackIndexCache::populate`] and
//! rebuilt with [`PackIndexCache::refresh`]; nothing loads lazily.

use std::sync::Arc;

use dashmap::DashMap;
use pcimport_domain::ItemKind;

use crate::config::ItemPackConfig;
use crate::infrastructure::ports::{CompendiumIndex, MatchError, PackEntry};

/// Cached pack indexes, one per item kind.
pub struct PackIndexCache {
    compendium: Arc<dyn CompendiumIndex>,
    packs: ItemPackConfig,
    indexes: DashMap<ItemKind, Vec<PackEntry>>,
}

impl PackIndexCache {
    pub fn new(compendium: Arc<dyn CompendiumIndex>, packs: ItemPackConfig) -> Self {
        Self {
            compendium,
            packs,
            indexes: DashMap::new(),
        }
    }

    /// Load every configured pack that is not cached yet.
    ///
    /// A pack whose index cannot be read is skipped with a warning. Returns
    /// the number of packs cached afterwards.
    pub async fn populate(&self) -> usize {
        for (kind, pack) in self.packs.packs() {
            if self.indexes.contains_key(&kind) {
                continue;
            }
            match self.compendium.pack_index(pack).await {
                Ok(entries) => {
                    tracing::debug!(pack, entries = entries.len(), "Indexed compendium pack");
                    self.indexes.insert(kind, entries);
                }
                Err(e) => {
                    tracing::warn!(pack, error = %e, "Compendium pack unavailable, skipping");
                }
            }
        }
        let cached = self.indexes.len();
        tracing::info!(packs = cached, "Pack index cache populated");
        cached
    }

    /// Drop every cached index and load them again.
    pub async fn refresh(&self) -> usize {
        self.indexes.clear();
        tracing::info!("Pack index cache cleared");
        self.populate().await
    }

    pub fn is_populated(&self, kind: ItemKind) -> bool {
        self.indexes.contains_key(&kind)
    }

    /// Cached index rows for `kind`; empty when the pack was never loaded.
    pub fn entries(&self, kind: ItemKind) -> Vec<PackEntry> {
        self.indexes
            .get(&kind)
            .map(|entries| entries.value().clone())
            .unwrap_or_default()
    }

    /// Cached rows of `kind` whose name matches `query`, ignoring case.
    pub fn search(&self, kind: ItemKind, query: &str) -> Result<Vec<PackEntry>, MatchError> {
        let pattern = regex_lite::RegexBuilder::new(query)
            .case_insensitive(true)
            .build()
            .map_err(|e| MatchError::InvalidQuery(e.to_string()))?;

        Ok(self
            .indexes
            .get(&kind)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|entry| pattern.is_match(&entry.name))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    /// First cached row of `kind`, in pack order, accepted by `predicate`.
    pub fn find_first(
        &self,
        kind: ItemKind,
        mut predicate: impl FnMut(&PackEntry) -> bool,
    ) -> Option<PackEntry> {
        self.indexes
            .get(&kind)
            .and_then(|entries| entries.iter().find(|entry| predicate(entry)).cloned())
    }

    /// Full item data for one cached row.
    pub async fn fetch_entry(
        &self,
        kind: ItemKind,
        id: &str,
    ) -> Result<Option<serde_json::Value>, MatchError> {
        self.compendium.entry(self.packs.pack(kind), id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockCompendiumIndex;

    fn spells() -> Vec<PackEntry> {
        vec![
            PackEntry::new("s1", "Fireball"),
            PackEntry::new("s2", "Fire Bolt"),
            PackEntry::new("s3", "Shield"),
        ]
    }

    fn compendium_with_spells_only() -> MockCompendiumIndex {
        let mut mock = MockCompendiumIndex::new();
        mock.expect_pack_index().returning(|pack| match pack {
            "dnd5e.spells" => Ok(spells()),
            other => Err(MatchError::index_unavailable(other, "pack not installed")),
        });
        mock
    }

    #[tokio::test]
    async fn populate_skips_unavailable_packs() {
        let cache = PackIndexCache::new(
            Arc::new(compendium_with_spells_only()),
            ItemPackConfig::default(),
        );

        assert_eq!(cache.populate().await, 1);
        assert!(cache.is_populated(ItemKind::Spell));
        assert!(!cache.is_populated(ItemKind::Class));
        assert_eq!(cache.entries(ItemKind::Spell).len(), 3);
        assert!(cache.entries(ItemKind::Class).is_empty());
    }

    #[tokio::test]
    async fn populate_is_idempotent_and_refresh_reloads() {
        let mut mock = MockCompendiumIndex::new();
        mock.expect_pack_index()
            .times(4)
            .returning(|_| Ok(vec![PackEntry::new("x", "Anything")]));
        let cache = PackIndexCache::new(Arc::new(mock), ItemPackConfig::default());

        assert_eq!(cache.populate().await, 2);
        assert_eq!(cache.populate().await, 2);
        assert_eq!(cache.refresh().await, 2);
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let cache = PackIndexCache::new(
            Arc::new(compendium_with_spells_only()),
            ItemPackConfig::default(),
        );
        cache.populate().await;

        let found = cache.search(ItemKind::Spell, "^fire").expect("valid query");
        let names: Vec<_> = found.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Fireball", "Fire Bolt"]);

        assert!(cache.search(ItemKind::Class, "fire").expect("valid query").is_empty());
    }

    #[tokio::test]
    async fn find_first_follows_pack_order() {
        let cache = PackIndexCache::new(
            Arc::new(compendium_with_spells_only()),
            ItemPackConfig::default(),
        );
        cache.populate().await;

        let found = cache.find_first(ItemKind::Spell, |entry| entry.name.starts_with("Fire"));
        assert_eq!(found.map(|entry| entry.id), Some("s1".to_string()));

        assert!(cache.find_first(ItemKind::Spell, |_| false).is_none());
        assert!(cache.find_first(ItemKind::Class, |_| true).is_none());
    }

    #[tokio::test]
    async fn invalid_search_query_is_rejected() {
        let cache = PackIndexCache::new(
            Arc::new(compendium_with_spells_only()),
            ItemPackConfig::default(),
        );
        cache.populate().await;

        let result = cache.search(ItemKind::Spell, "(fire");
        assert!(matches!(result, Err(MatchError::InvalidQuery(_))));
    }
}
