//! Importer configuration loaded from the environment.

use std::path::PathBuf;

use pcimport_domain::ItemKind;
use thiserror::Error;

use crate::formats::mpmb;

/// Compendium pack holding spells.
pub const DEFAULT_SPELL_PACK: &str = "dnd5e.spells";

/// Compendium pack holding classes.
pub const DEFAULT_CLASS_PACK: &str = "dnd5e.classes";

/// Errors that can occur while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Compendium pack searched for each item kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPackConfig {
    pub spells: String,
    pub classes: String,
}

impl Default for ItemPackConfig {
    fn default() -> Self {
        Self {
            spells: DEFAULT_SPELL_PACK.to_string(),
            classes: DEFAULT_CLASS_PACK.to_string(),
        }
    }
}

impl ItemPackConfig {
    pub fn pack(&self, kind: ItemKind) -> &str {
        match kind {
            ItemKind::Spell => &self.spells,
            ItemKind::Class => &self.classes,
        }
    }

    /// Every (kind, pack) pair, in a fixed order.
    pub fn packs(&self) -> [(ItemKind, &str); 2] {
        [
            (ItemKind::Spell, self.spells.as_str()),
            (ItemKind::Class, self.classes.as_str()),
        ]
    }
}

/// Configuration for one importer run.
#[derive(Debug, Clone)]
pub struct ImporterConfig {
    /// Import format ID.
    pub format: String,
    /// Field-table export to read.
    pub input: PathBuf,
    /// Directory the JSON export is written to.
    pub output_dir: PathBuf,
    /// Whether to write the JSON export.
    pub export: bool,
    /// Directory of compendium pack files; matching is skipped without one.
    pub compendium_dir: Option<PathBuf>,
    pub packs: ItemPackConfig,
}

impl ImporterConfig {
    /// Read configuration from `PCI_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let input = lookup("PCI_INPUT")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("PCI_INPUT"))?;

        let export = match lookup("PCI_EXPORT") {
            None => true,
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                name: "PCI_EXPORT",
                value,
            })?,
        };

        let defaults = ItemPackConfig::default();
        Ok(Self {
            format: lookup("PCI_FORMAT").unwrap_or_else(|| mpmb::ID.to_string()),
            input: PathBuf::from(input),
            output_dir: lookup("PCI_OUTPUT_DIR").map_or_else(|| PathBuf::from("."), PathBuf::from),
            export,
            compendium_dir: lookup("PCI_COMPENDIUM_DIR").map(PathBuf::from),
            packs: ItemPackConfig {
                spells: lookup("PCI_SPELL_PACK").unwrap_or(defaults.spells),
                classes: lookup("PCI_CLASS_PACK").unwrap_or(defaults.classes),
            },
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
