//! Item matching use case.
//!
//! Looks each derived item up in the compendium packs so ready-made entries
//! can be attached to the imported actor instead of empty items.

mod item_matcher;
mod pack_cache;

pub use item_matcher::{is_fuzzy_match, ItemMatcher, MatchOutcome};
pub use pack_cache::PackIndexCache;
