//! Port traits for infrastructure boundaries.
//!
//! The compendium is the only external collaborator the engine talks to;
//! everything else is concrete types.

mod compendium;
mod error;

pub use compendium::{CompendiumIndex, PackEntry};
pub use error::MatchError;

#[cfg(test)]
pub use compendium::MockCompendiumIndex;
