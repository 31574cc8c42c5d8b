//! Infrastructure implementations.
//!
//! Contains port trait implementations and file loaders for external inputs.

pub mod compendium_files;
pub mod field_sources;
pub mod ports;
