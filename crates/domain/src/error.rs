//! Unified error type for the import pipeline
//!
//! Missing fields are never errors. What is left are template/data mismatches
//! inside computed leaves, which abort the whole import.

use thiserror::Error;

use crate::value::SheetValue;

/// Fatal import error
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ImportError {
    /// A computed-leaf helper was invoked with arguments it cannot use
    #[error("Invalid arguments for {helper}: {reason}")]
    InvalidArguments {
        helper: &'static str,
        reason: String,
    },

    /// A helper that works on text received something else
    #[error("{helper} expected text but found {value}")]
    NotText {
        helper: &'static str,
        value: String,
    },

    /// A field-name pattern failed to compile
    #[error("Invalid field pattern: {0}")]
    InvalidPattern(String),

    /// A computed leaf failed for a reason of its own
    #[error("Computed leaf '{leaf}' failed: {reason}")]
    Computation { leaf: String, reason: String },
}

impl ImportError {
    /// Create an invalid arguments error
    pub fn invalid_arguments(helper: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            helper,
            reason: reason.into(),
        }
    }

    /// Creates a type mismatch error for a value that should have been text.
    ///
    /// The offending value is rendered as JSON so the message shows exactly
    /// what the field table held.
    pub fn not_text(helper: &'static str, value: &SheetValue) -> Self {
        let rendered = serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}"));
        Self::NotText {
            helper,
            value: rendered,
        }
    }

    /// Create a computation error for a named leaf
    pub fn computation(leaf: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Computation {
            leaf: leaf.into(),
            reason: reason.into(),
        }
    }
}

impl From<regex_lite::Error> for ImportError {
    fn from(err: regex_lite::Error) -> Self {
        Self::InvalidPattern(err.to_string())
    }
}
