//! Error types for port operations.

/// Compendium lookup errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// A pack's index could not be read - includes the pack name.
    #[error("Index for pack {pack} unavailable: {message}")]
    IndexUnavailable { pack: String, message: String },

    /// Fetching one entry failed - includes pack and entry ID.
    #[error("Lookup of {id} in pack {pack} failed: {message}")]
    EntryLookup {
        pack: String,
        id: String,
        message: String,
    },

    /// A search query is not a valid pattern.
    #[error("Invalid search query: {0}")]
    InvalidQuery(String),
}

impl MatchError {
    /// Create an IndexUnavailable error with pack context.
    pub fn index_unavailable(pack: impl Into<String>, message: impl ToString) -> Self {
        Self::IndexUnavailable {
            pack: pack.into(),
            message: message.to_string(),
        }
    }

    /// Create an EntryLookup error with pack and entry context.
    pub fn entry_lookup(
        pack: impl Into<String>,
        id: impl Into<String>,
        message: impl ToString,
    ) -> Self {
        Self::EntryLookup {
            pack: pack.into(),
            id: id.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = MatchError::index_unavailable("dnd5e.spells", "not found");
        assert_eq!(
            err.to_string(),
            "Index for pack dnd5e.spells unavailable: not found"
        );

        let err = MatchError::entry_lookup("dnd5e.classes", "abc123", "timeout");
        assert_eq!(
            err.to_string(),
            "Lookup of abc123 in pack dnd5e.classes failed: timeout"
        );
    }
}
