//! Error types for tag handling.

use thiserror::Error;

/// Result type for tag operations.
pub type TagResult<T> = Result<T, TagError>;

/// Errors that can occur while parsing or rewriting language tags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// The text is not a well-formed language tag.
    #[error("invalid language tag: {0}")]
    InvalidTag(String),

    /// A variant field contains something other than registered variants
    /// and private-use tokens.
    #[error("invalid variant: {0}")]
    InvalidVariant(String),

    /// Every candidate suffix was already taken.
    #[error("no unique tag could be derived from: {0}")]
    UniquenessExhausted(String),
}
