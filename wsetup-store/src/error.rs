//! Error types for the repository layer.

use thiserror::Error;
use wsetup_tag::TagError;

/// Result type for repository operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in repository operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No stored definition matches.
    #[error("writing system not found: {0}")]
    NotFound(String),

    /// Another stored definition already uses the tag.
    #[error("language tag already in use: {0}")]
    Conflict(String),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored data is unusable.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Tag error.
    #[error("tag error: {0}")]
    Tag(#[from] TagError),
}
