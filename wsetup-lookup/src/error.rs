//! Error types for language lookup.

use thiserror::Error;

/// Result type for lookup operations.
pub type LookupResult<T> = Result<T, LookupError>;

/// Errors that can occur during language lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The language directory could not answer.
    #[error("language directory error: {0}")]
    Directory(String),
}
