//! Error types for the setup model.

use thiserror::Error;
use wsetup_store::StoreError;
use wsetup_tag::TagError;

/// Result type for setup operations.
pub type SetupResult<T> = Result<T, SetupError>;

/// Errors that can occur in setup operations. Every failure happens before
/// the collection is mutated.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The operation is not possible in the model's current state.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// A selection index outside the collection.
    #[error("index {index} is out of range for {len} writing systems")]
    ArgumentOutOfRange { index: usize, len: usize },

    /// A bad argument, such as a missing import file.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A value failed validation and was not applied.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Repository or file error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Tag error.
    #[error("tag error: {0}")]
    Tag(#[from] TagError),

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}
