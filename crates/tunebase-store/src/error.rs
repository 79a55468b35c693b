//! Error types for tunebase storage.

use crate::expression::ExpressionError;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The update directive could not be built or applied.
    #[error("invalid update: {0}")]
    InvalidUpdate(#[from] ExpressionError),

    /// A record handed to `put` has no string key attribute.
    #[error("record is missing its key attribute '{attribute}'")]
    MissingKey {
        /// The table's key attribute.
        attribute: &'static str,
    },

    /// The update tried to change the record's key attribute.
    #[error("cannot update key attribute '{attribute}'")]
    KeyAttribute {
        /// The table's key attribute.
        attribute: &'static str,
    },
}
