//! Error types for persistence operations.

use thiserror::Error;

/// Errors from the state store boundary.
#[derive(Debug, Error)]
pub enum PersistError {
    /// State could not be encoded or decoded.
    #[error("state serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The decoded form breaks the store's invariants.
    #[error("saved state is inconsistent: {0}")]
    Inconsistent(String),

    /// The backing store rejected the operation.
    #[error("state storage failed: {0}")]
    Storage(String),
}

/// Convenience type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistError>;
