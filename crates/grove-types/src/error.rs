//! Error types for foundation type parsing.

/// Errors produced when parsing foundation types from text.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// The string is not a valid identifier.
    #[error("invalid id {value:?}: {reason}")]
    InvalidId { value: String, reason: String },
}
