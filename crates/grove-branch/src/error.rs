//! Error types for branch operations.

use thiserror::Error;

/// Errors that can occur while managing branches.
#[derive(Debug, Error)]
pub enum BranchError {
    /// The branch was not found.
    #[error("branch not found: {name}")]
    NotFound { name: String },

    /// A branch with this name already exists.
    #[error("branch already exists: {name}")]
    AlreadyExists { name: String },

    /// The branch name is invalid.
    #[error("invalid branch name: {name}: {reason}")]
    InvalidName { name: String, reason: String },

    /// The store must always hold at least one branch.
    #[error("cannot remove the last branch: {name}")]
    LastBranch { name: String },
}

/// Convenience type alias for branch operations.
pub type Result<T> = std::result::Result<T, BranchError>;
