//! Error types for engine operations.

use grove_branch::BranchError;
use grove_types::NodeId;
use thiserror::Error;

/// Errors that can occur while driving the version-control engine.
///
/// These cover rejected user input only. Structural misses, such as
/// editing a file that has vanished, are silent no-ops by design of the
/// tree operations and do not appear here.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The named branch does not exist in the store.
    #[error("branch not found: {name}")]
    BranchNotFound { name: String },

    /// A commit needs a non-blank message.
    #[error("commit message must not be blank")]
    BlankCommitMessage,

    /// A commit needs at least one staged file.
    #[error("nothing staged to commit")]
    NothingStaged,

    /// The file or folder name is unusable.
    #[error("invalid name: {name:?}: {reason}")]
    InvalidNodeName { name: String, reason: String },

    /// A sibling with this name already exists under the parent.
    #[error("file or folder already exists: {name:?}")]
    NodeAlreadyExists { name: String },

    /// The parent for a create operation is missing or not a folder.
    #[error("parent folder not found: {id}")]
    ParentNotFound { id: NodeId },

    /// Branch bookkeeping failed.
    #[error(transparent)]
    Branch(#[from] BranchError),
}

/// Convenience type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
