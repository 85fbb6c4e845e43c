//! Workspace tree for grove.
//!
//! A workspace is a recursive tree of named nodes: files carrying content,
//! language, and a change status, and folders carrying ordered children.
//! Every transform here is a pure function from one root to the next; the
//! input tree is never mutated, and a transform aimed at an id that is not
//! in the tree returns a structurally equal copy instead of failing.
//!
//! # Key Types
//!
//! - [`Node`]: the file/folder sum type.
//! - [`FileNode`], [`FolderNode`]: the two node shapes.
//! - [`FilePatch`]: a partial update applied by [`FolderNode::with_updated`].
//! - [`starter`]: the built-in workspace used when no saved state exists.

pub mod node;
pub mod ops;
pub mod starter;

pub use node::{FileNode, FolderNode, Node};
pub use ops::FilePatch;
