//! Branches for grove.
//!
//! Each branch owns a complete [`BranchSnapshot`]: its own workspace tree,
//! its own staged-file set, and its own commit log. [`BranchStore`] keeps
//! every snapshot keyed by a validated name and remembers which branch the
//! UI is on. Nothing is shared between branches; forking copies the whole
//! snapshot, so later edits never leak across.
//!
//! # Key Types
//!
//! - [`Commit`]: a message-plus-timestamp history record.
//! - [`BranchSnapshot`]: one branch's tree, staged set, and history.
//! - [`BranchStore`]: the name → snapshot map plus the current branch.
//! - [`BranchError`]: typed rejections for invalid, duplicate, or unknown
//!   branch names.

pub mod commit;
pub mod error;
pub mod names;
pub mod snapshot;
pub mod store;

pub use commit::Commit;
pub use error::{BranchError, Result};
pub use names::validate_branch_name;
pub use snapshot::BranchSnapshot;
pub use store::{BranchStore, DEFAULT_BRANCH};
