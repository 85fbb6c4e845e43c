//! Foundation types for grove.
//!
//! This crate provides the identifier, status, and temporal types used
//! throughout the grove workspace. Every other grove crate depends on
//! `grove-types`.
//!
//! # Key Types
//!
//! - [`NodeId`] - Unique identifier for a file or folder node (UUID v7)
//! - [`CommitId`] - Unique identifier for a commit record (UUID v7)
//! - [`FileStatus`] - Per-file lifecycle tag tracking uncommitted change state
//! - [`Language`] - Advisory language tag derived from a file name
//! - [`Timestamp`] - Wall-clock milliseconds since the UNIX epoch

pub mod error;
pub mod id;
pub mod language;
pub mod status;
pub mod temporal;

pub use error::TypeError;
pub use id::{CommitId, NodeId};
pub use language::Language;
pub use status::FileStatus;
pub use temporal::Timestamp;
