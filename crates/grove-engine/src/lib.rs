//! The grove version-control engine.
//!
//! [`Engine`] drives every state change: editing file content, staging and
//! unstaging, committing, and branching. Operations name their target
//! branch explicitly; the store's current branch is data for the UI, not
//! hidden engine state. Each mutation replaces the branch's snapshot,
//! refreshes the active-file tracker, and offers the whole store to
//! persistence without ever letting a save failure surface.
//!
//! # Key Types
//!
//! - [`Engine`]: the operation surface.
//! - [`BranchStatus`]: a recomputed changed/staged/unstaged report.
//! - [`ActiveFileTracker`]: which file is open, with a render cache.
//! - [`AdviceGate`]: drops advice replies that arrive for a file that is
//!   no longer open.
//! - [`EngineError`]: typed rejections; structural misses are no-ops
//!   instead.

pub mod active;
pub mod advice;
pub mod engine;
pub mod error;
pub mod views;

pub use active::ActiveFileTracker;
pub use advice::{AdviceGate, AdviceRequest, AdviceTicket};
pub use engine::Engine;
pub use error::{EngineError, Result};
pub use views::{BranchStatus, StatusEntry};
