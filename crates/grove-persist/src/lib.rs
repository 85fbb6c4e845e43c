//! State persistence for grove.
//!
//! The engine does not care where its state lives; it only needs a
//! [`StateStore`] it can offer the whole [`BranchStore`](grove_branch::BranchStore)
//! to after each change, and ask for it back on startup. The encoded form
//! is JSON. Startup is tolerant: missing or unusable saved state falls
//! back to the built-in starter workspace instead of failing.
//!
//! # Key Types
//!
//! - [`StateStore`]: the load/save contract.
//! - [`InMemoryStateStore`]: the reference implementation; encodes for
//!   real so the codec is exercised even without a disk.
//! - [`load_or_default`]: tolerant startup loading.
//! - [`PersistError`]: codec and storage failures.

pub mod bootstrap;
pub mod codec;
pub mod error;
pub mod memory;
pub mod traits;

pub use bootstrap::{default_store, load_or_default};
pub use error::{PersistError, Result};
pub use memory::InMemoryStateStore;
pub use traits::StateStore;
