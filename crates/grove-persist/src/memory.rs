//! In-memory state store for tests and ephemeral sessions.

use std::sync::RwLock;

use grove_branch::BranchStore;

use crate::codec;
use crate::error::{PersistError, Result};
use crate::traits::StateStore;

/// A [`StateStore`] that keeps the encoded JSON in memory behind a
/// `RwLock`. Saving really encodes and loading really decodes, so the
/// codec is exercised even without a disk. Data is lost on drop.
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    saved: RwLock<Option<String>>,
}

impl InMemoryStateStore {
    /// Create a store with nothing saved yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with an encoded form, as if left by an earlier
    /// run. The seed is not validated until `load`.
    pub fn seeded(json: impl Into<String>) -> Self {
        Self {
            saved: RwLock::new(Some(json.into())),
        }
    }

    /// The raw saved JSON, if any.
    pub fn raw(&self) -> Option<String> {
        self.saved.read().ok().and_then(|guard| guard.as_ref().cloned())
    }
}

impl StateStore for InMemoryStateStore {
    fn load(&self) -> Result<Option<BranchStore>> {
        let guard = self
            .saved
            .read()
            .map_err(|e| PersistError::Storage(format!("lock poisoned: {e}")))?;
        match guard.as_deref() {
            Some(json) => Ok(Some(codec::decode(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, store: &BranchStore) -> Result<()> {
        let json = codec::encode(store)?;
        let mut guard = self
            .saved
            .write()
            .map_err(|e| PersistError::Storage(format!("lock poisoned: {e}")))?;
        *guard = Some(json);
        Ok(())
    }
}
