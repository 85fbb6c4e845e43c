//! The load/save contract between the engine and whatever keeps state.

use std::sync::Arc;

use grove_branch::BranchStore;

use crate::error::Result;

/// Storage for the whole branch store.
///
/// `load` returning `Ok(None)` means nothing has ever been saved. An
/// implementation that cannot decode what it holds should return an error
/// rather than invent state; callers fall back through
/// [`load_or_default`](crate::load_or_default).
pub trait StateStore {
    /// Fetch the last saved store, if any.
    fn load(&self) -> Result<Option<BranchStore>>;

    /// Replace the saved store with `store`.
    fn save(&self, store: &BranchStore) -> Result<()>;
}

/// Shared handles forward to the underlying store, so one backend can be
/// read back after the engine that wrote through it is gone.
impl<S: StateStore + ?Sized> StateStore for Arc<S> {
    fn load(&self) -> Result<Option<BranchStore>> {
        (**self).load()
    }

    fn save(&self, store: &BranchStore) -> Result<()> {
        (**self).save(store)
    }
}
