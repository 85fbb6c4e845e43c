//! Tolerant startup loading.

use grove_branch::{BranchSnapshot, BranchStore};
use grove_tree::starter::starter_tree;
use tracing::{debug, warn};

use crate::traits::StateStore;

/// The single-branch store a fresh workspace begins with: the starter
/// tree on the default branch, nothing staged, no history.
pub fn default_store() -> BranchStore {
    BranchStore::new(BranchSnapshot::new(starter_tree()))
}

/// Load the saved store, falling back to [`default_store`] when nothing
/// was saved or the saved form cannot be used. Never fails; a corrupt
/// save costs the old state, not the session.
pub fn load_or_default(persist: &dyn StateStore) -> BranchStore {
    match persist.load() {
        Ok(Some(saved)) => saved,
        Ok(None) => {
            debug!("no saved state; starting from the default workspace");
            default_store()
        }
        Err(error) => {
            warn!(%error, "saved state unusable; starting from the default workspace");
            default_store()
        }
    }
}
