//! JSON encoding of the branch store.

use grove_branch::BranchStore;

use crate::error::{PersistError, Result};

/// Encode a store as pretty-printed JSON.
pub fn encode(store: &BranchStore) -> Result<String> {
    Ok(serde_json::to_string_pretty(store)?)
}

/// Decode a store, rejecting forms whose invariants do not hold (an empty
/// branch map, or a current name missing from the map).
pub fn decode(json: &str) -> Result<BranchStore> {
    let store: BranchStore = serde_json::from_str(json)?;
    if !store.is_well_formed() {
        return Err(PersistError::Inconsistent(
            "current branch missing from the branch map".into(),
        ));
    }
    Ok(store)
}
