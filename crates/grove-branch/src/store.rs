//! The branch arena: every branch keyed by name, plus the current branch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{BranchError, Result};
use crate::names::validate_branch_name;
use crate::snapshot::BranchSnapshot;

/// Name given to the first branch when a store is seeded.
pub const DEFAULT_BRANCH: &str = "main";

/// All branches of a workspace.
///
/// Invariants: the map is never empty, and `current` always keys into it.
/// The constructor establishes both and every mutation preserves them, so
/// the fields stay private. Names iterate in sorted order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchStore {
    snapshots: BTreeMap<String, BranchSnapshot>,
    current: String,
}

impl BranchStore {
    /// A store holding `snapshot` under [`DEFAULT_BRANCH`], which becomes
    /// the current branch.
    pub fn new(snapshot: BranchSnapshot) -> Self {
        let mut snapshots = BTreeMap::new();
        snapshots.insert(DEFAULT_BRANCH.to_string(), snapshot);
        Self {
            snapshots,
            current: DEFAULT_BRANCH.to_string(),
        }
    }

    /// Name of the branch the UI is on.
    pub fn current_name(&self) -> &str {
        &self.current
    }

    /// Snapshot of the current branch. `None` only on a store whose
    /// invariants were broken by a hand-edited serialized form.
    pub fn current(&self) -> Option<&BranchSnapshot> {
        self.snapshots.get(&self.current)
    }

    /// All branch names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.snapshots.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.snapshots.contains_key(name)
    }

    pub fn branch_count(&self) -> usize {
        self.snapshots.len()
    }

    pub fn get(&self, name: &str) -> Option<&BranchSnapshot> {
        self.snapshots.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut BranchSnapshot> {
        self.snapshots.get_mut(name)
    }

    /// Add a branch under a new name. The name must pass validation and
    /// must not collide with an existing branch. Does not change the
    /// current branch.
    pub fn insert(&mut self, name: impl Into<String>, snapshot: BranchSnapshot) -> Result<()> {
        let name = name.into();
        validate_branch_name(&name)?;
        if self.snapshots.contains_key(&name) {
            return Err(BranchError::AlreadyExists { name });
        }
        self.snapshots.insert(name, snapshot);
        Ok(())
    }

    /// Point `current` at an existing branch.
    pub fn set_current(&mut self, name: &str) -> Result<()> {
        if !self.snapshots.contains_key(name) {
            return Err(BranchError::NotFound {
                name: name.to_string(),
            });
        }
        self.current = name.to_string();
        Ok(())
    }

    /// Remove a branch. The last remaining branch cannot be removed; when
    /// the removed branch was current, the first remaining name (sorted)
    /// becomes current.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        if !self.snapshots.contains_key(name) {
            return Err(BranchError::NotFound {
                name: name.to_string(),
            });
        }
        if self.snapshots.len() == 1 {
            return Err(BranchError::LastBranch {
                name: name.to_string(),
            });
        }
        self.snapshots.remove(name);
        if self.current == name {
            if let Some(first) = self.snapshots.keys().next() {
                self.current = first.clone();
            }
        }
        Ok(())
    }

    /// Whether the invariants hold. A freshly constructed store always
    /// passes; a deserialized one may not, and should then be discarded.
    pub fn is_well_formed(&self) -> bool {
        !self.snapshots.is_empty() && self.snapshots.contains_key(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use grove_tree::{FileNode, FolderNode};

    use super::*;

    fn empty_snapshot() -> BranchSnapshot {
        BranchSnapshot::new(FolderNode::new("workspace"))
    }

    fn snapshot_with_file(name: &str) -> BranchSnapshot {
        BranchSnapshot::new(FolderNode::new("workspace").with_child(FileNode::pristine(name, "")))
    }

    // ---- Test 1: Seeding creates a single current branch ----
    #[test]
    fn seed_creates_single_current_branch() {
        let store = BranchStore::new(empty_snapshot());
        assert_eq!(store.current_name(), DEFAULT_BRANCH);
        assert_eq!(store.names(), vec![DEFAULT_BRANCH]);
        assert_eq!(store.branch_count(), 1);
        assert!(store.current().is_some());
        assert!(store.is_well_formed());
    }

    // ---- Test 2: Insert adds without switching ----
    #[test]
    fn insert_adds_without_switching() {
        let mut store = BranchStore::new(empty_snapshot());
        store.insert("feature", empty_snapshot()).unwrap();
        assert!(store.contains("feature"));
        assert_eq!(store.current_name(), DEFAULT_BRANCH);
        assert_eq!(store.branch_count(), 2);
    }

    // ---- Test 3: Duplicate names are rejected ----
    #[test]
    fn insert_duplicate_is_rejected() {
        let mut store = BranchStore::new(empty_snapshot());
        let err = store.insert(DEFAULT_BRANCH, empty_snapshot()).unwrap_err();
        assert!(matches!(err, BranchError::AlreadyExists { .. }));
    }

    // ---- Test 4: Invalid names are rejected ----
    #[test]
    fn insert_invalid_name_is_rejected() {
        let mut store = BranchStore::new(empty_snapshot());
        let err = store.insert("bad..name", empty_snapshot()).unwrap_err();
        assert!(matches!(err, BranchError::InvalidName { .. }));
        assert!(!store.contains("bad..name"));
    }

    // ---- Test 5: set_current switches, unknown names rejected ----
    #[test]
    fn set_current_switches_to_existing_only() {
        let mut store = BranchStore::new(empty_snapshot());
        store.insert("feature", empty_snapshot()).unwrap();

        store.set_current("feature").unwrap();
        assert_eq!(store.current_name(), "feature");

        let err = store.set_current("ghost").unwrap_err();
        assert!(matches!(err, BranchError::NotFound { .. }));
        assert_eq!(store.current_name(), "feature");
    }

    // ---- Test 6: Removing a non-current branch ----
    #[test]
    fn remove_non_current_branch() {
        let mut store = BranchStore::new(empty_snapshot());
        store.insert("feature", empty_snapshot()).unwrap();

        store.remove("feature").unwrap();
        assert!(!store.contains("feature"));
        assert_eq!(store.current_name(), DEFAULT_BRANCH);
    }

    // ---- Test 7: Removing the current branch moves current ----
    #[test]
    fn remove_current_branch_moves_current() {
        let mut store = BranchStore::new(empty_snapshot());
        store.insert("feature", empty_snapshot()).unwrap();
        store.insert("bugfix", empty_snapshot()).unwrap();
        store.set_current("feature").unwrap();

        store.remove("feature").unwrap();
        // First remaining name in sorted order.
        assert_eq!(store.current_name(), "bugfix");
        assert!(store.is_well_formed());
    }

    // ---- Test 8: The last branch cannot be removed ----
    #[test]
    fn remove_last_branch_is_rejected() {
        let mut store = BranchStore::new(empty_snapshot());
        let err = store.remove(DEFAULT_BRANCH).unwrap_err();
        assert!(matches!(err, BranchError::LastBranch { .. }));
        assert!(store.contains(DEFAULT_BRANCH));
    }

    // ---- Test 9: Removing an unknown branch is rejected ----
    #[test]
    fn remove_unknown_branch_is_rejected() {
        let mut store = BranchStore::new(empty_snapshot());
        let err = store.remove("ghost").unwrap_err();
        assert!(matches!(err, BranchError::NotFound { .. }));
    }

    // ---- Test 10: Names come back sorted ----
    #[test]
    fn names_are_sorted() {
        let mut store = BranchStore::new(empty_snapshot());
        store.insert("zeta", empty_snapshot()).unwrap();
        store.insert("alpha", empty_snapshot()).unwrap();
        assert_eq!(store.names(), vec!["alpha", "main", "zeta"]);
    }

    // ---- Test 11: Mutation through get_mut sticks ----
    #[test]
    fn get_mut_mutations_stick() {
        let mut store = BranchStore::new(snapshot_with_file("a.ts"));
        let snapshot = store.get_mut(DEFAULT_BRANCH).unwrap();
        snapshot.commits.insert(0, crate::Commit::new("first"));

        assert_eq!(
            store.get(DEFAULT_BRANCH).unwrap().head().unwrap().message,
            "first"
        );
    }

    // ---- Test 12: Serde roundtrip preserves the whole store ----
    #[test]
    fn serde_roundtrip_preserves_store() {
        let mut store = BranchStore::new(snapshot_with_file("a.ts"));
        store.insert("feature", snapshot_with_file("b.ts")).unwrap();
        store.set_current("feature").unwrap();

        let json = serde_json::to_string(&store).unwrap();
        let parsed: BranchStore = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, store);
        assert_eq!(parsed.current_name(), "feature");
    }

    // ---- Test 13: A hand-edited serialized form can break invariants ----
    #[test]
    fn well_formedness_catches_bad_decode() {
        // `current` pointing at a key that is not in the map.
        let broken = r#"{"snapshots":{},"current":"main"}"#;
        let parsed: BranchStore = serde_json::from_str(broken).unwrap();
        assert!(!parsed.is_well_formed());

        assert!(BranchStore::new(empty_snapshot()).is_well_formed());
    }
}
