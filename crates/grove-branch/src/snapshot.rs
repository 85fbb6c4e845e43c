//! One branch's complete state.

use std::collections::HashSet;

use grove_tree::FolderNode;
use grove_types::NodeId;
use serde::{Deserialize, Serialize};

use crate::commit::Commit;

/// Everything a branch owns: its workspace tree, the set of files staged
/// for the next commit, and its commit log.
///
/// Invariant: every id in `staged` resolves to a file in `tree` with a
/// dirty status. Callers that remove or settle files restore the
/// invariant with [`BranchSnapshot::reconcile_staged`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchSnapshot {
    pub tree: FolderNode,
    pub staged: HashSet<NodeId>,
    /// Most recent first.
    pub commits: Vec<Commit>,
}

impl BranchSnapshot {
    /// A snapshot with no staged files and an empty history.
    pub fn new(tree: FolderNode) -> Self {
        Self {
            tree,
            staged: HashSet::new(),
            commits: Vec::new(),
        }
    }

    /// A full copy for a new branch. Tree, staged set, and history all
    /// carry over; the copy shares nothing with the original.
    pub fn fork(&self) -> Self {
        self.clone()
    }

    pub fn is_staged(&self, id: NodeId) -> bool {
        self.staged.contains(&id)
    }

    /// The most recent commit, if any.
    pub fn head(&self) -> Option<&Commit> {
        self.commits.first()
    }

    /// Drop staged ids that no longer resolve to a dirty file in the tree.
    pub fn reconcile_staged(&mut self) {
        let tree = &self.tree;
        self.staged
            .retain(|id| tree.find_file(*id).is_some_and(|f| f.is_dirty()));
    }
}

#[cfg(test)]
mod tests {
    use grove_tree::{FileNode, FilePatch};
    use grove_types::FileStatus;

    use super::*;

    fn snapshot_with_dirty_file() -> (BranchSnapshot, NodeId) {
        let file = FileNode {
            status: FileStatus::Modified,
            ..FileNode::pristine("app.ts", "boot();")
        };
        let id = file.id;
        let tree = FolderNode::new("workspace").with_child(file);
        let mut snapshot = BranchSnapshot::new(tree);
        snapshot.staged.insert(id);
        (snapshot, id)
    }

    #[test]
    fn new_snapshot_is_clean() {
        let snapshot = BranchSnapshot::new(FolderNode::new("workspace"));
        assert!(snapshot.staged.is_empty());
        assert!(snapshot.commits.is_empty());
        assert!(snapshot.head().is_none());
    }

    #[test]
    fn fork_shares_nothing() {
        let (parent, id) = snapshot_with_dirty_file();
        let mut fork = parent.fork();
        assert_eq!(fork, parent);

        fork.tree = fork.tree.with_updated(id, &FilePatch::content("changed"));
        fork.staged.clear();
        fork.commits.insert(0, Commit::new("on fork"));

        assert_eq!(parent.tree.find_file(id).unwrap().content, "boot();");
        assert!(parent.is_staged(id));
        assert!(parent.commits.is_empty());
    }

    #[test]
    fn reconcile_drops_dangling_ids() {
        let (mut snapshot, id) = snapshot_with_dirty_file();
        snapshot.tree = snapshot.tree.with_removed(id);
        snapshot.reconcile_staged();
        assert!(!snapshot.is_staged(id));
    }

    #[test]
    fn reconcile_drops_clean_files() {
        let (mut snapshot, id) = snapshot_with_dirty_file();
        snapshot.tree = snapshot
            .tree
            .with_updated(id, &FilePatch::status(FileStatus::Unmodified));
        snapshot.reconcile_staged();
        assert!(!snapshot.is_staged(id));
    }

    #[test]
    fn head_is_the_most_recent_commit() {
        let (mut snapshot, _) = snapshot_with_dirty_file();
        snapshot.commits.insert(0, Commit::new("first"));
        snapshot.commits.insert(0, Commit::new("second"));
        assert_eq!(snapshot.head().unwrap().message, "second");
    }
}
