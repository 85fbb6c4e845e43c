//! The active-file tracker.
//!
//! The editing surface renders one file at a time. The tracker remembers
//! which one by id and keeps a copied-out [`FileNode`] so rendering never
//! needs another tree walk. The id is the authority; the cache is
//! refreshed from the tree after every mutation and branch switch.

use grove_tree::{FileNode, FolderNode};
use grove_types::NodeId;

/// Tracks which file is open, if any, with a render cache.
#[derive(Debug)]
pub struct ActiveFileTracker {
    open: Option<NodeId>,
    cache: Option<FileNode>,
    fallback_path: String,
}

impl ActiveFileTracker {
    /// A tracker with nothing open. `fallback_path` is the file opened
    /// when the tracked one vanishes (or nothing was ever opened).
    pub fn new(fallback_path: impl Into<String>) -> Self {
        Self {
            open: None,
            cache: None,
            fallback_path: fallback_path.into(),
        }
    }

    /// Id of the open file, if any.
    pub fn open_id(&self) -> Option<NodeId> {
        self.open
    }

    /// The open file's last-known fields.
    pub fn open_file(&self) -> Option<&FileNode> {
        self.cache.as_ref()
    }

    /// Point the tracker at a file. Returns `true` when the open identity
    /// changed; a re-open of the same file only refreshes the cache.
    pub fn open(&mut self, file: &FileNode) -> bool {
        let changed = self.open != Some(file.id);
        self.open = Some(file.id);
        self.cache = Some(file.clone());
        changed
    }

    /// Re-resolve against a tree after it changed underneath us.
    ///
    /// When the tracked id still resolves, that tree's version of the
    /// file is adopted into the cache and the identity is unchanged.
    /// Otherwise the tracker falls back to its fallback path, or to
    /// nothing open when that is missing too. Returns `true` when the
    /// open identity changed.
    pub fn resolve(&mut self, tree: &FolderNode) -> bool {
        if let Some(id) = self.open {
            if let Some(file) = tree.find_file(id) {
                self.cache = Some(file.clone());
                return false;
            }
        }
        let before = self.open;
        match tree.find_by_path(&self.fallback_path) {
            Some(file) => {
                self.open = Some(file.id);
                self.cache = Some(file.clone());
            }
            None => {
                self.open = None;
                self.cache = None;
            }
        }
        self.open != before
    }
}

#[cfg(test)]
mod tests {
    use grove_tree::{FilePatch, FolderNode};

    use super::*;

    fn tree_with_entry() -> (FolderNode, NodeId, NodeId) {
        let entry = FileNode::pristine("index.ts", "boot();");
        let other = FileNode::pristine("notes.md", "# notes");
        let (entry_id, other_id) = (entry.id, other.id);
        let root = FolderNode::new("workspace")
            .with_child(other)
            .with_child(FolderNode::new("src").with_child(entry));
        (root, entry_id, other_id)
    }

    fn tracker() -> ActiveFileTracker {
        ActiveFileTracker::new("src/index.ts")
    }

    #[test]
    fn fresh_tracker_resolves_to_the_fallback() {
        let (tree, entry_id, _) = tree_with_entry();
        let mut tracker = tracker();
        assert!(tracker.open_id().is_none());

        let changed = tracker.resolve(&tree);
        assert!(changed);
        assert_eq!(tracker.open_id(), Some(entry_id));
        assert_eq!(tracker.open_file().unwrap().name, "index.ts");
    }

    #[test]
    fn open_switches_identity_and_caches() {
        let (tree, _, other_id) = tree_with_entry();
        let mut tracker = tracker();
        tracker.resolve(&tree);

        let file = tree.find_file(other_id).unwrap();
        assert!(tracker.open(file));
        assert_eq!(tracker.open_id(), Some(other_id));
        // Re-opening the same file is not an identity change.
        assert!(!tracker.open(file));
    }

    #[test]
    fn resolve_refreshes_the_cache_without_identity_change() {
        let (tree, entry_id, _) = tree_with_entry();
        let mut tracker = tracker();
        tracker.resolve(&tree);

        let edited = tree.with_updated(entry_id, &FilePatch::content("launch();"));
        let changed = tracker.resolve(&edited);
        assert!(!changed);
        assert_eq!(tracker.open_file().unwrap().content, "launch();");
    }

    #[test]
    fn vanished_file_falls_back_to_the_entry_path() {
        let (tree, entry_id, other_id) = tree_with_entry();
        let mut tracker = tracker();
        tracker.open(tree.find_file(other_id).unwrap());

        let without_other = tree.with_removed(other_id);
        let changed = tracker.resolve(&without_other);
        assert!(changed);
        assert_eq!(tracker.open_id(), Some(entry_id));
    }

    #[test]
    fn missing_fallback_leaves_nothing_open() {
        let (tree, entry_id, _) = tree_with_entry();
        let mut tracker = tracker();
        tracker.resolve(&tree);

        let empty = tree.with_removed(entry_id);
        let changed = tracker.resolve(&empty);
        assert!(changed);
        assert!(tracker.open_id().is_none());
        assert!(tracker.open_file().is_none());
    }
}
