//! Pure queries and transforms over a workspace root.
//!
//! Transforms never mutate the receiver: each returns a fresh root in which
//! only the targeted node differs. Ids that do not occur in the tree make a
//! transform return a structurally equal copy rather than an error.

use std::collections::HashSet;

use grove_types::{FileStatus, Language, NodeId};

use crate::node::{FileNode, FolderNode, Node};

/// A partial update for a single file. Fields left `None` keep the file's
/// current value.
#[derive(Clone, Debug, Default)]
pub struct FilePatch {
    pub name: Option<String>,
    pub language: Option<Language>,
    pub content: Option<String>,
    pub status: Option<FileStatus>,
}

impl FilePatch {
    /// A patch that replaces only the file's content.
    pub fn content(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            ..Self::default()
        }
    }

    /// A patch that replaces only the file's status.
    pub fn status(status: FileStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Add a status change to this patch.
    pub fn with_status(mut self, status: FileStatus) -> Self {
        self.status = Some(status);
        self
    }

    fn apply_to(&self, file: &mut FileNode) {
        if let Some(name) = &self.name {
            file.name = name.clone();
        }
        if let Some(language) = &self.language {
            file.language = language.clone();
        }
        if let Some(content) = &self.content {
            file.content = content.clone();
        }
        if let Some(status) = self.status {
            file.status = status;
        }
    }
}

impl FolderNode {
    // ---- Queries ----

    /// Find a file anywhere under this folder, depth first. The first match
    /// wins; ids are expected to be unique.
    pub fn find_file(&self, id: NodeId) -> Option<&FileNode> {
        for child in &self.children {
            match child {
                Node::File(file) if file.id == id => return Some(file),
                Node::File(_) => {}
                Node::Folder(folder) => {
                    if let Some(found) = folder.find_file(id) {
                        return Some(found);
                    }
                }
            }
        }
        None
    }

    /// Find a folder by id, including this folder itself.
    pub fn find_folder(&self, id: NodeId) -> Option<&FolderNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| match child {
            Node::Folder(folder) => folder.find_folder(id),
            Node::File(_) => None,
        })
    }

    /// Resolve a `/`-separated path (relative to this folder) to a file.
    /// Empty segments are ignored, so `"src/app.ts"` and `"/src//app.ts"`
    /// name the same file.
    pub fn find_by_path(&self, path: &str) -> Option<&FileNode> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let (file_name, folder_names) = segments.split_last()?;
        let mut cursor = self;
        for name in folder_names {
            cursor = cursor.child_folder_named(name)?;
        }
        cursor.children.iter().find_map(|child| match child {
            Node::File(file) if file.name == *file_name => Some(file),
            _ => None,
        })
    }

    /// Resolve a `/`-separated path to a folder. The empty path names this
    /// folder itself.
    pub fn find_folder_by_path(&self, path: &str) -> Option<&FolderNode> {
        let mut cursor = self;
        for name in path.split('/').filter(|s| !s.is_empty()) {
            cursor = cursor.child_folder_named(name)?;
        }
        Some(cursor)
    }

    fn child_folder_named(&self, name: &str) -> Option<&FolderNode> {
        self.children.iter().find_map(|child| match child {
            Node::Folder(folder) if folder.name == name => Some(folder),
            _ => None,
        })
    }

    /// Every file under this folder, in depth-first traversal order.
    pub fn files(&self) -> Vec<&FileNode> {
        let mut out = Vec::new();
        self.collect_files(&mut out);
        out
    }

    fn collect_files<'a>(&'a self, out: &mut Vec<&'a FileNode>) {
        for child in &self.children {
            match child {
                Node::File(file) => out.push(file),
                Node::Folder(folder) => folder.collect_files(out),
            }
        }
    }

    /// Every file whose status is not unmodified, in traversal order.
    pub fn changed_files(&self) -> Vec<&FileNode> {
        self.files().into_iter().filter(|f| f.is_dirty()).collect()
    }

    pub fn file_count(&self) -> usize {
        self.files().len()
    }

    /// Ids of every node in the tree, this folder included.
    pub fn all_ids(&self) -> Vec<NodeId> {
        let mut out = vec![self.id];
        self.collect_ids(&mut out);
        out
    }

    fn collect_ids(&self, out: &mut Vec<NodeId>) {
        for child in &self.children {
            out.push(child.id());
            if let Node::Folder(folder) = child {
                folder.collect_ids(out);
            }
        }
    }

    /// Whether any node in the tree (file or folder, this one included)
    /// carries the id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.id == id
            || self.children.iter().any(|child| match child {
                Node::File(file) => file.id == id,
                Node::Folder(folder) => folder.contains(id),
            })
    }

    // ---- Transforms ----

    /// A new root in which the file carrying `id` has `patch` applied.
    /// Every other node is carried over unchanged.
    pub fn with_updated(&self, id: NodeId, patch: &FilePatch) -> FolderNode {
        let mut next = self.clone();
        next.update_in_place(id, patch);
        next
    }

    fn update_in_place(&mut self, id: NodeId, patch: &FilePatch) -> bool {
        for child in &mut self.children {
            match child {
                Node::File(file) if file.id == id => {
                    patch.apply_to(file);
                    return true;
                }
                Node::File(_) => {}
                Node::Folder(folder) => {
                    if folder.update_in_place(id, patch) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// A new root in which exactly the files whose id is in `ids` carry
    /// `status`. Used to settle staged files after a commit.
    pub fn with_statuses(&self, ids: &HashSet<NodeId>, status: FileStatus) -> FolderNode {
        let mut next = self.clone();
        next.set_statuses_in_place(ids, status);
        next
    }

    fn set_statuses_in_place(&mut self, ids: &HashSet<NodeId>, status: FileStatus) {
        for child in &mut self.children {
            match child {
                Node::File(file) if ids.contains(&file.id) => file.status = status,
                Node::File(_) => {}
                Node::Folder(folder) => folder.set_statuses_in_place(ids, status),
            }
        }
    }

    /// A new root with `node` appended to the children of the folder
    /// carrying `parent_id`. An unknown parent id, or one naming a file,
    /// leaves the result structurally equal to the input.
    pub fn with_inserted(&self, parent_id: NodeId, node: Node) -> FolderNode {
        let mut next = self.clone();
        if let Some(parent) = next.find_folder_mut(parent_id) {
            parent.children.push(node);
        }
        next
    }

    fn find_folder_mut(&mut self, id: NodeId) -> Option<&mut FolderNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| match child {
            Node::Folder(folder) => folder.find_folder_mut(id),
            Node::File(_) => None,
        })
    }

    /// A new root with the node carrying `id` removed, along with its
    /// whole subtree when it is a folder. The root itself cannot be
    /// removed.
    pub fn with_removed(&self, id: NodeId) -> FolderNode {
        let mut next = self.clone();
        next.remove_in_place(id);
        next
    }

    fn remove_in_place(&mut self, id: NodeId) -> bool {
        let before = self.children.len();
        self.children.retain(|child| child.id() != id);
        if self.children.len() != before {
            return true;
        }
        self.children.iter_mut().any(|child| match child {
            Node::Folder(folder) => folder.remove_in_place(id),
            Node::File(_) => false,
        })
    }
}
