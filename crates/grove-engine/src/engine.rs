//! The operation surface.

use std::collections::HashSet;

use grove_branch::{BranchSnapshot, BranchStore, Commit};
use grove_persist::StateStore;
use grove_tree::starter::ENTRY_PATH;
use grove_tree::{FileNode, FilePatch, FolderNode};
use grove_types::{FileStatus, NodeId};
use tracing::{debug, warn};

use crate::active::ActiveFileTracker;
use crate::advice::{AdviceGate, AdviceRequest, AdviceTicket};
use crate::error::{EngineError, Result};
use crate::views::{BranchStatus, StatusEntry};

/// The version-control engine.
///
/// Holds the branch store, the active-file tracker, and an optional
/// persistence handle. Every operation names its target branch; the
/// store's current branch is consulted only by [`Engine::switch_branch`]
/// and the views. Operations run synchronously to completion, so each
/// call observes the previous one's full effect.
///
/// After every mutation the engine refreshes the tracker against the
/// current branch's tree and offers the whole store to persistence. A
/// failed save is logged and swallowed; the in-memory state is already
/// committed and is never rolled back.
pub struct Engine {
    store: BranchStore,
    tracker: ActiveFileTracker,
    gate: AdviceGate,
    persist: Option<Box<dyn StateStore>>,
}

impl Engine {
    /// An engine over an existing store, without persistence.
    pub fn new(store: BranchStore) -> Self {
        Self::build(store, None)
    }

    /// An engine that offers every state change to `persist`.
    pub fn with_persistence(store: BranchStore, persist: Box<dyn StateStore>) -> Self {
        Self::build(store, Some(persist))
    }

    fn build(store: BranchStore, persist: Option<Box<dyn StateStore>>) -> Self {
        let mut tracker = ActiveFileTracker::new(ENTRY_PATH);
        if let Some(snapshot) = store.current() {
            tracker.resolve(&snapshot.tree);
        }
        Self {
            store,
            tracker,
            gate: AdviceGate::new(),
            persist,
        }
    }

    fn snapshot(&self, branch: &str) -> Result<&BranchSnapshot> {
        self.store.get(branch).ok_or_else(|| EngineError::BranchNotFound {
            name: branch.to_string(),
        })
    }

    fn snapshot_mut(&mut self, branch: &str) -> Result<&mut BranchSnapshot> {
        self.store.get_mut(branch).ok_or_else(|| EngineError::BranchNotFound {
            name: branch.to_string(),
        })
    }

    /// Runs after a successful mutation: refresh the tracker against the
    /// current branch's tree, invalidate advice tickets when the open
    /// file's identity moved, and offer the store to persistence.
    fn finish_mutation(&mut self) {
        if let Some(snapshot) = self.store.current() {
            if self.tracker.resolve(&snapshot.tree) {
                self.gate.advance();
            }
        }
        self.offer_save();
    }

    fn offer_save(&self) {
        if let Some(persist) = &self.persist {
            if let Err(error) = persist.save(&self.store) {
                warn!(%error, "failed to persist state; continuing in memory");
            }
        }
    }

    // ---- Editing operations ----

    /// Replace a file's content. A clean file becomes modified; modified
    /// and new files keep their status. An id that no longer resolves is
    /// ignored.
    pub fn edit(&mut self, branch: &str, id: NodeId, content: impl Into<String>) -> Result<()> {
        let snapshot = self.snapshot_mut(branch)?;
        let Some(file) = snapshot.tree.find_file(id) else {
            debug!(branch, file = %id.short_id(), "edit target missing; ignoring");
            return Ok(());
        };
        let status = file.status.after_edit();
        let patch = FilePatch::content(content).with_status(status);
        snapshot.tree = snapshot.tree.with_updated(id, &patch);
        debug!(branch, file = %id.short_id(), status = %status, "file edited");
        self.finish_mutation();
        Ok(())
    }

    /// Add a file under a parent folder. New files start as changes and
    /// derive their language from the name. The name must be free within
    /// the parent.
    pub fn create_file(
        &mut self,
        branch: &str,
        parent: NodeId,
        name: &str,
        content: impl Into<String>,
    ) -> Result<NodeId> {
        let name = usable_node_name(name)?;
        let snapshot = self.snapshot_mut(branch)?;
        let Some(folder) = snapshot.tree.find_folder(parent) else {
            return Err(EngineError::ParentNotFound { id: parent });
        };
        reserve_child_name(folder, name)?;
        let file = FileNode::new(name, content);
        let id = file.id;
        snapshot.tree = snapshot.tree.with_inserted(parent, file.into());
        debug!(branch, file = %id.short_id(), name, "file created");
        self.finish_mutation();
        Ok(id)
    }

    /// Add an empty folder under a parent folder. The name must be free
    /// within the parent.
    pub fn create_folder(&mut self, branch: &str, parent: NodeId, name: &str) -> Result<NodeId> {
        let name = usable_node_name(name)?;
        let snapshot = self.snapshot_mut(branch)?;
        let Some(target) = snapshot.tree.find_folder(parent) else {
            return Err(EngineError::ParentNotFound { id: parent });
        };
        reserve_child_name(target, name)?;
        let folder = FolderNode::new(name);
        let id = folder.id;
        snapshot.tree = snapshot.tree.with_inserted(parent, folder.into());
        debug!(branch, folder = %id.short_id(), name, "folder created");
        self.finish_mutation();
        Ok(id)
    }

    /// Remove a file, or a folder with its whole subtree. Staged ids
    /// that no longer resolve are dropped. Unknown ids and the root are
    /// ignored.
    pub fn delete(&mut self, branch: &str, id: NodeId) -> Result<()> {
        let snapshot = self.snapshot_mut(branch)?;
        if id == snapshot.tree.id || !snapshot.tree.contains(id) {
            debug!(branch, node = %id.short_id(), "delete target missing; ignoring");
            return Ok(());
        }
        snapshot.tree = snapshot.tree.with_removed(id);
        snapshot.reconcile_staged();
        debug!(branch, node = %id.short_id(), "node removed");
        self.finish_mutation();
        Ok(())
    }

    // ---- Staging operations ----

    /// Mark a file for the next commit. Only dirty files can be staged;
    /// clean and unknown ids are left alone.
    pub fn stage(&mut self, branch: &str, id: NodeId) -> Result<()> {
        let snapshot = self.snapshot_mut(branch)?;
        let dirty = snapshot.tree.find_file(id).is_some_and(FileNode::is_dirty);
        if !dirty {
            debug!(branch, file = %id.short_id(), "stage ignored; file clean or missing");
            return Ok(());
        }
        if snapshot.staged.insert(id) {
            debug!(branch, file = %id.short_id(), "file staged");
            self.finish_mutation();
        }
        Ok(())
    }

    /// Unmark a file for the next commit. The file keeps its status.
    pub fn unstage(&mut self, branch: &str, id: NodeId) -> Result<()> {
        let snapshot = self.snapshot_mut(branch)?;
        if snapshot.staged.remove(&id) {
            debug!(branch, file = %id.short_id(), "file unstaged");
            self.finish_mutation();
        }
        Ok(())
    }

    /// Stage exactly the current set of changed files, replacing whatever
    /// was staged before. Returns how many files are now staged.
    pub fn stage_all(&mut self, branch: &str) -> Result<usize> {
        let snapshot = self.snapshot_mut(branch)?;
        let next: HashSet<NodeId> = snapshot.tree.changed_files().iter().map(|f| f.id).collect();
        let count = next.len();
        if snapshot.staged != next {
            snapshot.staged = next;
            debug!(branch, count, "staged all changes");
            self.finish_mutation();
        }
        Ok(count)
    }

    // ---- Commit operations ----

    /// Settle the staged files into a new commit. The message must not be
    /// blank and something must be staged; a rejected commit leaves the
    /// branch untouched. On success the staged files become unmodified,
    /// the staged set empties, and the commit leads the log.
    pub fn commit(&mut self, branch: &str, message: &str) -> Result<Commit> {
        let message = message.trim();
        if message.is_empty() {
            return Err(EngineError::BlankCommitMessage);
        }
        let snapshot = self.snapshot_mut(branch)?;
        if snapshot.staged.is_empty() {
            return Err(EngineError::NothingStaged);
        }
        let commit = Commit::new(message);
        snapshot.tree = snapshot
            .tree
            .with_statuses(&snapshot.staged, FileStatus::Unmodified);
        snapshot.staged.clear();
        snapshot.commits.insert(0, commit.clone());
        debug!(branch, commit = %commit.id.short_id(), "commit recorded");
        self.finish_mutation();
        Ok(commit)
    }

    // ---- Branch operations ----

    /// Fork a branch: the new branch receives a full copy of the source
    /// snapshot (tree, staged set, and history) and becomes current.
    pub fn create_branch(&mut self, from: &str, name: &str) -> Result<()> {
        let fork = self.snapshot(from)?.fork();
        self.store.insert(name, fork)?;
        self.store.set_current(name)?;
        debug!(from, branch = name, "branch created");
        self.finish_mutation();
        Ok(())
    }

    /// Switch the UI to another branch. Unknown names and the current
    /// name are silent no-ops. Returns whether a switch happened; no
    /// snapshot is mutated either way.
    pub fn switch_branch(&mut self, name: &str) -> bool {
        if name == self.store.current_name() || !self.store.contains(name) {
            debug!(branch = name, "switch ignored");
            return false;
        }
        if self.store.set_current(name).is_err() {
            return false;
        }
        debug!(branch = name, "switched branch");
        self.finish_mutation();
        true
    }

    /// Remove a branch. The last branch cannot be removed; removing the
    /// current branch moves the UI to another one.
    pub fn remove_branch(&mut self, name: &str) -> Result<()> {
        self.store.remove(name)?;
        debug!(branch = name, "branch removed");
        self.finish_mutation();
        Ok(())
    }

    /// Open a file for the editing surface. Unknown ids are ignored.
    pub fn open_file(&mut self, branch: &str, id: NodeId) -> Result<()> {
        let snapshot = self.store.get(branch).ok_or_else(|| EngineError::BranchNotFound {
            name: branch.to_string(),
        })?;
        let Some(file) = snapshot.tree.find_file(id) else {
            debug!(branch, file = %id.short_id(), "open target missing; ignoring");
            return Ok(());
        };
        if self.tracker.open(file) {
            self.gate.advance();
        }
        Ok(())
    }

    // ---- Views ----

    /// The branch the UI is on.
    pub fn current_branch(&self) -> &str {
        self.store.current_name()
    }

    /// Names of every branch, sorted.
    pub fn branch_names(&self) -> Vec<&str> {
        self.store.names()
    }

    /// Read-only root of a branch's tree, for rendering and shell-style
    /// consumers. No mutation path hangs off this reference.
    pub fn tree(&self, branch: &str) -> Result<&FolderNode> {
        Ok(&self.snapshot(branch)?.tree)
    }

    /// A branch's commits, most recent first.
    pub fn commits(&self, branch: &str) -> Result<&[Commit]> {
        Ok(&self.snapshot(branch)?.commits)
    }

    /// Copies of every changed file, in tree order.
    pub fn changed_files(&self, branch: &str) -> Result<Vec<FileNode>> {
        let snapshot = self.snapshot(branch)?;
        Ok(snapshot.tree.changed_files().into_iter().cloned().collect())
    }

    /// Copies of the changed files marked for the next commit.
    pub fn staged_files(&self, branch: &str) -> Result<Vec<FileNode>> {
        let snapshot = self.snapshot(branch)?;
        Ok(snapshot
            .tree
            .changed_files()
            .into_iter()
            .filter(|f| snapshot.is_staged(f.id))
            .cloned()
            .collect())
    }

    /// Copies of the changed files not marked for the next commit.
    pub fn unstaged_files(&self, branch: &str) -> Result<Vec<FileNode>> {
        let snapshot = self.snapshot(branch)?;
        Ok(snapshot
            .tree
            .changed_files()
            .into_iter()
            .filter(|f| !snapshot.is_staged(f.id))
            .cloned()
            .collect())
    }

    /// A fresh status report for a branch.
    pub fn status(&self, branch: &str) -> Result<BranchStatus> {
        let snapshot = self.snapshot(branch)?;
        let entries = snapshot
            .tree
            .changed_files()
            .into_iter()
            .map(|f| StatusEntry {
                id: f.id,
                name: f.name.clone(),
                status: f.status,
                staged: snapshot.is_staged(f.id),
            })
            .collect();
        Ok(BranchStatus {
            branch: branch.to_string(),
            entries,
            commit_count: snapshot.commits.len(),
        })
    }

    /// The open file's last-known fields, if a file is open.
    pub fn active_file(&self) -> Option<&FileNode> {
        self.tracker.open_file()
    }

    // ---- Advice boundary ----

    /// Build an advice request about the open file, stamped against the
    /// current advice epoch. `None` when no file is open.
    pub fn request_advice(&self, question: Option<String>) -> Option<(AdviceRequest, AdviceTicket)> {
        let file = self.tracker.open_file()?;
        let request = AdviceRequest {
            language: file.language.clone(),
            code: file.content.clone(),
            question,
        };
        Some((request, self.gate.ticket()))
    }

    /// Accept an advice reply, unless the open file changed since its
    /// ticket was issued. Stale replies are dropped, not errors.
    pub fn admit_advice(&self, ticket: AdviceTicket, reply: String) -> Option<String> {
        let admitted = self.gate.admit(ticket, reply);
        if admitted.is_none() {
            debug!("stale advice reply dropped");
        }
        admitted
    }
}

/// File and folder names must be non-blank and free of path separators.
fn usable_node_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidNodeName {
            name: name.to_string(),
            reason: "must not be blank".into(),
        });
    }
    if trimmed.contains('/') {
        return Err(EngineError::InvalidNodeName {
            name: name.to_string(),
            reason: "must not contain '/'".into(),
        });
    }
    Ok(trimmed)
}

/// Names are unique among siblings, counting files and folders alike.
fn reserve_child_name(parent: &FolderNode, name: &str) -> Result<()> {
    if parent.children.iter().any(|child| child.name() == name) {
        return Err(EngineError::NodeAlreadyExists {
            name: name.to_string(),
        });
    }
    Ok(())
}
