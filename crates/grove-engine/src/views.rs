//! Derived status views.
//!
//! These types are the result of inspecting one branch's snapshot at a
//! point in time. They are rebuilt on every call and never stored, so
//! they cannot drift from the snapshot they describe.

use grove_types::{FileStatus, NodeId};

/// Complete working status of one branch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchStatus {
    /// The branch this report describes.
    pub branch: String,
    /// Every changed file, in tree traversal order.
    pub entries: Vec<StatusEntry>,
    /// Number of commits in the branch's history.
    pub commit_count: usize,
}

impl BranchStatus {
    /// Returns `true` when no file carries a change.
    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }

    /// Changed files marked for the next commit.
    pub fn staged(&self) -> impl Iterator<Item = &StatusEntry> {
        self.entries.iter().filter(|e| e.staged)
    }

    /// Changed files not marked for the next commit.
    pub fn unstaged(&self) -> impl Iterator<Item = &StatusEntry> {
        self.entries.iter().filter(|e| !e.staged)
    }

    /// Returns `true` if at least one change is staged.
    pub fn has_staged_changes(&self) -> bool {
        self.entries.iter().any(|e| e.staged)
    }
}

/// A single changed file in a status report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusEntry {
    pub id: NodeId,
    pub name: String,
    pub status: FileStatus,
    /// Whether the file is marked for the next commit.
    pub staged: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, status: FileStatus, staged: bool) -> StatusEntry {
        StatusEntry {
            id: NodeId::new(),
            name: name.to_string(),
            status,
            staged,
        }
    }

    #[test]
    fn empty_report_is_clean() {
        let report = BranchStatus {
            branch: "main".into(),
            entries: Vec::new(),
            commit_count: 0,
        };
        assert!(report.is_clean());
        assert!(!report.has_staged_changes());
    }

    #[test]
    fn staged_and_unstaged_partition_the_entries() {
        let report = BranchStatus {
            branch: "main".into(),
            entries: vec![
                entry("a.ts", FileStatus::Modified, true),
                entry("b.ts", FileStatus::New, false),
                entry("c.ts", FileStatus::Modified, true),
            ],
            commit_count: 2,
        };
        assert!(!report.is_clean());
        assert!(report.has_staged_changes());
        let staged: Vec<&str> = report.staged().map(|e| e.name.as_str()).collect();
        let unstaged: Vec<&str> = report.unstaged().map(|e| e.name.as_str()).collect();
        assert_eq!(staged, vec!["a.ts", "c.ts"]);
        assert_eq!(unstaged, vec!["b.ts"]);
    }
}
