use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-file lifecycle tag tracking uncommitted change state.
///
/// The status machine is driven exclusively by engine operations:
///
/// ```text
/// Unmodified --edit--> Modified
/// Modified   --edit--> Modified
/// New        --edit--> New
/// Modified   --commit (staged)--> Unmodified
/// New        --commit (staged)--> Unmodified
/// ```
///
/// A freshly created file starts as `New`. There is no deleted status;
/// deletion removes the node from the tree entirely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// The file matches its last committed state.
    #[default]
    Unmodified,
    /// The file has been edited since the last commit.
    Modified,
    /// The file was created after the last commit.
    New,
}

impl FileStatus {
    /// Returns `true` if the file carries uncommitted changes.
    pub fn is_dirty(&self) -> bool {
        !matches!(self, Self::Unmodified)
    }

    /// The status an edit transitions this status into.
    ///
    /// Editing a clean file dirties it; editing an already dirty file
    /// leaves the status unchanged.
    pub fn after_edit(&self) -> Self {
        match self {
            Self::Unmodified => Self::Modified,
            Self::Modified => Self::Modified,
            Self::New => Self::New,
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unmodified => write!(f, "unmodified"),
            Self::Modified => write!(f, "modified"),
            Self::New => write!(f, "new"),
        }
    }
}
