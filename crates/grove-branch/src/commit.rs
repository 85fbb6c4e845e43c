//! Commit records.

use grove_types::{CommitId, Timestamp};
use serde::{Deserialize, Serialize};

/// A single entry in a branch's history.
///
/// A commit records that the staged changes were settled, carrying only a
/// message and a wall-clock timestamp. It embeds no tree snapshot; the
/// branch's live tree is the state of record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub id: CommitId,
    pub message: String,
    pub timestamp: Timestamp,
}

impl Commit {
    /// A commit stamped with a fresh id and the current wall clock.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: CommitId::new(),
            message: message.into(),
            timestamp: Timestamp::now(),
        }
    }
}
