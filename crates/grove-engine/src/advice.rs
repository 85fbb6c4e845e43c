//! The boundary with the inference collaborator.
//!
//! Advice about a file is computed elsewhere and may arrive long after it
//! was requested. By then the user may be looking at a different file, so
//! every request carries an [`AdviceTicket`] stamped with the epoch of
//! the file that was open. Replies whose ticket is stale are dropped;
//! nothing here ever feeds a reply back into the tree.

use grove_types::Language;

/// What the inference collaborator is asked about. The engine fills
/// `language` and `code` from the open file; the reply is free text and
/// advisory only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdviceRequest {
    pub language: Language,
    pub code: String,
    pub question: Option<String>,
}

/// Proof of which open-file epoch a request was issued under. Cheap to
/// copy and carry across an async boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdviceTicket {
    epoch: u64,
}

/// Admits advice replies only while the file they were computed for is
/// still the open one.
///
/// The epoch advances on every change of open-file identity; content
/// edits to the same file do not advance it.
#[derive(Debug, Default)]
pub struct AdviceGate {
    epoch: u64,
}

impl AdviceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate every outstanding ticket. Called when the open file's
    /// identity changes.
    pub fn advance(&mut self) {
        self.epoch += 1;
    }

    /// Stamp a request against the current epoch.
    pub fn ticket(&self) -> AdviceTicket {
        AdviceTicket { epoch: self.epoch }
    }

    /// Whether a ticket was issued under the current epoch.
    pub fn is_current(&self, ticket: AdviceTicket) -> bool {
        ticket.epoch == self.epoch
    }

    /// Pass `reply` through, unless the ticket has gone stale.
    pub fn admit(&self, ticket: AdviceTicket, reply: String) -> Option<String> {
        self.is_current(ticket).then_some(reply)
    }
}
