//! Vote ledger.
//!
//! For each target, the most recent decision of every voter. Re-voting
//! overwrites the stored decision (last-write-wins), so counts are over
//! distinct voters, never over vote events.

use crate::participant::ParticipantId;
use std::collections::HashMap;

/// Per-target map of voter → approve.
#[derive(Debug, Default)]
pub(crate) struct VoteLedger {
    entries: HashMap<ParticipantId, HashMap<ParticipantId, bool>>,
}

impl VoteLedger {
    /// Ensure an (empty) entry exists for `target`.
    pub fn open(&mut self, target: ParticipantId) {
        self.entries.entry(target).or_default();
    }

    /// Record `voter`'s decision on `target`.
    /// Returns the decision it replaced, if any.
    pub fn record(
        &mut self,
        target: ParticipantId,
        voter: ParticipantId,
        approve: bool,
    ) -> Option<bool> {
        self.entries.entry(target).or_default().insert(voter, approve)
    }

    /// Distinct voters currently approving `target`.
    pub fn approvals(&self, target: &str) -> usize {
        self.count(target, true)
    }

    /// Distinct voters currently rejecting `target`.
    pub fn rejections(&self, target: &str) -> usize {
        self.count(target, false)
    }

    fn count(&self, target: &str, approve: bool) -> usize {
        self.entries
            .get(target)
            .map(|votes| votes.values().filter(|v| **v == approve).count())
            .unwrap_or(0)
    }
}
