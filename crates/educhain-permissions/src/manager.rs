//! The permission manager.
//!
//! Owns the participant registry and the vote ledger behind a single
//! exclusive lock. Every operation holds the lock for its full duration, so
//! admissions, votes and queries are linearizable with respect to each other
//! and quorum recomputation always sees a consistent snapshot.
//!
//! State is process-lifetime only; nothing is persisted.

use crate::error::{PermissionError, Result};
use crate::ledger::VoteLedger;
use crate::participant::{Participant, ParticipantId};
use crate::quorum::{has_majority, majority_threshold, votes_needed};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

/// Live vote count for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub target: ParticipantId,
    /// Distinct voters currently approving.
    pub yes: usize,
    /// Distinct voters currently rejecting.
    pub no: usize,
    /// Granting participants right now.
    pub quorum: usize,
    /// Approvals needed for a majority of `quorum`.
    pub threshold: usize,
    /// Further approvals still required; 0 once granted.
    pub needed: usize,
    /// Whether the target currently holds grant rights.
    pub granted: bool,
}

#[derive(Debug, Default)]
struct Registry {
    participants: HashMap<ParticipantId, Participant>,
    ledger: VoteLedger,
}

impl Registry {
    fn quorum_size(&self) -> usize {
        self.participants.values().filter(|p| p.can_grant).count()
    }

    fn get(&self, id: &str) -> Result<&Participant> {
        self.participants
            .get(id)
            .ok_or_else(|| PermissionError::NotFound(id.to_string()))
    }

    fn sorted_ids(&self, can_grant: bool) -> Vec<ParticipantId> {
        let mut ids: Vec<_> = self
            .participants
            .values()
            .filter(|p| p.can_grant == can_grant)
            .map(|p| p.id.clone())
            .collect();
        ids.sort();
        ids
    }
}

/// Quorum-based admission control for a permissioned network.
///
/// Construct one per service and share it by reference (or `Arc`) with
/// every caller.
#[derive(Debug, Default)]
pub struct PermissionManager {
    registry: Mutex<Registry>,
}

impl PermissionManager {
    /// Create a manager whose seed participants hold grant rights from the
    /// start. Duplicate seeds collapse into one participant.
    pub fn new<I, S>(seeds: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Registry::default();
        for seed in seeds {
            let id = ParticipantId::new(seed)?;
            registry
                .participants
                .entry(id.clone())
                .or_insert_with(|| Participant::seed(id));
        }
        info!("Permission manager seeded with {} participants", registry.participants.len());

        Ok(Self {
            registry: Mutex::new(registry),
        })
    }

    /// Register a new pending participant.
    pub fn request_admission(&self, id: impl Into<String>) -> Result<()> {
        let id = ParticipantId::new(id)?;
        let mut registry = self.registry.lock();

        if registry.participants.contains_key(&id) {
            return Err(PermissionError::AlreadyExists(id.into_inner()));
        }

        registry.ledger.open(id.clone());
        registry
            .participants
            .insert(id.clone(), Participant::pending(id.clone()));
        debug!("Admission requested: {}", id);
        Ok(())
    }

    /// Record `voter`'s decision on `target` and admit the target once a
    /// majority of the live quorum approves.
    pub fn cast_vote(
        &self,
        target: impl AsRef<str>,
        voter: impl AsRef<str>,
        approve: bool,
    ) -> Result<()> {
        let (target, voter) = (target.as_ref(), voter.as_ref());
        let mut guard = self.registry.lock();
        let registry = &mut *guard;

        let voter_id = match registry.participants.get(voter) {
            Some(p) if p.can_grant => p.id.clone(),
            _ => return Err(PermissionError::VoterNotAuthorized(voter.to_string())),
        };
        let target_id = match registry.participants.get(target) {
            Some(p) => p.id.clone(),
            None => return Err(PermissionError::TargetNotFound(target.to_string())),
        };

        // The voter is granting, so the quorum is at least 1 here. An empty
        // quorum still fails closed. Recording never changes the quorum, so
        // checking first leaves the ledger untouched on failure.
        let quorum = registry.quorum_size();
        if quorum == 0 {
            return Err(PermissionError::NoQuorum);
        }

        let previous = registry.ledger.record(target_id, voter_id, approve);
        let yes = registry.ledger.approvals(target);
        debug!(
            "Vote {} → {}: approve={} (was {:?}, {}/{} yes)",
            voter, target, approve, previous, yes, quorum
        );

        if has_majority(yes, quorum) {
            if let Some(participant) = registry.participants.get_mut(target) {
                if participant.grant() {
                    info!("Participant granted: {} ({} of {} approved)", target, yes, quorum);
                }
            }
        }

        Ok(())
    }

    /// Whether `id` currently holds grant rights.
    pub fn check_permission(&self, id: impl AsRef<str>) -> Result<bool> {
        let registry = self.registry.lock();
        registry.get(id.as_ref()).map(|p| p.can_grant)
    }

    /// Snapshot of a participant record.
    pub fn participant(&self, id: impl AsRef<str>) -> Result<Participant> {
        let registry = self.registry.lock();
        registry.get(id.as_ref()).cloned()
    }

    /// Live tally for `target`, computed against the current quorum.
    pub fn tally(&self, target: impl AsRef<str>) -> Result<Tally> {
        let target = target.as_ref();
        let registry = self.registry.lock();
        let participant = registry.get(target)?;
        let quorum = registry.quorum_size();
        let yes = registry.ledger.approvals(target);
        let granted = participant.can_grant;

        Ok(Tally {
            target: participant.id.clone(),
            yes,
            no: registry.ledger.rejections(target),
            quorum,
            threshold: majority_threshold(quorum),
            needed: if granted { 0 } else { votes_needed(yes, quorum) },
            granted,
        })
    }

    /// Granting participants, sorted by id.
    pub fn granting(&self) -> Vec<ParticipantId> {
        self.registry.lock().sorted_ids(true)
    }

    /// Participants still awaiting admission, sorted by id.
    pub fn pending(&self) -> Vec<ParticipantId> {
        self.registry.lock().sorted_ids(false)
    }

    /// Number of participants that currently hold grant rights.
    pub fn quorum_size(&self) -> usize {
        self.registry.lock().quorum_size()
    }
}
