//! Network participants.

use crate::error::{PermissionError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Caller-supplied participant identity.
///
/// Opaque apart from being non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Create an identity, rejecting the empty string.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(PermissionError::EmptyId);
        }
        Ok(Self(id))
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ParticipantId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ParticipantId {
    type Error = PermissionError;

    fn try_from(id: String) -> Result<Self> {
        Self::new(id)
    }
}

impl From<ParticipantId> for String {
    fn from(id: ParticipantId) -> Self {
        id.0
    }
}

/// Registry record for one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    pub id: ParticipantId,
    /// May cast admission votes and counts toward the quorum.
    pub can_grant: bool,
    /// Admitted by majority vote rather than seeded at genesis.
    pub has_vote: bool,
}

impl Participant {
    /// A genesis participant, granting from the start.
    pub fn seed(id: ParticipantId) -> Self {
        Self {
            id,
            can_grant: true,
            has_vote: false,
        }
    }

    /// A participant awaiting admission.
    pub fn pending(id: ParticipantId) -> Self {
        Self {
            id,
            can_grant: false,
            has_vote: false,
        }
    }

    /// Promote to granting after a successful vote. Returns true if this
    /// call changed the state. Already-granting participants, seeds
    /// included, are left untouched.
    pub(crate) fn grant(&mut self) -> bool {
        if self.can_grant {
            return false;
        }
        self.has_vote = true;
        self.can_grant = true;
        true
    }
}
