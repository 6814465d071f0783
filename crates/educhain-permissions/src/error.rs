//! Error types for educhain-permissions.

use thiserror::Error;

/// Result type for permission manager operations.
pub type Result<T> = std::result::Result<T, PermissionError>;

/// Errors returned by the permission manager.
///
/// None of these are fatal: the registry stays usable after any rejected
/// operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// A participant identity was empty.
    #[error("participant id must not be empty")]
    EmptyId,

    /// Admission requested for an identity that is already registered.
    #[error("participant already exists: {0}")]
    AlreadyExists(String),

    /// The voter is unknown or does not currently hold grant rights.
    #[error("voter not authorized to grant: {0}")]
    VoterNotAuthorized(String),

    /// A vote was cast for an unregistered target.
    #[error("vote target not found: {0}")]
    TargetNotFound(String),

    /// No granting participants exist, so no majority can be formed.
    #[error("no granting participants available")]
    NoQuorum,

    /// Query for an unregistered identity.
    #[error("participant not found: {0}")]
    NotFound(String),
}

impl PermissionError {
    /// Whether a caller may reasonably retry after fixing its input.
    ///
    /// `NoQuorum` means the network was never seeded; nothing changes until an
    /// operator reseeds it.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, PermissionError::NoQuorum)
    }
}
