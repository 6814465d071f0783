//! Educhain Admission Control
//!
//! Decides who may join the permissioned network and who may vote on future
//! admissions.
//!
//! # Model
//!
//! Every participant is either **granting** (may vote, counts toward the
//! quorum) or **pending**. Seed participants are granting from genesis; a
//! participant that requests admission starts pending.
//!
//! ```text
//! Pending { can_grant: false } ──(majority of live quorum approves)──▶ Granting
//! ```
//!
//! Granting is terminal: nothing in the voting path revokes it.
//!
//! # Live Quorum
//!
//! The quorum for a vote is the number of granting participants *when that
//! vote is cast*, not when the target requested admission. A target is
//! admitted once `yes > quorum / 2`. Each voter holds one decision per
//! target; voting again replaces it.
//!
//! # Example
//!
//! ```
//! use educhain_permissions::PermissionManager;
//!
//! let pm = PermissionManager::new(["A", "B", "C"])?;
//! pm.request_admission("D")?;
//!
//! pm.cast_vote("D", "A", true)?;
//! assert!(!pm.check_permission("D")?);
//!
//! pm.cast_vote("D", "B", true)?;
//! assert!(pm.check_permission("D")?);
//! # Ok::<(), educhain_permissions::PermissionError>(())
//! ```

mod error;
mod ledger;
mod manager;
mod participant;
mod quorum;

pub use error::{PermissionError, Result};
pub use manager::{PermissionManager, Tally};
pub use participant::{Participant, ParticipantId};
pub use quorum::{has_majority, majority_threshold, votes_needed};
