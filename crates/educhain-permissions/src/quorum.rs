//! Majority arithmetic for admission votes.
//!
//! The quorum is the number of participants that hold grant rights at the
//! moment a vote is cast. A target is admitted once approvals strictly
//! exceed half of that quorum:
//!
//! - quorum 0 → no majority possible
//! - quorum n → yes > n / 2 (integer division)
//!
//! An even quorum needs a strict majority; a 50% tie never admits.

/// Smallest approval count that forms a majority of `quorum`.
///
/// Returns 0 when the quorum is empty, since no count can satisfy it.
///
/// # Examples
///
/// ```
/// use educhain_permissions::majority_threshold;
///
/// assert_eq!(majority_threshold(0), 0);
/// assert_eq!(majority_threshold(3), 2);
/// assert_eq!(majority_threshold(4), 3); // a 2-2 tie does not admit
/// ```
pub const fn majority_threshold(quorum: usize) -> usize {
    if quorum == 0 {
        return 0;
    }
    quorum / 2 + 1
}

/// Check whether `yes` approvals form a majority of `quorum`.
pub const fn has_majority(yes: usize, quorum: usize) -> bool {
    quorum > 0 && yes > quorum / 2
}

/// How many more approvals are needed before `yes` reaches a majority.
pub const fn votes_needed(yes: usize, quorum: usize) -> usize {
    let threshold = majority_threshold(quorum);
    if yes >= threshold {
        0
    } else {
        threshold - yes
    }
}
