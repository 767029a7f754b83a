//! # Domain Invariants
//!
//! Critical invariants that MUST hold across every registry mutation.
//! These are pure checks over state snapshots, used by tests and by the
//! service's optional post-mutation audit.
//!
//! | ID | Invariant |
//! |----|-----------|
//! | INVARIANT-1 | Existence is range-based: `exists(t)` iff `1 <= t <= highest` |
//! | INVARIANT-2 | Consumability flags never change after issuance |
//! | INVARIANT-3 | Status histories only grow; recorded entries never change |
//! | INVARIANT-4 | Timestamps within one history are non-decreasing |
//! | INVARIANT-5 | Every allocated identifier has a metadata row |

use crate::domain::entities::RegistryState;
use crate::domain::value_objects::TokenId;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// INVARIANT-1: Existence is range-based.
///
/// No table may hold a row for an identifier outside `[1, highest]`,
/// and the sentinel never exists.
#[must_use]
pub fn check_existence_invariant(state: &RegistryState) -> bool {
    if state.exists(TokenId::NONE) {
        return false;
    }
    state
        .token_ids()
        .all(|id| id.raw() >= 1 && id.raw() <= state.highest_allocated())
}

/// INVARIANT-2: Consumability flags never change after issuance.
///
/// Compares two snapshots taken around a mutation: every flag present
/// before must be present and identical after.
#[must_use]
pub fn check_flag_immutability_invariant(before: &RegistryState, after: &RegistryState) -> bool {
    before
        .token_ids()
        .all(|id| before.consumable(id) == after.consumable(id))
}

/// INVARIANT-3: Status histories only grow.
///
/// Every history present before must be a prefix of the corresponding
/// history after.
#[must_use]
pub fn check_history_growth_invariant(before: &RegistryState, after: &RegistryState) -> bool {
    before.token_ids().all(|id| {
        let Some(old) = before.status_history(id) else {
            return true;
        };
        match after.status_history(id) {
            Some(new) => {
                new.len() >= old.len() && new.entries()[..old.len()] == *old.entries()
            }
            None => false,
        }
    })
}

/// INVARIANT-4: Timestamps within one history are non-decreasing.
///
/// Repeats are allowed (two appends within the same atomic time unit).
#[must_use]
pub fn check_history_ordering_invariant(state: &RegistryState) -> bool {
    state.token_ids().all(|id| {
        state.status_history(id).is_none_or(|history| {
            history
                .entries()
                .windows(2)
                .all(|pair| pair[0].timestamp <= pair[1].timestamp)
        })
    })
}

/// INVARIANT-5: Every allocated identifier has flag and metadata rows.
///
/// Issuance records the identifier, the flag, and the URI in one atomic
/// step, so a gap means a torn issuance.
#[must_use]
pub fn check_issuance_completeness_invariant(state: &RegistryState) -> bool {
    (1..=state.highest_allocated()).all(|raw| {
        let id = TokenId::new(raw);
        state.consumable(id).is_some() && state.metadata(id).is_some()
    })
}

/// Check all snapshot-pair invariants at once.
#[must_use]
pub fn check_all_invariants(
    before: &RegistryState,
    after: &RegistryState,
) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_existence_invariant(after) {
        violations.push(InvariantViolation::ExistenceOutOfRange {
            highest: after.highest_allocated(),
        });
    }

    if !check_flag_immutability_invariant(before, after) {
        violations.push(InvariantViolation::FlagMutated);
    }

    if !check_history_growth_invariant(before, after) {
        violations.push(InvariantViolation::HistoryShrunk);
    }

    if !check_history_ordering_invariant(after) {
        violations.push(InvariantViolation::HistoryOutOfOrder);
    }

    if !check_issuance_completeness_invariant(after) {
        violations.push(InvariantViolation::TornIssuance {
            highest: after.highest_allocated(),
        });
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A table row exists outside `[1, highest]`.
    ExistenceOutOfRange { highest: u64 },
    /// A consumability flag changed after issuance.
    FlagMutated,
    /// A status history lost or rewrote entries.
    HistoryShrunk,
    /// Timestamps within a history decreased.
    HistoryOutOfOrder,
    /// An allocated identifier is missing its flag or metadata row.
    TornIssuance { highest: u64 },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExistenceOutOfRange { highest } => {
                write!(f, "table row outside [1, {highest}]")
            }
            Self::FlagMutated => write!(f, "consumability flag mutated after issuance"),
            Self::HistoryShrunk => write!(f, "status history lost or rewrote entries"),
            Self::HistoryOutOfOrder => write!(f, "status history timestamps decreased"),
            Self::TornIssuance { highest } => {
                write!(f, "allocated identifier in [1, {highest}] missing flag or metadata")
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
