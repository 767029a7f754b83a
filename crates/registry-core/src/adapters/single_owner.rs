//! # Single-Owner Gate
//!
//! `AccessGate` strategy (b): one principal implicitly holds every
//! capability; everyone else holds none.

use crate::domain::value_objects::{Capability, Principal};
use crate::ports::outbound::AccessGate;

/// Single-owner authorization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SingleOwnerGate {
    owner: Principal,
}

impl SingleOwnerGate {
    /// Create a gate owned by `owner`.
    #[must_use]
    pub fn new(owner: Principal) -> Self {
        Self { owner }
    }

    /// The owning principal.
    #[must_use]
    pub fn owner(&self) -> Principal {
        self.owner
    }
}

impl AccessGate for SingleOwnerGate {
    fn has_capability(&self, principal: Principal, _capability: Capability) -> bool {
        principal == self.owner
    }
}

// =============================================================================
// TESTS
// =============================================================================
