//! # Role-Table Gate
//!
//! `AccessGate` strategy (a): a per-capability role table. Distinct
//! principal sets per capability, managed at runtime by administrators.

use crate::domain::value_objects::{Capability, Principal};
use crate::errors::{RegistryError, RegistryResult};
use crate::ports::outbound::AccessGate;
use std::collections::{HashMap, HashSet};

/// Per-capability role table.
///
/// A principal holding `Administer` may grant or revoke any capability
/// for any principal, itself included (the admin self-assign rule).
#[derive(Clone, Debug, Default)]
pub struct RoleTableGate {
    roles: HashMap<Capability, HashSet<Principal>>,
}

impl RoleTableGate {
    /// Create an empty table (nobody holds anything).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with `admin` bootstrapped into every capability.
    ///
    /// This is the initialization-time role seeding; afterwards the
    /// table only changes through `grant` / `revoke`.
    #[must_use]
    pub fn with_admin(admin: Principal) -> Self {
        let mut gate = Self::new();
        for capability in Capability::ALL {
            gate.insert(capability, admin);
        }
        gate
    }

    /// Unchecked insertion, for construction-time seeding.
    pub fn insert(&mut self, capability: Capability, principal: Principal) {
        self.roles.entry(capability).or_default().insert(principal);
    }

    /// Grant `capability` to `principal`, authorized by `admin`.
    ///
    /// # Errors
    ///
    /// * `Unauthorized(Administer)` - `admin` does not hold `Administer`
    pub fn grant(
        &mut self,
        admin: Principal,
        principal: Principal,
        capability: Capability,
    ) -> RegistryResult<()> {
        self.require_admin(admin)?;
        self.insert(capability, principal);
        Ok(())
    }

    /// Revoke `capability` from `principal`, authorized by `admin`.
    ///
    /// # Errors
    ///
    /// * `Unauthorized(Administer)` - `admin` does not hold `Administer`
    pub fn revoke(
        &mut self,
        admin: Principal,
        principal: Principal,
        capability: Capability,
    ) -> RegistryResult<()> {
        self.require_admin(admin)?;
        if let Some(holders) = self.roles.get_mut(&capability) {
            holders.remove(&principal);
        }
        Ok(())
    }

    /// Principals currently holding `capability`.
    pub fn holders(&self, capability: Capability) -> impl Iterator<Item = &Principal> {
        self.roles
            .get(&capability)
            .map(HashSet::iter)
            .into_iter()
            .flatten()
    }

    fn require_admin(&self, admin: Principal) -> RegistryResult<()> {
        if self.has_capability(admin, Capability::Administer) {
            Ok(())
        } else {
            Err(RegistryError::Unauthorized(Capability::Administer))
        }
    }
}

impl AccessGate for RoleTableGate {
    fn has_capability(&self, principal: Principal, capability: Capability) -> bool {
        self.roles
            .get(&capability)
            .map(|holders| holders.contains(&principal))
            .unwrap_or(false)
    }
}

// =============================================================================
// TESTS
// =============================================================================
