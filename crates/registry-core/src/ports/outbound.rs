//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the registry depends on. External adapters implement these
//! traits to provide:
//! - Balance bookkeeping (the external multi-holder ledger)
//! - Authorization (role table or single owner)
//! - Record-of-change delivery (event sink)
//! - Timestamps for status entries
//!
//! All ports are synchronous: the core is a strict sequence of atomic
//! operations with no suspension points, and a ledger call never
//! re-enters the registry's mutation path.

use crate::domain::value_objects::{Capability, Principal, Timestamp, TokenId};
use crate::errors::{LedgerError, RegistryError, RegistryResult};
use crate::events::EventRecord;

// =============================================================================
// BALANCE LEDGER (external collaborator)
// =============================================================================

/// Interface to the external multi-holder balance ledger.
///
/// The registry is the only caller: issuance credits, consumption
/// debits. The ledger maintains its own conservation invariant (total
/// held never exceeds issued minus consumed) and its failures propagate
/// to the registry caller unchanged.
pub trait BalanceLedger: Send + Sync {
    /// Credit `quantity` of `token` to `recipient`.
    ///
    /// # Errors
    ///
    /// * `LedgerError::Overflow` - if the balance counter would overflow
    fn credit(
        &mut self,
        token: TokenId,
        recipient: Principal,
        quantity: u64,
    ) -> Result<(), LedgerError>;

    /// Debit `quantity` of `token` from `holder`.
    ///
    /// # Errors
    ///
    /// * `LedgerError::InsufficientBalance` - if `holder` holds less
    ///   than `quantity`
    fn debit(
        &mut self,
        token: TokenId,
        holder: Principal,
        quantity: u64,
    ) -> Result<(), LedgerError>;

    /// Quantity of `token` currently held by `holder` (0 if never credited).
    fn balance_of(&self, token: TokenId, holder: Principal) -> u64;
}

// =============================================================================
// ACCESS GATE
// =============================================================================

/// Authorization strategy, injected at service construction.
///
/// Two interchangeable strategies ship with the crate: `RoleTableGate`
/// (per-capability role table) and `SingleOwnerGate` (one principal
/// holds everything). Every mutating operation checks the gate before
/// touching state; reads never do.
pub trait AccessGate: Send + Sync {
    /// Returns true if `principal` holds `capability`.
    fn has_capability(&self, principal: Principal, capability: Capability) -> bool;

    /// Fails with `Unauthorized(capability)` when the principal lacks it.
    ///
    /// # Errors
    ///
    /// * `RegistryError::Unauthorized` - principal lacks the capability
    fn authorize(&self, principal: Principal, capability: Capability) -> RegistryResult<()> {
        if self.has_capability(principal, capability) {
            Ok(())
        } else {
            Err(RegistryError::Unauthorized(capability))
        }
    }
}

// =============================================================================
// EVENT SINK
// =============================================================================

/// Destination for records-of-change.
///
/// The registry emits exactly one record per successful mutation, after
/// all state has been written. Sinks must not fail; durable delivery is
/// the adapter's concern.
pub trait EventSink: Send + Sync {
    /// Accept an emitted record.
    fn record(&mut self, record: EventRecord);
}

// =============================================================================
// TIME SOURCE
// =============================================================================

/// Source of the timestamp stamped onto status entries.
///
/// One reading is taken per atomic operation, so entries appended by
/// distinct operations within the same second legitimately repeat.
pub trait TimeSource: Send + Sync {
    /// Current time, epoch seconds, 40-bit range.
    fn now(&self) -> Timestamp;
}

// =============================================================================
// TESTS
// =============================================================================
