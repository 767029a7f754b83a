//! # Registry Core - Consumable Token Registry
//!
//! Issues, tracks consumption of, and records lifecycle status for
//! multi-quantity, uniquely identified token records, gated by
//! role-based capability checks. The authoritative record of: does this
//! token exist, how much of it remains, what happened to it over time,
//! and where is its descriptive metadata.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Existence is range-based (`1 <= id <= highest`) | `domain/entities.rs` - `RegistryState::exists()` |
//! | INVARIANT-2 | Consumability flags never change after issuance | no mutator exists; audited by `domain/invariants.rs` |
//! | INVARIANT-3 | Status histories only grow | `domain/entities.rs` - `StatusHistory` (append-only) |
//! | INVARIANT-4 | History timestamps are non-decreasing | `service.rs` - `operation_timestamp()` |
//! | INVARIANT-5 | Issuance is atomic (id + credit + flag + metadata) | `service.rs` - credit-then-commit ordering |
//!
//! ## Architecture
//!
//! Hexagonal: a pure domain core, a service orchestrating
//! gate -> validate -> mutate -> emit, and ports at both edges.
//!
//! | Layer | Location | Purpose |
//! |-------|----------|---------|
//! | Domain | `domain/` | State tables, allocator, invariants |
//! | Ports | `ports/` | `TokenRegistryApi` in, ledger/gate/sink/clock out |
//! | Adapters | `adapters/` | Role table, single owner, in-memory ledger & log |
//! | Service | `service.rs` | Atomic capability-gated operations |
//!
//! ## Concurrency Model
//!
//! A deterministic sequential state machine: exactly one mutating
//! operation runs to completion (or aborts with zero effect) at a time.
//! No async, no internal parallelism, no reentrancy - the surrounding
//! host supplies replication and ordering if it needs them.
//!
//! ## Usage Example
//!
//! ```
//! use registry_core::prelude::*;
//!
//! let admin = Principal::new([1u8; 20]);
//! let holder = Principal::new([2u8; 20]);
//! let mut registry = create_test_service(admin, RegistryConfig::default());
//!
//! let token = registry.issue(admin, holder, 10, "ipfs://x", true)?;
//! registry.consume(admin, holder, token, 4)?;
//! registry.update_status(admin, token, "shipped")?;
//!
//! assert_eq!(registry.get_current_status(token)?.text, "shipped");
//! assert_eq!(registry.ledger().balance_of(token, holder), 6);
//! # Ok::<(), registry_core::RegistryError>(())
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

pub use errors::{LedgerError, RegistryError, RegistryResult};

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        IdentifierAllocator, RegistryState, StatusEntry, StatusHistory,
    };

    // Value objects
    pub use crate::domain::value_objects::{Capability, Principal, Timestamp, TokenId};

    // Invariants
    pub use crate::domain::invariants::{
        check_all_invariants, InvariantCheckResult, InvariantViolation,
    };

    // Ports
    pub use crate::ports::inbound::TokenRegistryApi;
    pub use crate::ports::outbound::{AccessGate, BalanceLedger, EventSink, TimeSource};

    // Events
    pub use crate::events::{
        topics, BatchIssuedPayload, ConsumedPayload, EventPayload, EventRecord,
        IssuedPayload, MetadataUpdatedPayload, StatusUpdatedPayload,
    };

    // Errors
    pub use crate::errors::{LedgerError, RegistryError, RegistryResult};

    // Adapters
    pub use crate::adapters::{
        FixedTimeSource, InMemoryEventLog, InMemoryLedger, RoleTableGate, SingleOwnerGate,
        SystemTimeSource,
    };

    // Service
    pub use crate::service::{
        create_test_service, RegistryConfig, RegistryStats, TokenRegistryService,
    };
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name for host-side registration.
pub const CRATE_NAME: &str = "registry-core";

// =============================================================================
// TESTS
// =============================================================================
