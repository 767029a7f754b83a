//! # Token Registry Service
//!
//! The mutation surface of the registry: every public operation runs
//! gate -> validate -> mutate -> emit, atomically. The service owns the
//! `RegistryState` and is generic over the four outbound ports, so the
//! authorization strategy and the balance ledger are picked at
//! construction.
//!
//! ## Atomicity discipline
//!
//! Registry tables are written only after every fallible step has
//! succeeded, so a failed operation leaves no trace. Identifier values
//! are computed from the high-water mark before the ledger call and
//! committed after it; batch issuance validates the entire batch before
//! the first credit.

use crate::domain::entities::{RegistryState, StatusEntry};
use crate::domain::invariants::{check_all_invariants, InvariantCheckResult};
use crate::domain::value_objects::{Capability, Principal, Timestamp, TokenId};
use crate::errors::{RegistryError, RegistryResult};
use crate::events::{
    BatchIssuedPayload, ConsumedPayload, EventPayload, EventRecord, IssuedPayload,
    MetadataUpdatedPayload, StatusUpdatedPayload,
};
use crate::ports::inbound::TokenRegistryApi;
use crate::ports::outbound::{AccessGate, BalanceLedger, EventSink, TimeSource};

use tracing::{debug, error, info, warn};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Registry configuration, fixed at initialization.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Fallback metadata URI applied when issuance supplies an empty one.
    pub base_uri: String,
    /// Audit domain invariants after every successful mutation.
    ///
    /// Costs a state clone per operation; meant for tests and staging.
    pub audit_invariants: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_uri: String::new(),
            audit_invariants: false,
        }
    }
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Operation counters for the registry service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegistryStats {
    /// Tokens issued (batch elements count individually).
    pub tokens_issued: u64,
    /// Successful consume operations.
    pub consumptions: u64,
    /// Successful status appends.
    pub status_updates: u64,
    /// Successful metadata overwrites.
    pub metadata_updates: u64,
    /// Mutating operations rejected with an error.
    pub rejected_operations: u64,
}

// =============================================================================
// SERVICE
// =============================================================================

/// The main registry service.
///
/// Type parameters select the authorization strategy (`G`), the external
/// balance ledger (`L`), the record sink (`E`), and the timestamp source
/// (`T`).
pub struct TokenRegistryService<G, L, E, T>
where
    G: AccessGate,
    L: BalanceLedger,
    E: EventSink,
    T: TimeSource,
{
    config: RegistryConfig,
    gate: G,
    ledger: L,
    events: E,
    clock: T,
    state: RegistryState,
    stats: RegistryStats,
}

impl<G, L, E, T> TokenRegistryService<G, L, E, T>
where
    G: AccessGate,
    L: BalanceLedger,
    E: EventSink,
    T: TimeSource,
{
    /// Initialize a registry with empty state.
    pub fn new(gate: G, ledger: L, events: E, clock: T, config: RegistryConfig) -> Self {
        info!(base_uri = %config.base_uri, "Initializing token registry");
        Self {
            config,
            gate,
            ledger,
            events,
            clock,
            state: RegistryState::new(),
            stats: RegistryStats::default(),
        }
    }

    /// Current operation counters.
    #[must_use]
    pub fn stats(&self) -> &RegistryStats {
        &self.stats
    }

    /// The registry configuration.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Read access to the owned state (snapshots, audits).
    #[must_use]
    pub fn state(&self) -> &RegistryState {
        &self.state
    }

    /// The authorization strategy.
    #[must_use]
    pub fn gate(&self) -> &G {
        &self.gate
    }

    /// Mutable access to the gate, for strategies with runtime role
    /// management (grant / revoke on the role table).
    pub fn gate_mut(&mut self) -> &mut G {
        &mut self.gate
    }

    /// Read access to the balance ledger.
    #[must_use]
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Read access to the record sink.
    #[must_use]
    pub fn events(&self) -> &E {
        &self.events
    }

    /// Mutable access to the time source, for hosts that drive a
    /// deterministic clock.
    pub fn clock_mut(&mut self) -> &mut T {
        &mut self.clock
    }

    /// Allocator high-water mark (0 before the first issuance).
    #[must_use]
    pub fn highest_allocated(&self) -> u64 {
        self.state.highest_allocated()
    }

    /// Count the rejection and hand the error back to the caller.
    fn reject(&mut self, err: RegistryError) -> RegistryError {
        self.stats.rejected_operations += 1;
        warn!(error = %err, "Registry operation rejected");
        err
    }

    /// Resolve an issuance URI: empty input falls back to the base URI.
    fn effective_uri(&self, uri: &str) -> String {
        if uri.is_empty() {
            self.config.base_uri.clone()
        } else {
            uri.to_string()
        }
    }

    /// Timestamp for the current operation, clamped so a backwards
    /// wall clock can never produce a decreasing history.
    fn operation_timestamp(&self, token: TokenId) -> Timestamp {
        let now = self.clock.now();
        match self.state.status_history(token).and_then(|h| h.current()) {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        }
    }

    /// Snapshot the state when auditing is on.
    fn audit_snapshot(&self) -> Option<RegistryState> {
        self.config.audit_invariants.then(|| self.state.clone())
    }

    /// Verify the domain invariants against the snapshot taken before
    /// the mutation. Violations indicate a registry bug, never a caller
    /// error, so they are logged rather than returned.
    fn audit(&self, before: Option<RegistryState>) {
        let Some(before) = before else {
            return;
        };
        if let InvariantCheckResult::Invalid(violations) =
            check_all_invariants(&before, &self.state)
        {
            for violation in &violations {
                error!(violation = %violation, "Domain invariant violated");
            }
            debug_assert!(violations.is_empty(), "domain invariant violated");
        }
    }
}

impl<G, L, E, T> TokenRegistryApi for TokenRegistryService<G, L, E, T>
where
    G: AccessGate,
    L: BalanceLedger,
    E: EventSink,
    T: TimeSource,
{
    fn issue(
        &mut self,
        caller: Principal,
        recipient: Principal,
        quantity: u64,
        uri: &str,
        consumable: bool,
    ) -> RegistryResult<TokenId> {
        if let Err(err) = self.gate.authorize(caller, Capability::Issue) {
            return Err(self.reject(err));
        }
        if quantity == 0 {
            return Err(self.reject(RegistryError::ZeroMintAmount));
        }

        let before = self.audit_snapshot();
        let uri = self.effective_uri(uri);

        // The identifier the allocator will hand out; nothing is
        // committed until the credit has succeeded.
        let token = TokenId::new(self.state.highest_allocated() + 1);
        if let Err(err) = self.ledger.credit(token, recipient, quantity) {
            return Err(self.reject(err.into()));
        }

        let allocated = self.state.record_issuance(consumable, uri);
        debug_assert_eq!(allocated, token);

        self.stats.tokens_issued += 1;
        self.events
            .record(EventRecord::new(EventPayload::Issued(IssuedPayload {
                token,
                recipient,
                quantity,
                consumable,
            })));

        info!(%token, %recipient, quantity, consumable, "Token issued");
        self.audit(before);
        Ok(token)
    }

    fn issue_batch(
        &mut self,
        caller: Principal,
        recipient: Principal,
        quantities: &[u64],
        uris: &[String],
        consumable: &[bool],
    ) -> RegistryResult<Vec<TokenId>> {
        if let Err(err) = self.gate.authorize(caller, Capability::Issue) {
            return Err(self.reject(err));
        }

        // Validate the whole batch before mutating anything: a single
        // invalid element means zero identifiers and zero credits.
        if quantities.len() != uris.len() || quantities.len() != consumable.len() {
            return Err(self.reject(RegistryError::InvalidBatchInput {
                quantities: quantities.len(),
                uris: uris.len(),
                flags: consumable.len(),
            }));
        }
        if quantities.contains(&0) {
            return Err(self.reject(RegistryError::ZeroMintAmount));
        }

        let before = self.audit_snapshot();
        let base = self.state.highest_allocated();
        let tokens: Vec<TokenId> = (0..quantities.len() as u64)
            .map(|offset| TokenId::new(base + offset + 1))
            .collect();

        // Credit phase. A failed credit undoes the earlier ones before
        // the batch aborts, so the ledger is left untouched too.
        for (index, (&token, &quantity)) in tokens.iter().zip(quantities).enumerate() {
            if let Err(err) = self.ledger.credit(token, recipient, quantity) {
                for (&undo_token, &undo_quantity) in
                    tokens.iter().zip(quantities).take(index)
                {
                    // Undoing a credit that just succeeded cannot fail.
                    let _ = self.ledger.debit(undo_token, recipient, undo_quantity);
                }
                return Err(self.reject(err.into()));
            }
        }

        // Commit phase: infallible table writes, input order, so the
        // identifiers come out contiguous and increasing.
        for (index, &token) in tokens.iter().enumerate() {
            let uri = self.effective_uri(&uris[index]);
            let allocated = self.state.record_issuance(consumable[index], uri);
            debug_assert_eq!(allocated, token);
        }

        self.stats.tokens_issued += tokens.len() as u64;
        self.events.record(EventRecord::new(EventPayload::BatchIssued(
            BatchIssuedPayload {
                recipient,
                tokens: tokens.clone(),
                quantities: quantities.to_vec(),
                consumable: consumable.to_vec(),
            },
        )));

        info!(%recipient, count = tokens.len(), "Token batch issued");
        self.audit(before);
        Ok(tokens)
    }

    fn consume(
        &mut self,
        caller: Principal,
        holder: Principal,
        token: TokenId,
        quantity: u64,
    ) -> RegistryResult<()> {
        if let Err(err) = self.gate.authorize(caller, Capability::Consume) {
            return Err(self.reject(err));
        }
        if !self.state.exists(token) {
            return Err(self.reject(RegistryError::TokenNotExists(token)));
        }
        // The flag gate fires for any quantity, including 0.
        if self.state.consumable(token) != Some(true) {
            return Err(self.reject(RegistryError::TokenNotConsumable(token)));
        }

        let before = self.audit_snapshot();
        if let Err(err) = self.ledger.debit(token, holder, quantity) {
            return Err(self.reject(err.into()));
        }

        self.stats.consumptions += 1;
        self.events
            .record(EventRecord::new(EventPayload::Consumed(ConsumedPayload {
                token,
                holder,
                quantity,
            })));

        info!(%token, %holder, quantity, "Token consumed");
        self.audit(before);
        Ok(())
    }

    fn update_status(
        &mut self,
        caller: Principal,
        token: TokenId,
        text: &str,
    ) -> RegistryResult<()> {
        if let Err(err) = self.gate.authorize(caller, Capability::UpdateStatus) {
            return Err(self.reject(err));
        }
        if text.is_empty() {
            return Err(self.reject(RegistryError::EmptyStatus));
        }
        if !self.state.exists(token) {
            return Err(self.reject(RegistryError::TokenNotExists(token)));
        }

        let before = self.audit_snapshot();
        let timestamp = self.operation_timestamp(token);
        self.state
            .append_status(token, StatusEntry::new(text, timestamp));

        self.stats.status_updates += 1;
        self.events.record(EventRecord::new(EventPayload::StatusUpdated(
            StatusUpdatedPayload {
                token,
                text: text.to_string(),
                timestamp,
            },
        )));

        debug!(%token, %timestamp, text, "Status appended");
        self.audit(before);
        Ok(())
    }

    fn get_current_status(&self, token: TokenId) -> RegistryResult<StatusEntry> {
        if !self.state.exists(token) {
            return Err(RegistryError::TokenNotExists(token));
        }
        self.state
            .status_history(token)
            .and_then(|history| history.current())
            .cloned()
            .ok_or(RegistryError::NoStatusHistory(token))
    }

    fn get_status_history(&self, token: TokenId) -> RegistryResult<Vec<StatusEntry>> {
        if !self.state.exists(token) {
            return Err(RegistryError::TokenNotExists(token));
        }
        self.state
            .status_history(token)
            .map(|history| history.entries().to_vec())
            .ok_or(RegistryError::NoStatusHistory(token))
    }

    fn set_metadata_uri(
        &mut self,
        caller: Principal,
        token: TokenId,
        uri: &str,
    ) -> RegistryResult<()> {
        if let Err(err) = self.gate.authorize(caller, Capability::Administer) {
            return Err(self.reject(err));
        }
        if !self.state.exists(token) {
            return Err(self.reject(RegistryError::TokenNotExists(token)));
        }

        let before = self.audit_snapshot();
        self.state.set_metadata(token, uri.to_string());

        self.stats.metadata_updates += 1;
        self.events.record(EventRecord::new(EventPayload::MetadataUpdated(
            MetadataUpdatedPayload {
                token,
                uri: uri.to_string(),
            },
        )));

        debug!(%token, uri, "Metadata updated");
        self.audit(before);
        Ok(())
    }

    fn get_metadata_uri(&self, token: TokenId) -> RegistryResult<String> {
        if !self.state.exists(token) {
            return Err(RegistryError::TokenNotExists(token));
        }
        Ok(self
            .state
            .metadata(token)
            .map(str::to_string)
            .unwrap_or_default())
    }

    fn is_consumable(&self, token: TokenId) -> RegistryResult<bool> {
        if !self.state.exists(token) {
            return Err(RegistryError::TokenNotExists(token));
        }
        Ok(self.state.consumable(token) == Some(true))
    }

    fn exists(&self, token: TokenId) -> bool {
        self.state.exists(token)
    }
}

// =============================================================================
// TEST SERVICE FACTORY
// =============================================================================

/// A fully in-memory service with a role-table gate, for tests and
/// examples: `admin` is seeded into every capability.
#[must_use]
pub fn create_test_service(
    admin: Principal,
    config: RegistryConfig,
) -> TokenRegistryService<
    crate::adapters::RoleTableGate,
    crate::adapters::InMemoryLedger,
    crate::adapters::InMemoryEventLog,
    crate::adapters::FixedTimeSource,
> {
    TokenRegistryService::new(
        crate::adapters::RoleTableGate::with_admin(admin),
        crate::adapters::InMemoryLedger::new(),
        crate::adapters::InMemoryEventLog::new(),
        crate::adapters::FixedTimeSource::at(Timestamp::from_secs(1_700_000_000)),
        config,
    )
}

// =============================================================================
// TESTS
// =============================================================================
