//! # Domain Entities
//!
//! The owned state of the registry: the identifier allocator, the
//! per-token tables, and the status-history log entries.
//!
//! Nothing in this module performs authorization or emits events; these
//! are the raw state primitives that `service.rs` composes into atomic,
//! capability-gated operations.

use crate::domain::value_objects::{Timestamp, TokenId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// STATUS ENTRY
// =============================================================================

/// A single immutable entry in a token's status history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    /// Free-form status text. Never empty once recorded.
    pub text: String,
    /// Time of the enclosing atomic operation, epoch seconds (40-bit).
    pub timestamp: Timestamp,
}

impl StatusEntry {
    /// Creates a status entry.
    #[must_use]
    pub fn new(text: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            text: text.into(),
            timestamp,
        }
    }
}

// =============================================================================
// STATUS HISTORY
// =============================================================================

/// Per-token append-only ordered log of status entries.
///
/// Entries are never edited or removed; the length never decreases.
/// "Current status" is defined only when at least one entry exists.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistory {
    entries: Vec<StatusEntry>,
}

impl StatusHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry at the next index.
    pub fn append(&mut self, entry: StatusEntry) {
        self.entries.push(entry);
    }

    /// Returns the entry at the highest index, if any.
    #[must_use]
    pub fn current(&self) -> Option<&StatusEntry> {
        self.entries.last()
    }

    /// Returns all entries in append order.
    #[must_use]
    pub fn entries(&self) -> &[StatusEntry] {
        &self.entries
    }

    /// Returns the number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// IDENTIFIER ALLOCATOR
// =============================================================================

/// Issues strictly increasing unique token identifiers, starting at 1.
///
/// The high-water mark doubles as the existence oracle: an identifier
/// exists iff `1 <= id <= highest`. No identifier is ever reused or
/// issued out of order, and `next()` is called at most once per
/// issuance unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierAllocator {
    highest: u64,
}

impl IdentifierAllocator {
    /// Creates an allocator with nothing allocated.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next identifier, advancing the high-water mark.
    pub fn next(&mut self) -> TokenId {
        self.highest += 1;
        TokenId::new(self.highest)
    }

    /// Returns the highest identifier allocated so far (0 if none).
    #[must_use]
    pub fn highest(&self) -> u64 {
        self.highest
    }
}

// =============================================================================
// REGISTRY STATE
// =============================================================================

/// The complete owned state of the registry.
///
/// One explicit struct instead of ambient globals: the allocator
/// high-water mark plus three per-token tables. Serializable so a host
/// can snapshot and restore the whole registry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryState {
    allocator: IdentifierAllocator,
    consumable: HashMap<TokenId, bool>,
    metadata: HashMap<TokenId, String>,
    status: HashMap<TokenId, StatusHistory>,
}

impl RegistryState {
    /// Creates an empty registry state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Existence oracle: `1 <= id <= highest_allocated`.
    ///
    /// This is the only existence signal the registry ever consults.
    #[must_use]
    pub fn exists(&self, id: TokenId) -> bool {
        id.raw() >= 1 && id.raw() <= self.allocator.highest()
    }

    /// Returns the allocator's high-water mark.
    #[must_use]
    pub fn highest_allocated(&self) -> u64 {
        self.allocator.highest()
    }

    /// Allocates a fresh identifier and records its issuance-time
    /// consumability flag and metadata URI in one step.
    ///
    /// The flag is immutable from here on; no mutator exists.
    pub fn record_issuance(&mut self, consumable: bool, uri: String) -> TokenId {
        let id = self.allocator.next();
        self.consumable.insert(id, consumable);
        self.metadata.insert(id, uri);
        id
    }

    /// Returns the consumability flag recorded at issuance.
    ///
    /// `None` only for identifiers that were never allocated.
    #[must_use]
    pub fn consumable(&self, id: TokenId) -> Option<bool> {
        self.consumable.get(&id).copied()
    }

    /// Returns the metadata URI for an allocated identifier.
    #[must_use]
    pub fn metadata(&self, id: TokenId) -> Option<&str> {
        self.metadata.get(&id).map(String::as_str)
    }

    /// Overwrites the metadata URI for an allocated identifier.
    ///
    /// Callers must have checked existence; writing to an unallocated
    /// identifier would break invariant I5.
    pub fn set_metadata(&mut self, id: TokenId, uri: String) {
        self.metadata.insert(id, uri);
    }

    /// Appends a status entry to an identifier's history.
    pub fn append_status(&mut self, id: TokenId, entry: StatusEntry) {
        self.status.entry(id).or_default().append(entry);
    }

    /// Returns an identifier's status history, if any entries exist.
    ///
    /// An allocated identifier with zero appends has no history record,
    /// indistinguishable from an absent table row.
    #[must_use]
    pub fn status_history(&self, id: TokenId) -> Option<&StatusHistory> {
        self.status.get(&id).filter(|history| !history.is_empty())
    }

    /// Iterates over every allocated identifier, in no particular order.
    pub fn token_ids(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.consumable.keys().copied()
    }
}

// =============================================================================
// TESTS
// =============================================================================
