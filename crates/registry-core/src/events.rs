//! # Event Schema
//!
//! Records-of-change emitted by the registry. Every successful mutation
//! emits exactly one record; failed operations emit nothing. External
//! indexers consume these through the `EventSink` port.

use crate::domain::value_objects::{Principal, Timestamp, TokenId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// TOPICS
// =============================================================================

/// Topic names for routing records to external indexers.
pub mod topics {
    /// Single issuance.
    pub const ISSUED: &str = "registry.issued";
    /// Batch issuance (one aggregate record per batch).
    pub const BATCH_ISSUED: &str = "registry.batch_issued";
    /// Consumption.
    pub const CONSUMED: &str = "registry.consumed";
    /// Status history append.
    pub const STATUS_UPDATED: &str = "registry.status_updated";
    /// Metadata URI overwrite.
    pub const METADATA_UPDATED: &str = "registry.metadata_updated";
}

// =============================================================================
// PAYLOADS
// =============================================================================

/// A single token was issued.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedPayload {
    /// The freshly allocated identifier.
    pub token: TokenId,
    /// Principal credited with the issued quantity.
    pub recipient: Principal,
    /// Quantity credited. Never zero.
    pub quantity: u64,
    /// Issuance-time consumability flag.
    pub consumable: bool,
}

/// A batch of tokens was issued atomically.
///
/// Parallel arrays, one element per issued token, in input order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchIssuedPayload {
    /// Principal credited for every element.
    pub recipient: Principal,
    /// Allocated identifiers, contiguous and increasing.
    pub tokens: Vec<TokenId>,
    /// Quantities credited per token. Never zero.
    pub quantities: Vec<u64>,
    /// Consumability flags per token.
    pub consumable: Vec<bool>,
}

/// A quantity of a token was consumed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumedPayload {
    /// The consumed token.
    pub token: TokenId,
    /// Principal debited.
    pub holder: Principal,
    /// Quantity debited.
    pub quantity: u64,
}

/// A status entry was appended to a token's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdatedPayload {
    /// The token whose history grew.
    pub token: TokenId,
    /// The appended status text.
    pub text: String,
    /// Time of the enclosing atomic operation.
    pub timestamp: Timestamp,
}

/// A token's metadata URI was overwritten.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataUpdatedPayload {
    /// The token whose metadata changed.
    pub token: TokenId,
    /// The new URI.
    pub uri: String,
}

// =============================================================================
// EVENT RECORD
// =============================================================================

/// Union of all record payloads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventPayload {
    /// Single issuance.
    Issued(IssuedPayload),
    /// Batch issuance.
    BatchIssued(BatchIssuedPayload),
    /// Consumption.
    Consumed(ConsumedPayload),
    /// Status history append.
    StatusUpdated(StatusUpdatedPayload),
    /// Metadata overwrite.
    MetadataUpdated(MetadataUpdatedPayload),
}

impl EventPayload {
    /// Routing topic for this payload.
    #[must_use]
    pub fn topic(&self) -> &'static str {
        match self {
            Self::Issued(_) => topics::ISSUED,
            Self::BatchIssued(_) => topics::BATCH_ISSUED,
            Self::Consumed(_) => topics::CONSUMED,
            Self::StatusUpdated(_) => topics::STATUS_UPDATED,
            Self::MetadataUpdated(_) => topics::METADATA_UPDATED,
        }
    }
}

/// An emitted record-of-change with a unique record id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Unique record id, assigned at emission.
    pub id: Uuid,
    /// The record payload.
    pub payload: EventPayload,
}

impl EventRecord {
    /// Wraps a payload in a record with a fresh id.
    #[must_use]
    pub fn new(payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            payload,
        }
    }

    /// Routing topic for this record.
    #[must_use]
    pub fn topic(&self) -> &'static str {
        self.payload.topic()
    }
}

// =============================================================================
// TESTS
// =============================================================================
