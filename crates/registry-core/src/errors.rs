//! # Error Types
//!
//! All error types for registry operations. Every error aborts the
//! triggering operation with zero state mutation and zero events; the
//! caller may safely retry the whole operation.

use crate::domain::value_objects::{Capability, Principal, TokenId};
use thiserror::Error;

// =============================================================================
// REGISTRY ERRORS
// =============================================================================

/// Errors that can abort a registry operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The calling principal lacks the required capability.
    #[error("unauthorized: missing capability {0}")]
    Unauthorized(Capability),

    /// Issuance requested with quantity 0.
    #[error("zero mint amount")]
    ZeroMintAmount,

    /// Batch issuance input sequences differ in length.
    #[error("invalid batch input: {quantities} quantities, {uris} uris, {flags} flags")]
    InvalidBatchInput {
        quantities: usize,
        uris: usize,
        flags: usize,
    },

    /// Consumption attempted on an identifier whose flag is false.
    #[error("token not consumable: {0}")]
    TokenNotConsumable(TokenId),

    /// Reference to an identifier outside `[1, highest_allocated]`.
    #[error("token does not exist: {0}")]
    TokenNotExists(TokenId),

    /// Status text is empty.
    #[error("empty status text")]
    EmptyStatus,

    /// Status query on an identifier with zero recorded entries.
    #[error("no status history for token: {0}")]
    NoStatusHistory(TokenId),

    /// Reserved for a future per-unit consumption model.
    ///
    /// Declared for wire compatibility; no code path constructs it.
    #[error("token already consumed: {0}")]
    TokenAlreadyConsumed(TokenId),

    /// Failure from the external balance ledger, propagated unchanged.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Errors from the external balance ledger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Debit exceeds the holder's balance.
    #[error("insufficient balance for {token}: holder {holder} has {held}, requested {requested}")]
    InsufficientBalance {
        token: TokenId,
        holder: Principal,
        held: u64,
        requested: u64,
    },

    /// Credit would overflow the holder's balance counter.
    #[error("balance overflow for {0}")]
    Overflow(TokenId),
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

// =============================================================================
// TESTS
// =============================================================================
