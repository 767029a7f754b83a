//! # Value Objects
//!
//! Immutable domain primitives for the token registry.
//! These types represent concepts that are defined by their value, not identity.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// PRINCIPAL (20 bytes)
// =============================================================================

/// A 20-byte opaque account identifier.
///
/// Principals hold balances, invoke operations, and appear in role
/// assignments. The registry never interprets the bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Principal(pub [u8; 20]);

impl Principal {
    /// The zero principal (0x0000...0000).
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates a principal from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates a principal from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == 20 {
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(slice);
            Some(Self(bytes))
        } else {
            None
        }
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero principal.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[18..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 20]> for Principal {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl From<Principal> for [u8; 20] {
    fn from(principal: Principal) -> Self {
        principal.0
    }
}

// =============================================================================
// TOKEN ID
// =============================================================================

/// A unique token identifier.
///
/// Identifiers are allocated strictly increasing from 1 by the
/// `IdentifierAllocator`. Zero is the reserved sentinel meaning
/// "no such identifier" and is never allocated.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct TokenId(pub u64);

impl TokenId {
    /// The reserved sentinel: no such identifier.
    pub const NONE: Self = Self(0);

    /// The first identifier any allocator will ever return.
    pub const FIRST: Self = Self(1);

    /// Creates a token identifier from a raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn raw(&self) -> u64 {
        self.0
    }

    /// Returns true if this is the reserved sentinel.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenId({})", self.0)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for TokenId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<TokenId> for u64 {
    fn from(id: TokenId) -> Self {
        id.0
    }
}

// =============================================================================
// CAPABILITY
// =============================================================================

/// The fixed set of capabilities gating mutating operations.
///
/// Every mutating operation names exactly one required capability; the
/// configured `AccessGate` strategy decides which principals hold it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Mint new tokens (single and batch issuance).
    Issue,
    /// Consume (debit) tokens whose consumability flag is set.
    Consume,
    /// Append entries to a token's status history.
    UpdateStatus,
    /// Overwrite metadata URIs and manage role assignments.
    Administer,
    /// Authorize a version upgrade (held for the external proxy mechanism).
    AuthorizeUpgrade,
}

impl Capability {
    /// All capabilities, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Issue,
        Self::Consume,
        Self::UpdateStatus,
        Self::Administer,
        Self::AuthorizeUpgrade,
    ];
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Issue => "ISSUE",
            Self::Consume => "CONSUME",
            Self::UpdateStatus => "UPDATE_STATUS",
            Self::Administer => "ADMINISTER",
            Self::AuthorizeUpgrade => "AUTHORIZE_UPGRADE",
        };
        write!(f, "{name}")
    }
}

// =============================================================================
// TIMESTAMP (40-bit epoch seconds)
// =============================================================================

/// Epoch-seconds timestamp restricted to 40 bits.
///
/// Status entries store timestamps in this range; `Timestamp::MAX` covers
/// dates well beyond the year 36000, so saturation is the only sensible
/// out-of-range behavior.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The zero timestamp (epoch).
    pub const ZERO: Self = Self(0);

    /// Largest representable timestamp (2^40 - 1 seconds).
    pub const MAX: Self = Self((1 << 40) - 1);

    /// Creates a timestamp from epoch seconds, saturating at 40 bits.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        if secs > Self::MAX.0 {
            Self::MAX
        } else {
            Self(secs)
        }
    }

    /// Returns the timestamp as epoch seconds.
    #[must_use]
    pub const fn as_secs(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({}s)", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

impl From<u64> for Timestamp {
    fn from(secs: u64) -> Self {
        Self::from_secs(secs)
    }
}

// =============================================================================
// TESTS
// =============================================================================
