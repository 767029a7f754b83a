//! # In-Memory Ledger
//!
//! Reference `BalanceLedger` for testing and single-process hosts.
//! A production deployment would adapt this port to its real
//! multi-holder balance ledger.

use crate::domain::value_objects::{Principal, TokenId};
use crate::errors::LedgerError;
use crate::ports::outbound::BalanceLedger;
use std::collections::HashMap;

/// In-memory multi-holder balance ledger.
///
/// Tracks per-token issued and consumed totals alongside holder
/// balances so the conservation invariant (total held never exceeds
/// issued minus consumed) stays checkable.
#[derive(Clone, Debug, Default)]
pub struct InMemoryLedger {
    balances: HashMap<(TokenId, Principal), u64>,
    issued: HashMap<TokenId, u64>,
    consumed: HashMap<TokenId, u64>,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total quantity ever credited for a token.
    #[must_use]
    pub fn total_issued(&self, token: TokenId) -> u64 {
        self.issued.get(&token).copied().unwrap_or(0)
    }

    /// Total quantity ever debited for a token.
    #[must_use]
    pub fn total_consumed(&self, token: TokenId) -> u64 {
        self.consumed.get(&token).copied().unwrap_or(0)
    }

    /// Conservation check: for every token, the sum of holder balances
    /// equals issued minus consumed.
    #[must_use]
    pub fn conserves_supply(&self) -> bool {
        let mut held: HashMap<TokenId, u64> = HashMap::new();
        for (&(token, _), &balance) in &self.balances {
            *held.entry(token).or_insert(0) += balance;
        }
        self.issued.keys().chain(self.consumed.keys()).all(|token| {
            let outstanding = self
                .total_issued(*token)
                .saturating_sub(self.total_consumed(*token));
            held.get(token).copied().unwrap_or(0) == outstanding
        })
    }
}

impl BalanceLedger for InMemoryLedger {
    fn credit(
        &mut self,
        token: TokenId,
        recipient: Principal,
        quantity: u64,
    ) -> Result<(), LedgerError> {
        let balance = self.balances.entry((token, recipient)).or_insert(0);
        *balance = balance
            .checked_add(quantity)
            .ok_or(LedgerError::Overflow(token))?;
        let issued = self.issued.entry(token).or_insert(0);
        *issued = issued
            .checked_add(quantity)
            .ok_or(LedgerError::Overflow(token))?;
        Ok(())
    }

    fn debit(
        &mut self,
        token: TokenId,
        holder: Principal,
        quantity: u64,
    ) -> Result<(), LedgerError> {
        let held = self.balance_of(token, holder);
        if held < quantity {
            return Err(LedgerError::InsufficientBalance {
                token,
                holder,
                held,
                requested: quantity,
            });
        }
        self.balances.insert((token, holder), held - quantity);
        *self.consumed.entry(token).or_insert(0) += quantity;
        Ok(())
    }

    fn balance_of(&self, token: TokenId, holder: Principal) -> u64 {
        self.balances.get(&(token, holder)).copied().unwrap_or(0)
    }
}

// =============================================================================
// TESTS
// =============================================================================
