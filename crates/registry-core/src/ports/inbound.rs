//! # Driving Ports (API - Inbound)
//!
//! The public surface of the registry. Hosts (an RPC layer, a consensus
//! runtime, a test harness) drive the registry exclusively through this
//! trait; the `caller` argument on every mutating operation is the
//! principal the gate authorizes.

use crate::domain::entities::StatusEntry;
use crate::domain::value_objects::{Principal, TokenId};
use crate::errors::RegistryResult;

/// Primary API of the token registry.
///
/// Mutating operations are atomic: they either complete in full
/// (state written, one record emitted) or abort with zero effect.
/// Reads are pure projections and require no capability.
pub trait TokenRegistryApi {
    /// Issue a new token: allocate an identifier, credit `quantity` to
    /// `recipient`, record the consumability flag and metadata URI.
    ///
    /// Requires `Capability::Issue` on `caller`.
    ///
    /// # Errors
    ///
    /// * `Unauthorized` - caller lacks ISSUE
    /// * `ZeroMintAmount` - `quantity` is 0
    /// * `Ledger` - the credit failed
    fn issue(
        &mut self,
        caller: Principal,
        recipient: Principal,
        quantity: u64,
        uri: &str,
        consumable: bool,
    ) -> RegistryResult<TokenId>;

    /// Issue a batch of tokens atomically, one element per position of
    /// the three parallel input slices, in input order. Identifiers are
    /// contiguous and increasing. All-or-nothing: any invalid element
    /// means zero identifiers allocated and zero balance changes.
    ///
    /// Requires `Capability::Issue` on `caller`.
    ///
    /// # Errors
    ///
    /// * `Unauthorized` - caller lacks ISSUE
    /// * `InvalidBatchInput` - input slices differ in length
    /// * `ZeroMintAmount` - any quantity is 0
    /// * `Ledger` - any credit failed
    fn issue_batch(
        &mut self,
        caller: Principal,
        recipient: Principal,
        quantities: &[u64],
        uris: &[String],
        consumable: &[bool],
    ) -> RegistryResult<Vec<TokenId>>;

    /// Consume `quantity` of `token` from `holder`'s balance.
    ///
    /// Requires `Capability::Consume` on `caller`. Existence and status
    /// history are unaffected; a fully consumed token stays queryable.
    ///
    /// # Errors
    ///
    /// * `Unauthorized` - caller lacks CONSUME
    /// * `TokenNotExists` - identifier never allocated
    /// * `TokenNotConsumable` - issuance-time flag is false (checked
    ///   for any quantity, including 0)
    /// * `Ledger` - the debit failed (insufficient balance)
    fn consume(
        &mut self,
        caller: Principal,
        holder: Principal,
        token: TokenId,
        quantity: u64,
    ) -> RegistryResult<()>;

    /// Append a status entry to `token`'s history, stamped with the
    /// operation's timestamp.
    ///
    /// Requires `Capability::UpdateStatus` on `caller`.
    ///
    /// # Errors
    ///
    /// * `Unauthorized` - caller lacks UPDATE_STATUS
    /// * `EmptyStatus` - `text` is empty
    /// * `TokenNotExists` - identifier never allocated
    fn update_status(
        &mut self,
        caller: Principal,
        token: TokenId,
        text: &str,
    ) -> RegistryResult<()>;

    /// Latest status entry for `token`.
    ///
    /// # Errors
    ///
    /// * `TokenNotExists` - identifier never allocated
    /// * `NoStatusHistory` - zero entries recorded
    fn get_current_status(&self, token: TokenId) -> RegistryResult<StatusEntry>;

    /// Full status history for `token`, in append order.
    ///
    /// # Errors
    ///
    /// * `TokenNotExists` - identifier never allocated
    /// * `NoStatusHistory` - zero entries recorded
    fn get_status_history(&self, token: TokenId) -> RegistryResult<Vec<StatusEntry>>;

    /// Overwrite `token`'s metadata URI.
    ///
    /// Requires `Capability::Administer` on `caller`.
    ///
    /// # Errors
    ///
    /// * `Unauthorized` - caller lacks ADMINISTER
    /// * `TokenNotExists` - identifier never allocated
    fn set_metadata_uri(
        &mut self,
        caller: Principal,
        token: TokenId,
        uri: &str,
    ) -> RegistryResult<()>;

    /// Current metadata URI for `token`.
    ///
    /// # Errors
    ///
    /// * `TokenNotExists` - identifier never allocated
    fn get_metadata_uri(&self, token: TokenId) -> RegistryResult<String>;

    /// Issuance-time consumability flag for `token`.
    ///
    /// # Errors
    ///
    /// * `TokenNotExists` - identifier never allocated
    fn is_consumable(&self, token: TokenId) -> RegistryResult<bool>;

    /// Existence oracle: `1 <= token <= highest_allocated`.
    fn exists(&self, token: TokenId) -> bool;
}
