//! # Inbound Ports
//!
//! API trait defining what one OBridge chain instance can do.

use crate::domain::{
    InboundRoute, LockedTransfer, ObridgeError, OutboundRoute, Preimage, TransferId,
    TransferParams, TransferTerms,
};
use primitive_types::U256;

/// OBridge API - inbound port.
///
/// Every mutating call is indivisible: it either completes fully (funds
/// moved and state recorded) or fails without side effects.
pub trait ObridgeApi: Send + Sync {
    /// Escrow a user's source-chain leg.
    ///
    /// `attached_native` is the native coin sent with the call. It must equal
    /// `amount` for native legs and `native_amount` for token legs.
    fn lock_outbound(
        &self,
        terms: TransferTerms,
        route: OutboundRoute,
        attached_native: U256,
    ) -> Result<LockedTransfer, ObridgeError>;

    /// Escrow a liquidity provider's destination-chain leg.
    fn lock_inbound(
        &self,
        terms: TransferTerms,
        route: InboundRoute,
        attached_native: U256,
    ) -> Result<LockedTransfer, ObridgeError>;

    /// Redeem a transfer by revealing its preimage. Funds go to `receiver`.
    fn confirm(
        &self,
        params: &TransferParams,
        preimage: Preimage,
    ) -> Result<LockedTransfer, ObridgeError>;

    /// Return an expired transfer's funds to its `sender`.
    ///
    /// Anyone may trigger a refund; the destination is always the sender.
    fn refund(&self, params: &TransferParams) -> Result<LockedTransfer, ObridgeError>;

    /// Get a transfer by id.
    fn get_transfer(&self, id: &TransferId) -> Option<LockedTransfer>;

    /// Identifier the given parameters map to.
    fn transfer_id(&self, params: &TransferParams) -> TransferId;
}
