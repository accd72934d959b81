//! # Outbound Ports
//!
//! Traits for the host ledger: asset custody, time and event emission.

use crate::domain::{Address, Asset, AssetError};
use crate::events::ObridgeEvent;
use primitive_types::U256;
use std::sync::Arc;

/// Proof that funds entered custody.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EscrowReceipt {
    /// Escrowed asset.
    pub asset: Asset,
    /// Funding account.
    pub from: Address,
    /// Amount of `asset` taken into custody.
    pub amount: U256,
    /// Native coin taken into custody alongside a token.
    pub native_amount: U256,
}

/// Uniform escrow/release over native coin and fungible tokens - outbound port.
///
/// Implementations must be all-or-nothing: a failed call moves nothing.
pub trait AssetAdapter: Send + Sync {
    /// Identity holding escrowed funds. Token escrow pulls through an
    /// allowance granted to this address.
    fn custodian(&self) -> Address;

    /// Move funds from `from` into custody.
    ///
    /// * `Native`: moves `amount` native coin. `attached_native` equals
    ///   `amount` and is not moved twice.
    /// * `Token`: pulls `amount` via allowance and moves `attached_native`
    ///   native coin alongside.
    fn escrow(
        &self,
        asset: &Asset,
        from: Address,
        amount: U256,
        attached_native: U256,
    ) -> Result<EscrowReceipt, AssetError>;

    /// Move `amount` of `asset` plus `native_amount` native coin from
    /// custody to `to`.
    fn release(
        &self,
        asset: &Asset,
        to: Address,
        amount: U256,
        native_amount: U256,
    ) -> Result<(), AssetError>;
}

/// Source of the current instant (unix seconds) - outbound port.
pub trait Clock: Send + Sync {
    /// Current time.
    fn now(&self) -> u64;
}

/// Sink for transfer notifications - outbound port.
pub trait EventPublisher: Send + Sync {
    /// Publish an event. Returns the number of subscribers reached.
    fn publish(&self, event: ObridgeEvent) -> usize;
}

impl<T: AssetAdapter + ?Sized> AssetAdapter for Arc<T> {
    fn custodian(&self) -> Address {
        (**self).custodian()
    }

    fn escrow(
        &self,
        asset: &Asset,
        from: Address,
        amount: U256,
        attached_native: U256,
    ) -> Result<EscrowReceipt, AssetError> {
        (**self).escrow(asset, from, amount, attached_native)
    }

    fn release(
        &self,
        asset: &Asset,
        to: Address,
        amount: U256,
        native_amount: U256,
    ) -> Result<(), AssetError> {
        (**self).release(asset, to, amount, native_amount)
    }
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> u64 {
        (**self).now()
    }
}

impl<T: EventPublisher + ?Sized> EventPublisher for Arc<T> {
    fn publish(&self, event: ObridgeEvent) -> usize {
        (**self).publish(event)
    }
}
