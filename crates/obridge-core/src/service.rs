//! OBridge Service
//!
//! One chain instance of the locked-transfer state machine, implementing
//! `ObridgeApi` on top of an asset adapter, a clock and an event publisher.
//!
//! The registry mutex is held for the whole of each mutating call, which
//! serializes calls the way a hosting ledger serializes transactions. Each
//! call runs every check first, then moves funds, then records the new
//! state, so a failure at any step leaves nothing half-done. The event is
//! published before the mutex is released, so subscribers see events in
//! the same order as the state changes.

use crate::algorithms::{derive_transfer_id, verify_preimage};
use crate::config::ObridgeConfig;
use crate::domain::{
    invariant_native_attachment, invariant_positive_amount, invariant_receiver_not_custodian,
    invariant_timelock_in_future,
    Asset, InboundRoute, LockRegistry, LockedTransfer, ObridgeError, OutboundRoute, Preimage,
    StateViolation, TransferId, TransferParams, TransferState, TransferTerms,
};
use crate::events::ObridgeEvent;
use crate::ports::inbound::ObridgeApi;
use crate::ports::outbound::{AssetAdapter, Clock, EventPublisher};
use parking_lot::Mutex;
use primitive_types::U256;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// OBridge chain instance.
pub struct ObridgeService<A, C, P> {
    config: ObridgeConfig,
    registry: Mutex<LockRegistry>,
    assets: A,
    clock: C,
    events: P,
}

impl<A, C, P> ObridgeService<A, C, P>
where
    A: AssetAdapter,
    C: Clock,
    P: EventPublisher,
{
    /// Create a new service with default config
    pub fn new(assets: A, clock: C, events: P) -> Self {
        Self::with_config(ObridgeConfig::default(), assets, clock, events)
    }

    /// Create a new service with custom config
    pub fn with_config(config: ObridgeConfig, assets: A, clock: C, events: P) -> Self {
        Self {
            config,
            registry: Mutex::new(LockRegistry::new()),
            assets,
            clock,
            events,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &ObridgeConfig {
        &self.config
    }

    /// Number of records ever created.
    pub fn transfer_count(&self) -> usize {
        self.registry.lock().len()
    }

    /// Number of records currently in `state`.
    pub fn count_by_state(&self, state: TransferState) -> usize {
        self.registry.lock().count_by_state(state)
    }

    /// Funds the registry should hold in custody, per asset.
    pub fn escrowed_totals(&self) -> HashMap<Asset, U256> {
        self.registry.lock().escrowed_totals()
    }

    fn lock(
        &self,
        params: TransferParams,
        attached_native: U256,
    ) -> Result<LockedTransfer, ObridgeError> {
        let leg = params.kind().as_str();
        let now = self.clock.now();

        // 1. Validate parameters
        invariant_positive_amount(&params.terms)?;
        invariant_timelock_in_future(params.terms.timelock, now)?;
        invariant_native_attachment(&params.terms, attached_native)?;
        invariant_receiver_not_custodian(&params.terms, self.assets.custodian())?;

        // 2. Reject reused identifiers
        let id = derive_transfer_id(&params);
        let mut registry = self.registry.lock();
        if registry.contains(&id) {
            return Err(ObridgeError::DuplicateTransfer(id));
        }

        // 3. Escrow, then record
        let terms = &params.terms;
        let receipt = self
            .assets
            .escrow(&terms.asset, terms.sender, terms.amount, attached_native)?;
        debug!(
            transfer_id = %hex::encode(id),
            amount = %receipt.amount,
            native_amount = %receipt.native_amount,
            "Funds escrowed"
        );

        let transfer = LockedTransfer::new(id, params, now);
        registry.insert(transfer.clone())?;
        self.events.publish(ObridgeEvent::created(&transfer));
        drop(registry);

        info!(
            transfer_id = %hex::encode(id),
            leg,
            asset = %transfer.terms().asset,
            amount = %transfer.terms().amount,
            timelock = transfer.terms().timelock,
            "Transfer locked"
        );
        Ok(transfer)
    }

    fn redeem(
        &self,
        params: &TransferParams,
        preimage: Preimage,
    ) -> Result<LockedTransfer, ObridgeError> {
        let id = derive_transfer_id(params);
        let now = self.clock.now();
        let mut registry = self.registry.lock();

        // 1. Record must exist and still be Locked
        let current = registry.get(&id).ok_or(ObridgeError::NotFound(id))?;
        current.ensure_locked()?;

        // 2. Preimage must open the hashlock
        if !verify_preimage(&preimage, &current.terms().hashlock, self.config.hashlock_scheme) {
            return Err(ObridgeError::SecretMismatch(id));
        }

        // 3. Redemption window must still be open
        let mut updated = current.clone();
        updated.redeem(preimage, now)?;

        // 4. Release, then record
        let terms = updated.terms();
        self.assets
            .release(&terms.asset, terms.receiver, terms.amount, terms.native_amount)?;
        registry.commit(updated.clone())?;
        self.events.publish(ObridgeEvent::confirmed(id, preimage));
        drop(registry);

        info!(
            transfer_id = %hex::encode(id),
            leg = updated.leg().as_str(),
            receiver = ?updated.terms().receiver,
            "Transfer confirmed"
        );
        Ok(updated)
    }

    fn reclaim(&self, params: &TransferParams) -> Result<LockedTransfer, ObridgeError> {
        let id = derive_transfer_id(params);
        let now = self.clock.now();
        let mut registry = self.registry.lock();

        let current = registry.get(&id).ok_or(ObridgeError::NotFound(id))?;
        let mut updated = current.clone();
        updated.refund(now)?;

        let terms = updated.terms();
        self.assets
            .release(&terms.asset, terms.sender, terms.amount, terms.native_amount)?;
        registry.commit(updated.clone())?;
        self.events.publish(ObridgeEvent::refunded(id));
        drop(registry);

        info!(
            transfer_id = %hex::encode(id),
            leg = updated.leg().as_str(),
            sender = ?updated.terms().sender,
            "Transfer refunded"
        );
        Ok(updated)
    }
}

fn log_rejection<T>(
    operation: &'static str,
    result: Result<T, ObridgeError>,
) -> Result<T, ObridgeError> {
    if let Err(err) = &result {
        match err {
            ObridgeError::InvalidState {
                reason: StateViolation::NotLocked(_),
                ..
            }
            | ObridgeError::DuplicateTransfer(_) => {
                debug!(operation, code = err.code(), error = %err, "Replay rejected")
            }
            _ => warn!(operation, code = err.code(), error = %err, "Operation rejected"),
        }
    }
    result
}

impl<A, C, P> ObridgeApi for ObridgeService<A, C, P>
where
    A: AssetAdapter,
    C: Clock,
    P: EventPublisher,
{
    fn lock_outbound(
        &self,
        terms: TransferTerms,
        route: OutboundRoute,
        attached_native: U256,
    ) -> Result<LockedTransfer, ObridgeError> {
        log_rejection(
            "lock_outbound",
            self.lock(TransferParams::outbound(terms, route), attached_native),
        )
    }

    fn lock_inbound(
        &self,
        terms: TransferTerms,
        route: InboundRoute,
        attached_native: U256,
    ) -> Result<LockedTransfer, ObridgeError> {
        log_rejection(
            "lock_inbound",
            self.lock(TransferParams::inbound(terms, route), attached_native),
        )
    }

    fn confirm(
        &self,
        params: &TransferParams,
        preimage: Preimage,
    ) -> Result<LockedTransfer, ObridgeError> {
        log_rejection("confirm", self.redeem(params, preimage))
    }

    fn refund(&self, params: &TransferParams) -> Result<LockedTransfer, ObridgeError> {
        log_rejection("refund", self.reclaim(params))
    }

    fn get_transfer(&self, id: &TransferId) -> Option<LockedTransfer> {
        self.registry.lock().get(id).cloned()
    }

    fn transfer_id(&self, params: &TransferParams) -> TransferId {
        derive_transfer_id(params)
    }
}
