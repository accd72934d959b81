//! # Domain Entities
//!
//! The locked-transfer record and the parameter tuple that identifies it.

use super::errors::{Hashlock, ObridgeError, Preimage, StateViolation, TransferId};
use super::value_objects::{
    Address, Asset, BidId, ChainId, ForeignAddress, LegKind, TransferState,
};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Fields common to both legs of a swap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTerms {
    /// Address that funds the escrow and receives refunds.
    pub sender: Address,
    /// Address entitled to the funds once the preimage is revealed.
    pub receiver: Address,
    /// Escrowed asset.
    pub asset: Asset,
    /// Escrowed quantity of `asset`.
    pub amount: U256,
    /// Native coin escrowed alongside a token. Zero for native legs.
    pub native_amount: U256,
    /// Hash of the swap secret.
    pub hashlock: Hashlock,
    /// Absolute expiry (unix seconds).
    pub timelock: u64,
}

impl TransferTerms {
    /// Terms with no native coin attached alongside the asset.
    pub fn new(
        sender: Address,
        receiver: Address,
        asset: Asset,
        amount: U256,
        hashlock: Hashlock,
        timelock: u64,
    ) -> Self {
        Self {
            sender,
            receiver,
            asset,
            amount,
            native_amount: U256::zero(),
            hashlock,
            timelock,
        }
    }

    /// Attach native coin alongside a token leg.
    pub fn with_native_amount(mut self, native_amount: U256) -> Self {
        self.native_amount = native_amount;
        self
    }

    /// Native coin a caller must attach to lock these terms.
    pub fn required_attachment(&self) -> U256 {
        match self.asset {
            Asset::Native => self.amount,
            Asset::Token(_) => self.native_amount,
        }
    }
}

/// Routing metadata carried by the user's source-chain leg.
///
/// Informational for this chain; the liquidity provider reads it to build
/// the inbound leg.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundRoute {
    /// Chain the counter leg is expected on.
    pub dst_chain_id: ChainId,
    /// Receiver of the counter leg on the destination chain.
    pub dst_receiver: ForeignAddress,
    /// Quote this swap answers.
    pub bid_id: BidId,
    /// Asset expected on the destination chain.
    pub dst_asset: ForeignAddress,
    /// Amount expected on the destination chain.
    pub dst_amount: U256,
}

/// Linkage carried by the liquidity provider's destination-chain leg.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundRoute {
    /// Chain hosting the outbound leg.
    pub src_chain_id: ChainId,
    /// Identifier of the outbound leg.
    pub src_transfer_id: TransferId,
}

/// Leg-specific part of a transfer's parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "leg", rename_all = "snake_case")]
pub enum LegRoute {
    /// Source-chain leg.
    Outbound(OutboundRoute),
    /// Destination-chain leg.
    Inbound(InboundRoute),
}

impl LegRoute {
    /// Which half of the swap this route belongs to.
    pub fn kind(&self) -> LegKind {
        match self {
            LegRoute::Outbound(_) => LegKind::Outbound,
            LegRoute::Inbound(_) => LegKind::Inbound,
        }
    }
}

/// Full immutable parameter tuple of a transfer. Hashing it yields the id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferParams {
    /// Common terms.
    pub terms: TransferTerms,
    /// Leg-specific routing.
    pub route: LegRoute,
}

impl TransferParams {
    /// Parameters of a source-chain leg.
    pub fn outbound(terms: TransferTerms, route: OutboundRoute) -> Self {
        Self {
            terms,
            route: LegRoute::Outbound(route),
        }
    }

    /// Parameters of a destination-chain leg.
    pub fn inbound(terms: TransferTerms, route: InboundRoute) -> Self {
        Self {
            terms,
            route: LegRoute::Inbound(route),
        }
    }

    /// Which half of the swap these parameters describe.
    pub fn kind(&self) -> LegKind {
        self.route.kind()
    }
}

/// One escrow leg held by a lock registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedTransfer {
    /// Derived identifier.
    pub id: TransferId,
    /// Parameters the id was derived from.
    pub params: TransferParams,
    /// Current state.
    pub state: TransferState,
    /// Creation time.
    pub created_at: u64,
    /// Time the record left `Locked`.
    pub settled_at: Option<u64>,
    /// Revealed secret (only set after redemption).
    pub preimage: Option<Preimage>,
}

impl LockedTransfer {
    /// Create a new `Locked` record.
    pub fn new(id: TransferId, params: TransferParams, created_at: u64) -> Self {
        Self {
            id,
            params,
            state: TransferState::Locked,
            created_at,
            settled_at: None,
            preimage: None,
        }
    }

    /// Common terms.
    pub fn terms(&self) -> &TransferTerms {
        &self.params.terms
    }

    /// Which half of the swap this record is.
    pub fn leg(&self) -> LegKind {
        self.params.kind()
    }

    /// Check if timelock has been reached.
    pub fn is_expired(&self, current_time: u64) -> bool {
        current_time >= self.params.terms.timelock
    }

    /// Fail unless the record is still `Locked`.
    pub fn ensure_locked(&self) -> Result<(), ObridgeError> {
        if self.state != TransferState::Locked {
            return Err(ObridgeError::InvalidState {
                id: self.id,
                reason: StateViolation::NotLocked(self.state),
            });
        }
        Ok(())
    }

    /// Transition to `next`, enforcing the state machine.
    fn transition_to(&mut self, next: TransferState, current_time: u64) -> Result<(), ObridgeError> {
        self.ensure_locked()?;
        let timelock = self.params.terms.timelock;
        if !self.state.can_transition_to(next, current_time, timelock) {
            let reason = match next {
                TransferState::Redeemed => StateViolation::RedemptionClosed {
                    timelock,
                    now: current_time,
                },
                _ => StateViolation::RefundNotYetAvailable {
                    timelock,
                    now: current_time,
                },
            };
            return Err(ObridgeError::InvalidState { id: self.id, reason });
        }
        self.state = next;
        self.settled_at = Some(current_time);
        Ok(())
    }

    /// Mark redeemed with the revealed preimage. Does not check the hash.
    pub fn redeem(&mut self, preimage: Preimage, current_time: u64) -> Result<(), ObridgeError> {
        self.transition_to(TransferState::Redeemed, current_time)?;
        self.preimage = Some(preimage);
        Ok(())
    }

    /// Mark refunded.
    pub fn refund(&mut self, current_time: u64) -> Result<(), ObridgeError> {
        self.transition_to(TransferState::Refunded, current_time)
    }
}
