//! # Counter-Leg Planning and Verification
//!
//! Neither chain can see the other, so nothing here runs inside the state
//! machine. The liquidity provider uses [`plan_inbound_leg`] to answer a
//! `TransferOut` event; the user runs [`verify_counter_leg`] before
//! revealing the secret. A leg that fails verification can still be locked
//! on-chain; it just cannot complete the swap atomically.

use crate::domain::{
    invariant_hashlock_match, invariant_timelock_ordering, Address, Asset, ChainId,
    ForeignAddress, InboundRoute, LegMismatch, LegRoute, LockedTransfer, TransferParams,
    TransferTerms,
};
use crate::events::TransferOutData;
use primitive_types::{H256, U256};

/// Read a left-padded 32-byte foreign address as a local address.
///
/// Returns `None` when the upper 12 bytes are not zero.
pub fn foreign_to_local(foreign: &ForeignAddress) -> Option<Address> {
    let bytes = foreign.as_bytes();
    if bytes[..12].iter().any(|b| *b != 0) {
        return None;
    }
    Some(Address::from_slice(&bytes[12..]))
}

/// Left-pad a local address into the 32-byte foreign form.
pub fn local_to_foreign(address: &Address) -> ForeignAddress {
    let mut bytes = [0u8; 32];
    bytes[12..].copy_from_slice(address.as_bytes());
    H256(bytes)
}

/// Build the inbound leg answering an observed outbound leg.
///
/// `src_chain_id` is the chain that emitted `outbound`. The inbound leg
/// escrows exactly the requested destination amount of the requested
/// destination asset for the requested receiver, under the same hashlock.
pub fn plan_inbound_leg(
    outbound: &TransferOutData,
    src_chain_id: ChainId,
    liquidity_provider: Address,
    timelock: u64,
    native_amount: U256,
) -> Result<TransferParams, LegMismatch> {
    let receiver = foreign_to_local(&outbound.dst_receiver).ok_or(LegMismatch::ForeignReceiver)?;
    let asset = foreign_to_local(&outbound.dst_asset)
        .map(Asset::from_address)
        .ok_or(LegMismatch::ForeignAsset)?;

    let mut terms = TransferTerms::new(
        liquidity_provider,
        receiver,
        asset,
        outbound.dst_amount,
        outbound.hashlock,
        timelock,
    );
    if !asset.is_native() {
        terms = terms.with_native_amount(native_amount);
    }

    Ok(TransferParams::inbound(
        terms,
        InboundRoute {
            src_chain_id,
            src_transfer_id: outbound.transfer_id,
        },
    ))
}

/// Check that `inbound` faithfully answers `outbound` before revealing.
///
/// `outbound_chain` is the chain hosting `outbound`.
pub fn verify_counter_leg(
    outbound: &LockedTransfer,
    outbound_chain: ChainId,
    inbound: &TransferParams,
    min_margin_secs: u64,
) -> Result<(), LegMismatch> {
    let LegRoute::Outbound(requested) = &outbound.params.route else {
        return Err(LegMismatch::WrongLeg("outbound"));
    };
    let LegRoute::Inbound(link) = &inbound.route else {
        return Err(LegMismatch::WrongLeg("inbound"));
    };
    let out_terms = outbound.terms();
    let in_terms = &inbound.terms;

    if !invariant_hashlock_match(&out_terms.hashlock, &in_terms.hashlock) {
        return Err(LegMismatch::HashlockMismatch);
    }
    if link.src_transfer_id != outbound.id {
        return Err(LegMismatch::UnlinkedTransfer {
            expected: outbound.id,
            found: link.src_transfer_id,
        });
    }
    if link.src_chain_id != outbound_chain {
        return Err(LegMismatch::ChainMismatch {
            expected: outbound_chain,
            found: link.src_chain_id,
        });
    }

    let receiver = foreign_to_local(&requested.dst_receiver).ok_or(LegMismatch::ForeignReceiver)?;
    if in_terms.receiver != receiver {
        return Err(LegMismatch::ReceiverMismatch);
    }
    let asset = foreign_to_local(&requested.dst_asset)
        .map(Asset::from_address)
        .ok_or(LegMismatch::ForeignAsset)?;
    if in_terms.asset != asset {
        return Err(LegMismatch::AssetMismatch);
    }
    if in_terms.amount < requested.dst_amount {
        return Err(LegMismatch::AmountMismatch {
            expected: requested.dst_amount,
            found: in_terms.amount,
        });
    }

    invariant_timelock_ordering(out_terms.timelock, in_terms.timelock, min_margin_secs)
}
