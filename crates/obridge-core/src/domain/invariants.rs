//! # Domain Invariants
//!
//! Rules every lock request must satisfy before funds move, plus the
//! cross-leg rules users check off-chain.

use super::entities::TransferTerms;
use super::errors::{Hashlock, InvalidParameter, LegMismatch};
use super::value_objects::{Address, Asset};
use primitive_types::U256;

/// Minimum gap between inbound and outbound expiry (6 hours).
pub const MIN_TIMELOCK_MARGIN_SECS: u64 = 6 * 3600;

/// Invariant: escrowed amount is positive.
pub fn invariant_positive_amount(terms: &TransferTerms) -> Result<(), InvalidParameter> {
    if terms.amount.is_zero() {
        return Err(InvalidParameter::ZeroAmount);
    }
    Ok(())
}

/// Invariant: timelock is non-zero and strictly in the future.
pub fn invariant_timelock_in_future(timelock: u64, now: u64) -> Result<(), InvalidParameter> {
    if timelock == 0 {
        return Err(InvalidParameter::ZeroTimelock);
    }
    if timelock <= now {
        return Err(InvalidParameter::TimelockNotInFuture { timelock, now });
    }
    Ok(())
}

/// Invariant: receiver is not the escrow custodian.
pub fn invariant_receiver_not_custodian(
    terms: &TransferTerms,
    custodian: Address,
) -> Result<(), InvalidParameter> {
    if terms.receiver == custodian {
        return Err(InvalidParameter::CustodianReceiver(custodian));
    }
    Ok(())
}

/// Invariant: attached native coin matches the declared amounts exactly.
///
/// Native legs attach `amount` and declare no separate native amount.
/// Token legs attach exactly `native_amount`, which may be zero.
pub fn invariant_native_attachment(
    terms: &TransferTerms,
    attached: U256,
) -> Result<(), InvalidParameter> {
    if terms.asset == Asset::Native && !terms.native_amount.is_zero() {
        return Err(InvalidParameter::NativeAmountOnNativeAsset);
    }
    let expected = terms.required_attachment();
    if attached != expected {
        return Err(InvalidParameter::NativeAttachmentMismatch { expected, attached });
    }
    Ok(())
}

/// Invariant: hashlock match.
///
/// Both legs of a swap must commit to the same hashlock.
pub fn invariant_hashlock_match(outbound: &Hashlock, inbound: &Hashlock) -> bool {
    outbound == inbound
}

/// Invariant: timelock ordering.
///
/// The outbound leg MUST expire after the inbound leg plus margin, so the
/// liquidity provider can still redeem once the user reveals the secret at
/// the last moment on the inbound leg.
pub fn invariant_timelock_ordering(
    outbound_timelock: u64,
    inbound_timelock: u64,
    min_margin_secs: u64,
) -> Result<(), LegMismatch> {
    if outbound_timelock <= inbound_timelock.saturating_add(min_margin_secs) {
        return Err(LegMismatch::TimelockMargin {
            outbound_timelock,
            inbound_timelock,
            required_margin: min_margin_secs,
        });
    }
    Ok(())
}
