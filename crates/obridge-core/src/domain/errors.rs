//! # Domain Errors
//!
//! Error types for the locked-transfer state machine.
//!
//! Every error is local to the call that raised it. All checks run before
//! any mutation, so a failed call leaves the registry and the ledger as they
//! were.

use super::value_objects::{Address, Asset, ChainId, TransferState};
use primitive_types::U256;
use thiserror::Error;

/// Transfer identifier (32 bytes).
pub type TransferId = [u8; 32];

/// Hashlock: hash of the swap secret (32 bytes).
pub type Hashlock = [u8; 32];

/// Swap secret whose hash equals the hashlock (32 bytes).
pub type Preimage = [u8; 32];

/// Errors returned by lock, confirm and refund.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObridgeError {
    /// Creation parameters were rejected before any funds moved.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(#[from] InvalidParameter),

    /// A record with the derived identifier already exists.
    #[error("Duplicate transfer: {}", hex::encode(.0))]
    DuplicateTransfer(TransferId),

    /// No record exists for the derived identifier.
    #[error("Transfer not found: {}", hex::encode(.0))]
    NotFound(TransferId),

    /// The record exists but the requested transition is not allowed now.
    #[error("Invalid state for transfer {}: {reason}", hex::encode(.id))]
    InvalidState {
        /// Transfer the operation targeted
        id: TransferId,
        /// Why the transition was refused
        reason: StateViolation,
    },

    /// The presented preimage does not hash to the stored hashlock.
    #[error("Secret mismatch for transfer {}", hex::encode(.0))]
    SecretMismatch(TransferId),

    /// The asset adapter refused to move funds.
    #[error("Asset transfer failed: {0}")]
    AssetTransferFailed(#[from] AssetError),
}

impl ObridgeError {
    /// Stable label for logs and metrics.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidParameters(_) => "invalid_parameters",
            Self::DuplicateTransfer(_) => "duplicate_transfer",
            Self::NotFound(_) => "not_found",
            Self::InvalidState { .. } => "invalid_state",
            Self::SecretMismatch(_) => "secret_mismatch",
            Self::AssetTransferFailed(_) => "asset_transfer_failed",
        }
    }
}

/// Reasons a lock request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidParameter {
    /// Escrowed amount is zero.
    #[error("amount must be greater than zero")]
    ZeroAmount,

    /// Timelock is zero.
    #[error("timelock must be non-zero")]
    ZeroTimelock,

    /// Timelock is not strictly after the current instant.
    #[error("timelock {timelock} is not after current time {now}")]
    TimelockNotInFuture {
        /// Requested expiry
        timelock: u64,
        /// Current time
        now: u64,
    },

    /// A native-coin leg declared a separate native amount.
    #[error("native asset leg cannot declare a separate native amount")]
    NativeAmountOnNativeAsset,

    /// Receiver is the escrow custodian, which can never be paid out.
    #[error("receiver {0:#x} is the escrow custodian")]
    CustodianReceiver(Address),

    /// Attached native coin differs from what the leg declares.
    #[error("attached native {attached} does not match declared {expected}")]
    NativeAttachmentMismatch {
        /// Native coin the leg declares
        expected: U256,
        /// Native coin actually attached
        attached: U256,
    },
}

/// Why a confirm or refund was refused on an existing record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateViolation {
    /// Record already left `Locked`.
    #[error("transfer is {0}, expected Locked")]
    NotLocked(TransferState),

    /// Confirm attempted at or after the timelock.
    #[error("redemption closed at {timelock} (now {now})")]
    RedemptionClosed {
        /// Transfer expiry
        timelock: u64,
        /// Current time
        now: u64,
    },

    /// Refund attempted before the timelock.
    #[error("refund not available before {timelock} (now {now})")]
    RefundNotYetAvailable {
        /// Transfer expiry
        timelock: u64,
        /// Current time
        now: u64,
    },
}

/// Failures surfaced by an asset adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// Holder balance is below the amount to move.
    #[error("Insufficient funds of {asset}: required {required}, available {available}")]
    InsufficientFunds {
        /// Asset being moved
        asset: Asset,
        /// Amount requested
        required: U256,
        /// Amount held
        available: U256,
    },

    /// Allowance to the custodian is below the amount to pull.
    #[error("Insufficient allowance for token {token:#x}: required {required}, approved {approved}")]
    InsufficientAllowance {
        /// Token contract
        token: Address,
        /// Amount requested
        required: U256,
        /// Amount approved
        approved: U256,
    },

    /// Any other adapter-level failure.
    #[error("Transfer failed: {0}")]
    TransferFailed(String),
}

/// Disagreements between an outbound leg and the inbound leg that claims to
/// answer it.
///
/// The state machine cannot see the other chain, so nothing here is checked
/// on-chain. Users run these checks before revealing the secret.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LegMismatch {
    /// Legs commit to different hashlocks.
    #[error("hashlock mismatch")]
    HashlockMismatch,

    /// Inbound leg does not reference the outbound identifier.
    #[error("inbound leg references {}, expected {}", hex::encode(.found), hex::encode(.expected))]
    UnlinkedTransfer {
        /// Outbound identifier
        expected: TransferId,
        /// Identifier the inbound leg carries
        found: TransferId,
    },

    /// Inbound leg names the wrong source chain.
    #[error("inbound leg names source chain {found}, expected {expected}")]
    ChainMismatch {
        /// Chain hosting the outbound leg
        expected: ChainId,
        /// Chain the inbound leg names
        found: ChainId,
    },

    /// Inbound receiver is not the destination receiver of the outbound leg.
    #[error("inbound receiver does not match requested destination receiver")]
    ReceiverMismatch,

    /// Inbound asset is not the requested destination asset.
    #[error("inbound asset does not match requested destination asset")]
    AssetMismatch,

    /// Inbound amount is below the requested destination amount.
    #[error("inbound amount {found} below requested {expected}")]
    AmountMismatch {
        /// Requested destination amount
        expected: U256,
        /// Amount escrowed on the inbound leg
        found: U256,
    },

    /// Destination receiver is not a 20-byte address.
    #[error("destination receiver is not a local address")]
    ForeignReceiver,

    /// Destination asset is not a 20-byte address.
    #[error("destination asset is not a local asset")]
    ForeignAsset,

    /// Outbound leg does not outlive the inbound leg by the required margin.
    #[error("Invalid timelock margin: outbound={outbound_timelock}, inbound={inbound_timelock}, required={required_margin}")]
    TimelockMargin {
        /// Outbound leg expiry
        outbound_timelock: u64,
        /// Inbound leg expiry
        inbound_timelock: u64,
        /// Required margin in seconds
        required_margin: u64,
    },

    /// A leg of the wrong kind was supplied.
    #[error("expected {0} leg")]
    WrongLeg(&'static str),
}
