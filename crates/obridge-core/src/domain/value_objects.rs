//! # Domain Value Objects
//!
//! Immutable value types shared by both legs of a swap.

use primitive_types::{H160, H256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account or contract address on the hosting chain (20 bytes).
pub type Address = H160;

/// Address on the other chain of a swap. Its format is unknown to this
/// chain, so it is carried as an opaque 32-byte value.
pub type ForeignAddress = H256;

/// Chain identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Off-chain liquidity-provider quote reference. Informational only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BidId(pub u64);

/// Asset held in escrow.
///
/// On the wire the native coin is the zero address; inside the crate it is
/// always the `Native` variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Address", into = "Address")]
pub enum Asset {
    /// The chain's native coin.
    Native,
    /// A fungible token, identified by its contract address.
    Token(Address),
}

impl Asset {
    /// Zero address used by deployed contracts to denote the native coin.
    pub const NATIVE_SENTINEL: Address = H160([0u8; 20]);

    /// Interpret a wire address, mapping the sentinel to `Native`.
    pub fn from_address(address: Address) -> Self {
        if address == Self::NATIVE_SENTINEL {
            Asset::Native
        } else {
            Asset::Token(address)
        }
    }

    /// Wire address of this asset.
    pub fn address(&self) -> Address {
        match self {
            Asset::Native => Self::NATIVE_SENTINEL,
            Asset::Token(token) => *token,
        }
    }

    /// Whether this is the native coin.
    pub fn is_native(&self) -> bool {
        matches!(self, Asset::Native)
    }
}

impl From<Address> for Asset {
    fn from(address: Address) -> Self {
        Asset::from_address(address)
    }
}

impl From<Asset> for Address {
    fn from(asset: Asset) -> Self {
        asset.address()
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asset::Native => f.write_str("native"),
            Asset::Token(token) => write!(f, "token {:#x}", token),
        }
    }
}

/// Locked-transfer state machine.
///
/// ```text
/// Locked ──(preimage, now < timelock)──► Redeemed
///    │
///    └────────(now >= timelock)────────► Refunded
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferState {
    /// Funds escrowed, awaiting redemption or expiry.
    Locked,
    /// Preimage revealed, funds released to the receiver.
    Redeemed,
    /// Timelock elapsed, funds returned to the sender.
    Refunded,
}

impl TransferState {
    /// Check if transition is valid at `current_time` for a record expiring at `timelock`.
    pub fn can_transition_to(&self, next: TransferState, current_time: u64, timelock: u64) -> bool {
        match (self, next) {
            (Self::Locked, Self::Redeemed) => current_time < timelock,
            (Self::Locked, Self::Refunded) => current_time >= timelock,
            _ => false,
        }
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Redeemed | Self::Refunded)
    }
}

impl fmt::Display for TransferState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Locked => "Locked",
            Self::Redeemed => "Redeemed",
            Self::Refunded => "Refunded",
        };
        f.write_str(name)
    }
}

/// Which half of a swap a record represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegKind {
    /// User escrow on the source chain.
    Outbound,
    /// Liquidity-provider escrow on the destination chain.
    Inbound,
}

impl LegKind {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            LegKind::Outbound => "outbound",
            LegKind::Inbound => "inbound",
        }
    }
}
