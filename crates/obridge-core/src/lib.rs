//! # OBridge Core
//!
//! Locked-transfer state machine for trust-minimized cross-chain swaps
//! using Hashed Timelock Contracts (HTLC).
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! A user on a source chain and a liquidity provider on a destination chain
//! exchange native coin or tokens without a custodian:
//! - Each chain runs its own independent instance of this crate
//! - Both legs commit to the same hashlock
//! - Revealing the preimage on one chain makes it public for the other
//! - Expired legs refund to their sender
//!
//! ## Guarantees
//!
//! | Rule | Enforcement |
//! |------|-------------|
//! | Funds move exactly once | `Locked` is the only state with escrow; both exits are one-shot |
//! | No redemption without the secret | `H(preimage) == hashlock` checked before release |
//! | No redeem/refund race | redemption closes at the timelock, refund opens at it |
//! | Ids are never reused | records are never deleted |
//!
//! What no single chain can check: that the counter leg matches. See
//! [`algorithms::verify_counter_leg`].
//!
//! ## Module Structure
//!
//! ```text
//! obridge-core/
//! ├── domain/          # LockedTransfer, registry, invariants, errors
//! ├── algorithms/      # id derivation, hashlocks, counter-leg checks
//! ├── events/          # transfer notifications and wire format
//! ├── ports/           # ObridgeApi, AssetAdapter, Clock, EventPublisher
//! ├── adapters/        # in-memory ledger, clocks, broadcast bus
//! ├── config.rs
//! └── service.rs       # ObridgeService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{BroadcastEventBus, InMemoryLedger, ManualClock, SystemClock};
pub use algorithms::{
    create_hashlock, derive_transfer_id, generate_preimage, plan_inbound_leg,
    recommended_timelocks, verify_counter_leg, verify_preimage, HashlockScheme, SwapTimelocks,
};
pub use config::{ConfigError, ObridgeConfig};
pub use domain::{
    Address, Asset, AssetError, BidId, ChainId, ForeignAddress, Hashlock, InboundRoute,
    InvalidParameter, LegKind, LegMismatch, LegRoute, LockRegistry, LockedTransfer, ObridgeError,
    OutboundRoute, Preimage, SecretPreimage, StateViolation, TransferId, TransferParams,
    TransferState, TransferTerms,
};
pub use events::{ObridgeEvent, TransferInData, TransferOutData};
pub use ports::{AssetAdapter, Clock, EscrowReceipt, EventPublisher, ObridgeApi};
pub use service::ObridgeService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
