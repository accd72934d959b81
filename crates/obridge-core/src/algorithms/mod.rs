//! # Algorithms
//!
//! Identifier derivation, hashlock checks and the off-chain helpers a user
//! or liquidity provider runs before acting on a swap.

pub mod counter_leg;
pub mod hashlock;
pub mod timelock;
pub mod transfer_id;

pub use counter_leg::{foreign_to_local, local_to_foreign, plan_inbound_leg, verify_counter_leg};
pub use hashlock::{create_hashlock, generate_preimage, verify_preimage, HashlockScheme};
pub use timelock::{recommended_timelocks, SwapTimelocks};
pub use transfer_id::{canonical_encoding, derive_transfer_id, TRANSFER_ID_DOMAIN};
