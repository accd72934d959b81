//! # Transfer Events
//!
//! Notifications emitted on creation, redemption and refund. Relayers and
//! liquidity providers consume them to learn of pending swaps and revealed
//! secrets.

pub mod payloads;

pub use payloads::*;
